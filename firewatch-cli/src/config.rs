//! CLI configuration: optional TOML file plus environment overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings from `firewatch.toml`. Everything is optional; missing file
/// means all defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub news_api_key: Option<String>,
}

/// Resolved configuration after merging file, environment, and defaults.
#[derive(Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub news_api_key: Option<String>,
}

impl Config {
    /// Load and merge, precedence: CLI flag > env > config file > default.
    pub fn load(config_path: &Path, data_dir_flag: Option<PathBuf>) -> Result<Config> {
        let file = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str::<FileConfig>(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            FileConfig::default()
        };

        let data_dir = data_dir_flag
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from("data"));

        let news_api_key = std::env::var("NEWSAPI_KEY").ok().or(file.news_api_key);

        Ok(Config {
            data_dir,
            news_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/firewatch.toml"), None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn flag_wins_over_file() {
        let dir = std::env::temp_dir().join("firewatch_cli_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("firewatch.toml");
        std::fs::write(&path, "data_dir = \"/from/file\"\n").unwrap();

        let config = Config::load(&path, Some(PathBuf::from("/from/flag"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));

        let config = Config::load(&path, None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/file"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = std::env::temp_dir().join("firewatch_cli_config_bad");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("firewatch.toml");
        std::fs::write(&path, "data_dir = [broken").unwrap();

        assert!(Config::load(&path, None).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
