//! Market Fire Watch CLI — account, watchlist, chart, and news commands.
//!
//! Commands:
//! - `register` — create an account
//! - `passwd` — change an account password
//! - `watchlist show|add|remove` — manage the authenticated user's tickers
//! - `chart` — fetch bars for a symbol and print indicator columns
//! - `news` — headlines for a query, or for every watchlist ticker

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use firewatch_core::auth::CredentialStore;
use firewatch_core::data::{MarketDataProvider, YahooProvider};
use firewatch_core::domain::{Bar, TimeFrame};
use firewatch_core::indicators::{Adx, Bollinger, Ema, Indicator, Rsi, Sma};
use firewatch_core::news::{NewsApiProvider, NewsProvider};
use firewatch_core::session::Session;
use firewatch_core::watchlist::WatchlistStore;
use std::io::Write as _;
use std::path::PathBuf;

mod config;

use config::Config;

#[derive(Parser)]
#[command(
    name = "firewatch",
    about = "Market Fire Watch — watchlists, indicators, and headlines"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "firewatch.toml", global = true)]
    config: PathBuf,

    /// Data directory for user and watchlist files. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account.
    Register {
        /// Username (letters, digits, '.', '_' and '-').
        username: String,
    },
    /// Change an account password.
    Passwd {
        /// Username.
        username: String,
    },
    /// Manage the authenticated user's watchlist.
    Watchlist {
        /// Username to authenticate as.
        username: String,

        #[command(subcommand)]
        action: WatchlistAction,
    },
    /// Fetch bars for a symbol and print an indicator table.
    Chart {
        /// Ticker symbol (e.g. AAPL).
        symbol: String,

        /// Time frame: 1d, 1mo, 3mo, 6mo, ytd, ttm, 5y, max.
        #[arg(long, default_value = "3mo")]
        frame: TimeFrame,

        /// Simple moving average window (0 disables).
        #[arg(long)]
        sma: Option<usize>,

        /// Exponential moving average span (0 disables).
        #[arg(long)]
        ema: Option<usize>,

        /// Include RSI (14).
        #[arg(long, default_value_t = false)]
        rsi: bool,

        /// Include ADX, +DI, and -DI (14).
        #[arg(long, default_value_t = false)]
        adx: bool,

        /// Include Bollinger bands (20, 2.0).
        #[arg(long, default_value_t = false)]
        bollinger: bool,

        /// Number of trailing rows to print.
        #[arg(long, default_value_t = 15)]
        rows: usize,
    },
    /// Print headlines for a query, or for every watchlist ticker.
    News {
        /// Free-text query. Without one, headlines are fetched per
        /// watchlist ticker and a username is required.
        query: Option<String>,

        /// Username whose watchlist drives the per-ticker lookup.
        #[arg(long)]
        username: Option<String>,
    },
}

#[derive(Subcommand)]
enum WatchlistAction {
    /// Print the watchlist in alphabetical order.
    Show,
    /// Add up to five comma-separated tickers (e.g. "AAPL,MSFT").
    Add {
        /// Comma-separated ticker symbols.
        tickers: String,
    },
    /// Remove one ticker.
    Remove {
        /// Ticker symbol.
        symbol: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config, cli.data_dir.clone())?;

    match cli.command {
        Commands::Register { username } => run_register(&config, &username),
        Commands::Passwd { username } => run_passwd(&config, &username),
        Commands::Watchlist { username, action } => run_watchlist(&config, &username, action),
        Commands::Chart {
            symbol,
            frame,
            sma,
            ema,
            rsi,
            adx,
            bollinger,
            rows,
        } => run_chart(&symbol, frame, sma, ema, rsi, adx, bollinger, rows),
        Commands::News { query, username } => run_news(&config, query, username),
    }
}

fn open_stores(config: &Config) -> Result<(CredentialStore, WatchlistStore)> {
    let credentials = CredentialStore::open(config.data_dir.join("users.json"))?;
    let watchlists = WatchlistStore::new(&config.data_dir);
    Ok((credentials, watchlists))
}

fn prompt_password(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

fn authenticate(
    credentials: &CredentialStore,
    watchlists: &WatchlistStore,
    username: &str,
) -> Result<Session> {
    let password = prompt_password(&format!("Password for {username}"))?;
    Ok(Session::login(credentials, watchlists, username, &password)?)
}

fn run_register(config: &Config, username: &str) -> Result<()> {
    let (credentials, _) = open_stores(config)?;
    let password = prompt_password("Password")?;
    let confirm = prompt_password("Confirm password")?;
    if password != confirm {
        bail!("passwords do not match");
    }
    credentials.register(username, &password)?;
    println!("Account '{username}' created.");
    Ok(())
}

fn run_passwd(config: &Config, username: &str) -> Result<()> {
    let (credentials, _) = open_stores(config)?;
    let old = prompt_password("Current password")?;
    let new = prompt_password("New password")?;
    credentials.change_password(username, &old, &new)?;
    println!("Password updated.");
    Ok(())
}

fn run_watchlist(config: &Config, username: &str, action: WatchlistAction) -> Result<()> {
    let (credentials, watchlists) = open_stores(config)?;
    let mut session = authenticate(&credentials, &watchlists, username)?;

    match action {
        WatchlistAction::Show => {
            let symbols = session.watchlist().sorted();
            if symbols.is_empty() {
                println!("Watchlist is empty.");
            } else {
                println!("Watchlist ({}/25):", symbols.len());
                for symbol in symbols {
                    println!("  {symbol}");
                }
            }
        }
        WatchlistAction::Add { tickers } => {
            let provider = YahooProvider::new();
            let outcome = session.add_tickers(&watchlists, &tickers, &provider)?;
            for symbol in &outcome.added {
                println!("Added: {symbol}");
            }
            for symbol in &outcome.invalid {
                println!("Not a known ticker, skipped: {symbol}");
            }
            if outcome.added.is_empty() && outcome.invalid.is_empty() {
                println!("Nothing added (already present or watchlist full).");
            }
        }
        WatchlistAction::Remove { symbol } => {
            let symbol = symbol.trim().to_uppercase();
            if session.remove_ticker(&watchlists, &symbol)? {
                println!("Removed: {symbol}");
            } else {
                println!("Not on the watchlist: {symbol}");
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_chart(
    symbol: &str,
    frame: TimeFrame,
    sma: Option<usize>,
    ema: Option<usize>,
    rsi: bool,
    adx: bool,
    bollinger: bool,
    rows: usize,
) -> Result<()> {
    let symbol = symbol.trim().to_uppercase();
    let provider = YahooProvider::new();
    let bars = provider.fetch(&symbol, frame)?;
    if bars.is_empty() {
        println!("No data returned for {symbol} over {frame}.");
        return Ok(());
    }

    let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();
    if let Some(window) = sma {
        indicators.push(Box::new(Sma::new(window)));
    }
    if let Some(span) = ema {
        indicators.push(Box::new(Ema::new(span)));
    }
    if rsi {
        indicators.push(Box::new(Rsi::default()));
    }
    if bollinger {
        indicators.push(Box::new(Bollinger::upper(
            Bollinger::DEFAULT_WINDOW,
            Bollinger::DEFAULT_MULTIPLIER,
        )));
        indicators.push(Box::new(Bollinger::middle(
            Bollinger::DEFAULT_WINDOW,
            Bollinger::DEFAULT_MULTIPLIER,
        )));
        indicators.push(Box::new(Bollinger::lower(
            Bollinger::DEFAULT_WINDOW,
            Bollinger::DEFAULT_MULTIPLIER,
        )));
    }

    let mut columns: Vec<(String, Vec<f64>)> = indicators
        .iter()
        .map(|ind| (ind.name().to_string(), ind.compute(&bars)))
        .collect();
    if adx {
        let out = Adx::new(Adx::DEFAULT_PERIOD).compute_directional(&bars);
        columns.push(("adx_14".to_string(), out.adx));
        columns.push(("plus_di".to_string(), out.plus_di));
        columns.push(("minus_di".to_string(), out.minus_di));
    }

    print_chart_table(&symbol, frame, &bars, &columns, rows);
    Ok(())
}

fn print_chart_table(
    symbol: &str,
    frame: TimeFrame,
    bars: &[Bar],
    columns: &[(String, Vec<f64>)],
    rows: usize,
) {
    println!("{symbol} — {frame} ({} bars)", bars.len());
    print!("{:<17} {:>10}", "Time", "Close");
    for (name, _) in columns {
        print!(" {name:>12}");
    }
    println!();
    println!("{}", "-".repeat(28 + 13 * columns.len()));

    let start = bars.len().saturating_sub(rows);
    for (i, bar) in bars.iter().enumerate().skip(start) {
        print!(
            "{:<17} {:>10.2}",
            bar.timestamp.format("%Y-%m-%d %H:%M"),
            bar.close
        );
        for (_, values) in columns {
            if values[i].is_nan() {
                print!(" {:>12}", "-");
            } else {
                print!(" {:>12.2}", values[i]);
            }
        }
        println!();
    }
}

fn run_news(config: &Config, query: Option<String>, username: Option<String>) -> Result<()> {
    let provider = NewsApiProvider::new(config.news_api_key.clone());

    let queries: Vec<String> = match query {
        Some(q) => vec![q],
        None => {
            let username = username
                .ok_or_else(|| anyhow!("without a query, --username is required"))?;
            let (credentials, watchlists) = open_stores(config)?;
            let session = authenticate(&credentials, &watchlists, &username)?;
            let symbols = session.watchlist().sorted();
            if symbols.is_empty() {
                println!("Watchlist is empty, nothing to look up.");
                return Ok(());
            }
            symbols
        }
    };

    for query in &queries {
        let headlines = provider.headlines(query);
        println!("== {query} ==");
        if headlines.is_empty() {
            println!("  (no headlines)");
        }
        for headline in headlines.iter().take(5) {
            println!("  {}", headline.title);
            if !headline.link.is_empty() {
                println!("    {}", headline.link);
            }
        }
    }
    Ok(())
}
