//! News provider: free-text query in, (title, link) headlines out.
//!
//! Every failure mode — network error, non-200 status, unparseable body —
//! degrades to an empty list. Headlines are decoration; their absence is
//! never an error condition for the caller.

use serde::Deserialize;
use std::time::Duration;

/// A single headline with its article link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

/// Trait for news sources.
pub trait NewsProvider: Send + Sync {
    /// Fetch headlines for a free-text query. Failures yield an empty list.
    fn headlines(&self, query: &str) -> Vec<Headline>;
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: Option<String>,
}

impl Article {
    fn into_headline(self) -> Headline {
        Headline {
            title: self.title.unwrap_or_else(|| "No title".to_string()),
            link: self.url.unwrap_or_default(),
        }
    }
}

/// newsapi.org `everything` endpoint client.
///
/// The API key is optional at construction; without one the service
/// answers 401 and the provider degrades to no headlines.
pub struct NewsApiProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
}

impl NewsApiProvider {
    const ENDPOINT: &'static str = "https://newsapi.org/v2/everything";

    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build HTTP client");
        Self { client, api_key }
    }

    fn parse_body(body: &str) -> Vec<Headline> {
        match serde_json::from_str::<NewsResponse>(body) {
            Ok(resp) => resp
                .articles
                .into_iter()
                .map(Article::into_headline)
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "news response parse failed");
                Vec::new()
            }
        }
    }
}

impl NewsProvider for NewsApiProvider {
    fn headlines(&self, query: &str) -> Vec<Headline> {
        let mut request = self.client.get(Self::ENDPOINT).query(&[("q", query)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apiKey", key.as_str())]);
        }

        let resp = match request.send() {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "news request failed");
                return Vec::new();
            }
        };

        if resp.status() != reqwest::StatusCode::OK {
            tracing::warn!(status = %resp.status(), "news request rejected");
            return Vec::new();
        }

        match resp.text() {
            Ok(body) => Self::parse_body(&body),
            Err(e) => {
                tracing::warn!(error = %e, "news body read failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_basic() {
        let body = r#"{
            "status": "ok",
            "articles": [
                {"title": "Markets rally", "url": "https://example.com/a"},
                {"title": null, "url": null}
            ]
        }"#;
        let headlines = NewsApiProvider::parse_body(body);
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].title, "Markets rally");
        assert_eq!(headlines[0].link, "https://example.com/a");
        assert_eq!(headlines[1].title, "No title");
        assert_eq!(headlines[1].link, "");
    }

    #[test]
    fn parse_body_missing_articles_is_empty() {
        assert!(NewsApiProvider::parse_body(r#"{"status":"error"}"#).is_empty());
    }

    #[test]
    fn parse_body_garbage_is_empty() {
        assert!(NewsApiProvider::parse_body("not json {{{").is_empty());
    }
}
