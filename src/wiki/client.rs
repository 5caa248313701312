//! MediaWiki action API client
//!
//! Talks to `<host>/w/api.php` with `format=json&formatversion=2`. The wiki
//! reports API-level failures with HTTP 200 and an `error` object in the body,
//! so every response is checked for that before it is decoded.
//!
//! # Example
//!
//! ```ignore
//! use translate_link::wiki::{MediaWikiClient, WikiApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wiki = MediaWikiClient::new("https://translatewiki.net", "my-tool (me@example.org)")?;
//!     let groups = wiki.translation_groups("MediaWiki:Parentheses/qqq").await?;
//!     println!("{:?}", groups);
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::error::{LinkError, LinkResult};
use crate::wiki::{TranslationMemorySuggestion, WikiApi};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Deserialize)]
struct AidsResponse<T> {
    helpers: T,
}

#[derive(Deserialize)]
struct GroupsAid {
    groups: Vec<String>,
}

#[derive(Deserialize)]
struct TtmServerAid {
    ttmserver: Vec<TranslationMemorySuggestion>,
}

/// `reqwest`-backed implementation of `WikiApi`
#[derive(Clone)]
pub struct MediaWikiClient {
    /// HTTP client carrying the User-Agent and timeout
    client: reqwest::Client,
    /// Origin used to build links, e.g. `https://translatewiki.net`
    host: String,
    /// `<host>/w/api.php`
    api_url: String,
}

impl MediaWikiClient {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a client for the wiki at `host`
    ///
    /// # Arguments
    ///
    /// * `host` - Wiki origin, with or without a trailing slash
    /// * `user_agent` - User-Agent identifying the tool to the wiki operators
    pub fn new(host: &str, user_agent: &str) -> LinkResult<Self> {
        Self::with_timeout(host, user_agent, Self::DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(host: &str, user_agent: &str, timeout_secs: u64) -> LinkResult<Self> {
        if user_agent.trim().is_empty() {
            return Err(LinkError::Config("User-Agent cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LinkError::Remote(format!("Failed to create HTTP client: {}", e)))?;

        let host = host.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            api_url: format!("{}/w/api.php", host),
            host,
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> LinkResult<Self> {
        Self::with_timeout(&config.wiki_host, &config.user_agent, config.timeout_secs)
    }

    /// Issue one GET request and decode the body into `T`
    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> LinkResult<T> {
        debug!("GET {} {:?}", self.api_url, params);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LinkError::Remote(format!(
                "API returned HTTP {}: {}",
                status, error_text
            )));
        }

        let json: Value = response.json().await?;
        decode_response(json)
    }
}

/// Turn an API response body into `T`, surfacing `error` objects
fn decode_response<T: DeserializeOwned>(json: Value) -> LinkResult<T> {
    if let Some(error) = json.get("error") {
        let code = error["code"].as_str().unwrap_or("unknown");
        let info = error["info"].as_str().unwrap_or("no details");
        return Err(LinkError::Remote(format!("API error {}: {}", code, info)));
    }
    Ok(serde_json::from_value(json)?)
}

impl std::fmt::Debug for MediaWikiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaWikiClient")
            .field("host", &self.host)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
impl WikiApi for MediaWikiClient {
    async fn search_titles(&self, query: &str) -> LinkResult<Vec<String>> {
        let response: SearchResponse = self
            .get(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srnamespace", "*"),
                ("srinfo", ""),
                ("srprop", ""),
                ("srlimit", "max"),
            ])
            .await?;
        Ok(response.query.search.into_iter().map(|hit| hit.title).collect())
    }

    async fn translation_groups(&self, title: &str) -> LinkResult<Vec<String>> {
        let response: AidsResponse<GroupsAid> = self
            .get(&[
                ("action", "translationaids"),
                ("title", title),
                ("prop", "groups"),
            ])
            .await?;
        Ok(response.helpers.groups)
    }

    async fn translation_memory(
        &self,
        title: &str,
    ) -> LinkResult<Vec<TranslationMemorySuggestion>> {
        let response: AidsResponse<TtmServerAid> = self
            .get(&[
                ("action", "translationaids"),
                ("title", title),
                ("prop", "ttmserver"),
            ])
            .await?;
        Ok(response.helpers.ttmserver)
    }

    fn host(&self) -> &str {
        &self.host
    }
}
