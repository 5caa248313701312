//! In-memory wiki for tests
//!
//! `MockWiki` answers the three `WikiApi` queries from fixtures and records
//! every call it receives, so tests can check both results and which queries a
//! code path actually issued.
//!
//! # Example
//!
//! ```ignore
//! use translate_link::wiki::MockWiki;
//!
//! let wiki = MockWiki::new()
//!     .with_search_results(&["MediaWiki:Parentheses/qqq"])
//!     .with_groups("MediaWiki:Parentheses/qqq", &["core"]);
//! ```

use crate::error::{LinkError, LinkResult};
use crate::wiki::{TranslationMemorySuggestion, WikiApi};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fixture-backed `WikiApi`
#[derive(Debug, Default)]
pub struct MockWiki {
    host: String,
    /// Returned for every search, regardless of the query
    search_results: Vec<String>,
    groups: HashMap<String, Vec<String>>,
    memory: HashMap<String, Vec<TranslationMemorySuggestion>>,
    /// When set, every call fails with this remote error
    failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockWiki {
    /// Create an empty mock for `https://translatewiki.net`
    pub fn new() -> Self {
        Self {
            host: "https://translatewiki.net".to_string(),
            ..Default::default()
        }
    }

    /// Use a different host when building links
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Titles returned by every search, in this order
    pub fn with_search_results(mut self, titles: &[&str]) -> Self {
        self.search_results = titles.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Message groups reported for `title`
    pub fn with_groups(mut self, title: &str, groups: &[&str]) -> Self {
        self.groups.insert(
            title.to_string(),
            groups.iter().map(|g| g.to_string()).collect(),
        );
        self
    }

    /// Add one translation memory suggestion for `title`
    pub fn with_memory(mut self, title: &str, location: &str, editor_url: &str) -> Self {
        self.memory
            .entry(title.to_string())
            .or_default()
            .push(TranslationMemorySuggestion {
                editor_url: editor_url.to_string(),
                location: location.to_string(),
            });
        self
    }

    /// Make every call fail with a remote error
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Calls received so far, formatted as `method(argument)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, method: &str, argument: &str) -> LinkResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{}({})", method, argument));
        }
        match &self.failure {
            Some(message) => Err(LinkError::Remote(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WikiApi for MockWiki {
    async fn search_titles(&self, query: &str) -> LinkResult<Vec<String>> {
        self.record("search", query)?;
        Ok(self.search_results.clone())
    }

    async fn translation_groups(&self, title: &str) -> LinkResult<Vec<String>> {
        self.record("groups", title)?;
        Ok(self.groups.get(title).cloned().unwrap_or_default())
    }

    async fn translation_memory(
        &self,
        title: &str,
    ) -> LinkResult<Vec<TranslationMemorySuggestion>> {
        self.record("ttmserver", title)?;
        Ok(self.memory.get(title).cloned().unwrap_or_default())
    }

    fn host(&self) -> &str {
        &self.host
    }
}
