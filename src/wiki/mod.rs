//! Access to the translation wiki
//!
//! Key resolution and URL building only need three things from the wiki: a
//! title search, the message groups of a page, and translation memory
//! suggestions for a page. The `WikiApi` trait captures exactly that, so the
//! core logic runs unchanged against translatewiki.net (`MediaWikiClient`) or
//! against fixtures (`MockWiki`).

pub mod client;
pub mod mock;

use crate::error::LinkResult;
use async_trait::async_trait;
use serde::Deserialize;

pub use client::MediaWikiClient;
pub use mock::MockWiki;

/// One suggestion from the translation memory helper
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMemorySuggestion {
    /// Editor link relative to the wiki host, e.g. `/wiki/Special:Translate?...`
    pub editor_url: String,
    /// Title of the message page the suggestion was taken from
    pub location: String,
}

/// The subset of the MediaWiki action API used by this crate
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// Full-text search across all namespaces, returning only page titles
    ///
    /// Titles come back in the order the search engine ranks them.
    async fn search_titles(&self, query: &str) -> LinkResult<Vec<String>>;

    /// Message groups the given page belongs to
    async fn translation_groups(&self, title: &str) -> LinkResult<Vec<String>>;

    /// Translation memory suggestions for the given page
    async fn translation_memory(&self, title: &str)
    -> LinkResult<Vec<TranslationMemorySuggestion>>;

    /// Origin of the wiki, e.g. `https://translatewiki.net`
    fn host(&self) -> &str;
}
