//! Links to translatewiki.net for a message key and a language
//!
//! Given a message key such as `parentheses` and a language code such as
//! `de`, find the key's documentation page (`MediaWiki:Parentheses/qqq`) and
//! the best URL for translating it into that language.
//!
//! # Example
//!
//! ```ignore
//! use translate_link::{Config, Lookup, MediaWikiClient, lookup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let wiki = MediaWikiClient::from_config(&config)?;
//!     match lookup(&wiki, &config.url_builder(), "parentheses", "de").await? {
//!         Lookup::Redirect(url) => println!("{}", url),
//!         Lookup::Disambiguation(titles) => println!("ambiguous: {:?}", titles),
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod language;
pub mod lookup;
pub mod resolver;
pub mod wiki;

// Tests against the live wiki (only available during testing)
#[cfg(test)]
mod integration_tests;

pub use builder::{Strategy, UrlBuilder, canonical_key, edit_url};
pub use config::Config;
pub use error::{LinkError, LinkResult};
pub use language::url_set_language;
pub use lookup::{Lookup, find_urls, lookup, urls_for_titles};
pub use resolver::{DOCUMENTATION_LANGUAGE, key_to_titles, title_pattern};
pub use wiki::{MediaWikiClient, MockWiki, TranslationMemorySuggestion, WikiApi};
