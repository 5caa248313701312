//! Message key to documentation page titles
//!
//! Every message on translatewiki.net has a documentation page in the `qqq`
//! pseudo-language, e.g. `MediaWiki:Parentheses/qqq` for the key
//! `parentheses`. The namespace depends on the project the message belongs to
//! and the first letter of the page name is usually capitalized, so the title
//! is found by searching rather than guessed.

use crate::error::{LinkError, LinkResult};
use crate::wiki::WikiApi;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Pseudo-language code of documentation pages
pub const DOCUMENTATION_LANGUAGE: &str = "qqq";

/// Upper bound on the compiled size of a title pattern
const MAX_PATTERN_SIZE: usize = 1 << 20;

/// Find the documentation pages for `key`
///
/// The wiki's full-text search is loose: it also returns titles that merely
/// contain `<key>/qqq` or that lack a namespace. Only titles of the exact form
/// `<Namespace>:<key>/qqq` (compared case-insensitively) are kept, in the order
/// the search returned them.
///
/// # Example
///
/// ```ignore
/// let titles = key_to_titles(&wiki, "parentheses").await?;
/// assert_eq!(titles, vec!["MediaWiki:Parentheses/qqq"]);
/// ```
pub async fn key_to_titles(wiki: &dyn WikiApi, key: &str) -> LinkResult<Vec<String>> {
    let pattern = title_pattern(key)?;
    let query = format!("intitle:\"{}/{}\"", key, DOCUMENTATION_LANGUAGE);
    let results = wiki.search_titles(&query).await?;

    let titles: Vec<String> = results
        .into_iter()
        .filter(|title| pattern.is_match(title))
        .collect();

    debug!("{} resolved to {} title(s): {:?}", key, titles.len(), titles);
    Ok(titles)
}

/// Case-insensitive full-match pattern for `<Namespace>:<key>/qqq`
pub fn title_pattern(key: &str) -> LinkResult<Regex> {
    let pattern = format!(
        "^[^:]*:{}$",
        regex::escape(&format!("{}/{}", key, DOCUMENTATION_LANGUAGE))
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .size_limit(MAX_PATTERN_SIZE)
        .build()
        .map_err(|e| LinkError::InvalidKey {
            key: key.to_string(),
            reason: e.to_string(),
        })
}
