//! Documentation page title to translation URL
//!
//! A URL is discovered by trying an ordered list of strategies and taking the
//! first one that produces something:
//!
//! 1. **Groups** - ask `translationaids` for the page's message groups and link
//!    to `Special:Translate` for the first group.
//! 2. **Translation memory** - ask the translation memory helper and use the
//!    editor URL of the suggestion located at exactly this page.
//! 3. **Raw edit** - link to the plain edit form of the page. Always works.
//!
//! Every URL still points at the `qqq` language; see [`crate::language`] for
//! the rewrite to the requested code.

use crate::error::{LinkError, LinkResult};
use crate::resolver::DOCUMENTATION_LANGUAGE;
use crate::wiki::WikiApi;
use tracing::{debug, warn};

/// Group whose message keys are recovered from the page title
pub const DEFAULT_CORE_GROUP: &str = "core";

/// One way of finding a translation URL for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `Special:Translate` for the page's first message group
    Groups,
    /// Editor URL reported by the translation memory helper
    TranslationMemory,
    /// Plain edit form of the page
    RawEdit,
}

impl Strategy {
    /// All strategies in fallback order
    pub const ALL: [Strategy; 3] = [
        Strategy::Groups,
        Strategy::TranslationMemory,
        Strategy::RawEdit,
    ];

    /// Short name for logs and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Groups => "groups",
            Strategy::TranslationMemory => "ttmserver",
            Strategy::RawEdit => "edit",
        }
    }
}

/// Builds translation URLs by running strategies in order
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    core_group: String,
    strategies: Vec<Strategy>,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CORE_GROUP)
    }
}

impl UrlBuilder {
    /// Create a builder using every strategy
    ///
    /// # Arguments
    ///
    /// * `core_group` - Message group whose canonical keys are taken from the
    ///   page title instead of the caller
    pub fn new(core_group: &str) -> Self {
        Self {
            core_group: core_group.to_string(),
            strategies: Strategy::ALL.to_vec(),
        }
    }

    /// Replace the strategy list (order matters)
    pub fn with_strategies(mut self, strategies: &[Strategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }

    /// Strategies in the order they are tried
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Find a translation URL for `title`, the documentation page of `key`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - URL from the first strategy that found one
    /// * `Err(LinkError::NoUrl)` - If no strategy found anything
    /// * `Err(LinkError)` - If a remote call failed or a strategy hit an
    ///   inconsistency (key mismatch, ambiguous translation memory)
    pub async fn build(&self, wiki: &dyn WikiApi, key: &str, title: &str) -> LinkResult<String> {
        for strategy in &self.strategies {
            debug!("trying {} strategy for {} ({})", strategy.name(), title, key);
            if let Some(url) = self.run(*strategy, wiki, key, title).await? {
                debug!("{} strategy found {}", strategy.name(), url);
                return Ok(url);
            }
        }

        Err(LinkError::NoUrl {
            title: title.to_string(),
            key: key.to_string(),
        })
    }

    async fn run(
        &self,
        strategy: Strategy,
        wiki: &dyn WikiApi,
        key: &str,
        title: &str,
    ) -> LinkResult<Option<String>> {
        match strategy {
            Strategy::Groups => self.groups_url(wiki, key, title).await,
            Strategy::TranslationMemory => translation_memory_url(wiki, title).await,
            Strategy::RawEdit => Ok(Some(edit_url(wiki.host(), title))),
        }
    }

    async fn groups_url(
        &self,
        wiki: &dyn WikiApi,
        key: &str,
        title: &str,
    ) -> LinkResult<Option<String>> {
        let groups = wiki.translation_groups(title).await?;
        let Some(group) = groups.first() else {
            warn!("translationaids gave no groups for {} ({})", title, key);
            return Ok(None);
        };

        // The caller's casing may differ from the real key; core keys can be
        // read back from the title.
        let key = if groups.iter().any(|g| *g == self.core_group) {
            let canonical = canonical_key(title)?;
            if canonical.to_lowercase() != key.to_lowercase() {
                return Err(LinkError::KeyMismatch {
                    key: key.to_string(),
                    canonical,
                    title: title.to_string(),
                });
            }
            canonical
        } else {
            key.to_string()
        };

        Ok(Some(format!(
            "{}/w/i.php?title=Special:Translate&showMessage={}&group={}&language={}",
            wiki.host(),
            key,
            group,
            DOCUMENTATION_LANGUAGE
        )))
    }
}

async fn translation_memory_url(wiki: &dyn WikiApi, title: &str) -> LinkResult<Option<String>> {
    let suggestions = wiki.translation_memory(title).await?;

    // Identical source text elsewhere would point at a different message.
    let matches: Vec<_> = suggestions
        .into_iter()
        .filter(|s| s.location == title)
        .collect();

    match matches.as_slice() {
        [] => Ok(None),
        [suggestion] => Ok(Some(format!("{}{}", wiki.host(), suggestion.editor_url))),
        _ => Err(LinkError::AmbiguousTranslationMemory {
            title: title.to_string(),
            count: matches.len(),
        }),
    }
}

/// Plain edit form URL for `title`
pub fn edit_url(host: &str, title: &str) -> String {
    format!("{}/w/i.php?title={}&action=edit", host, title)
}

/// Recover the message key from a `Namespace:Name/qqq` title
///
/// The page name loses the namespace and the `/qqq` suffix and has only its
/// first character lower-cased: `MediaWiki:Wikibase-setlabel-label/qqq` gives
/// `wikibase-setlabel-label`, `MediaWiki:Foo-Bar/qqq` gives `foo-Bar`.
pub fn canonical_key(title: &str) -> LinkResult<String> {
    let unexpected = || LinkError::UnexpectedTitle {
        title: title.to_string(),
    };

    let (_namespace, page) = title.split_once(':').ok_or_else(unexpected)?;
    let name = page
        .strip_suffix(DOCUMENTATION_LANGUAGE)
        .and_then(|rest| rest.strip_suffix('/'))
        .ok_or_else(unexpected)?;

    let mut chars = name.chars();
    let first = chars.next().ok_or_else(unexpected)?;
    Ok(first.to_lowercase().chain(chars).collect())
}
