//! Key and language code to final translation link(s)
//!
//! Ties the resolver, builder and language rewrite together for one request.
//! Remote calls happen strictly one after another.

use crate::builder::UrlBuilder;
use crate::error::LinkResult;
use crate::language::url_set_language;
use crate::resolver::key_to_titles;
use crate::wiki::WikiApi;
use tracing::info;

/// Outcome of looking up a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Exactly one documentation page matched; the URL to send the caller to
    Redirect(String),
    /// Zero or several pages matched; their titles, no URLs built yet
    Disambiguation(Vec<String>),
}

/// Translation URLs for every documentation page of `key`
///
/// One URL per resolved title, in search order, already rewritten to
/// `language_code`. The first failing title fails the whole call.
pub async fn find_urls(
    wiki: &dyn WikiApi,
    builder: &UrlBuilder,
    key: &str,
    language_code: &str,
) -> LinkResult<Vec<String>> {
    let titles = key_to_titles(wiki, key).await?;
    urls_for_titles(wiki, builder, key, &titles, language_code).await
}

/// Look up `key`, deciding between a direct redirect and a disambiguation list
///
/// Only a single matching title is run through the builder. Any other count
/// returns straight after the search.
pub async fn lookup(
    wiki: &dyn WikiApi,
    builder: &UrlBuilder,
    key: &str,
    language_code: &str,
) -> LinkResult<Lookup> {
    let titles = key_to_titles(wiki, key).await?;

    if titles.len() != 1 {
        info!(
            "{} ({}) is ambiguous: {} title(s)",
            key,
            language_code,
            titles.len()
        );
        return Ok(Lookup::Disambiguation(titles));
    }

    let url = builder.build(wiki, key, &titles[0]).await?;
    let url = url_set_language(&url, language_code);
    info!("{} ({}) -> {}", key, language_code, url);
    Ok(Lookup::Redirect(url))
}

/// Build and rewrite one URL per title, in order
pub async fn urls_for_titles(
    wiki: &dyn WikiApi,
    builder: &UrlBuilder,
    key: &str,
    titles: &[String],
    language_code: &str,
) -> LinkResult<Vec<String>> {
    let mut urls = Vec::with_capacity(titles.len());
    for title in titles {
        let url = builder.build(wiki, key, title).await?;
        urls.push(url_set_language(&url, language_code));
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkError;
    use crate::wiki::MockWiki;

    fn parentheses_wiki() -> MockWiki {
        MockWiki::new()
            .with_search_results(&[
                "MediaWiki:Parentheses/qqq",
                "MediaWiki:Parentheses-start/qqq",
            ])
            .with_groups("MediaWiki:Parentheses/qqq", &["core"])
    }

    #[tokio::test]
    async fn test_single_title_redirects() {
        let wiki = parentheses_wiki();
        let result = lookup(&wiki, &UrlBuilder::default(), "parentheses", "de")
            .await
            .unwrap();
        assert_eq!(
            result,
            Lookup::Redirect(
                "https://translatewiki.net/w/i.php?title=Special:Translate&showMessage=parentheses&group=core&language=de"
                    .to_string()
            )
        );
        assert_eq!(
            wiki.calls(),
            vec![
                "search(intitle:\"parentheses/qqq\")",
                "groups(MediaWiki:Parentheses/qqq)"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_titles_is_empty_disambiguation() {
        let wiki = MockWiki::new();
        let result = lookup(&wiki, &UrlBuilder::default(), "nonexistent", "de")
            .await
            .unwrap();
        assert_eq!(result, Lookup::Disambiguation(vec![]));
    }

    #[tokio::test]
    async fn test_several_titles_disambiguate_without_building() {
        let wiki = MockWiki::new()
            .with_search_results(&["MediaWiki:Key/qqq", "Wikimedia:Key/qqq"])
            .with_memory("Wikimedia:Key/qqq", "Wikimedia:Key/qqq", "/a")
            .with_memory("Wikimedia:Key/qqq", "Wikimedia:Key/qqq", "/b");
        let result = lookup(&wiki, &UrlBuilder::default(), "key", "pt")
            .await
            .unwrap();
        assert_eq!(
            result,
            Lookup::Disambiguation(vec![
                "MediaWiki:Key/qqq".to_string(),
                "Wikimedia:Key/qqq".to_string()
            ])
        );
        assert_eq!(wiki.calls(), vec!["search(intitle:\"key/qqq\")"]);
    }

    #[tokio::test]
    async fn test_urls_for_titles() {
        let wiki = MockWiki::new().with_groups("MediaWiki:Ok/qqq", &["core"]);
        let titles = vec!["MediaWiki:Ok/qqq".to_string(), "Wikimedia:Ok/qqq".to_string()];
        let urls = urls_for_titles(&wiki, &UrlBuilder::default(), "ok", &titles, "pt")
            .await
            .unwrap();
        assert_eq!(
            urls,
            vec![
                "https://translatewiki.net/w/i.php?title=Special:Translate&showMessage=ok&group=core&language=pt",
                "https://translatewiki.net/w/i.php?title=Wikimedia:Ok/pt&action=edit",
            ]
        );
    }

    #[tokio::test]
    async fn test_find_urls_rewrites_language() {
        let wiki = parentheses_wiki();
        let urls = find_urls(&wiki, &UrlBuilder::default(), "Parentheses", "en")
            .await
            .unwrap();
        assert_eq!(
            urls,
            vec![
                "https://translatewiki.net/w/i.php?title=Special:Translate&showMessage=parentheses&group=core&language=en"
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_on_single_title_fails_request() {
        let wiki = MockWiki::new()
            .with_search_results(&["MediaWiki:Key/qqq"])
            .with_memory("MediaWiki:Key/qqq", "MediaWiki:Key/qqq", "/a")
            .with_memory("MediaWiki:Key/qqq", "MediaWiki:Key/qqq", "/b");
        let result = lookup(&wiki, &UrlBuilder::default(), "key", "de").await;
        assert!(matches!(
            result,
            Err(LinkError::AmbiguousTranslationMemory { .. })
        ));
    }
}
