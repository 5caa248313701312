//! Tests against translatewiki.net
//!
//! These need network access and depend on the live wiki's content, so they
//! are ignored by default.
//!
//! ```bash
//! cargo test --lib integration_tests -- --ignored
//! ```

#[cfg(test)]
mod tests {
    use crate::builder::UrlBuilder;
    use crate::lookup::{Lookup, lookup};
    use crate::resolver::key_to_titles;
    use crate::wiki::MediaWikiClient;

    const TEST_USER_AGENT: &str = "translate-link-tests \
        (https://translate-link.toolforge.org/; translate-link@lucaswerkmeister.de)";

    fn wiki() -> MediaWikiClient {
        MediaWikiClient::new("https://translatewiki.net", TEST_USER_AGENT).unwrap()
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_key_to_titles() {
        let wiki = wiki();
        for (key, title) in [
            ("wikibase-setlabel-label", "MediaWiki:Wikibase-setlabel-label/qqq"),
            (
                "wikidata-lexeme-forms-duplicates-warning",
                "Wikimedia:Wikidata-lexeme-forms-duplicates-warning/qqq",
            ),
            ("parentheses", "MediaWiki:Parentheses/qqq"),
        ] {
            let titles = key_to_titles(&wiki, key).await.unwrap();
            assert_eq!(titles, vec![title], "key {}", key);
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_title_to_url() {
        let wiki = wiki();
        let builder = UrlBuilder::default();
        for (key, title, group) in [
            (
                "wikidata-lexeme-forms-duplicates-warning",
                "Wikimedia:Wikidata-lexeme-forms-duplicates-warning/qqq",
                "wikidata-lexeme-forms",
            ),
            ("parentheses", "MediaWiki:Parentheses/qqq", "core"),
        ] {
            let url = builder.build(&wiki, key, title).await.unwrap();
            assert_eq!(
                url,
                format!(
                    "https://translatewiki.net/w/i.php?title=Special:Translate&showMessage={}&group={}&language=qqq",
                    key, group
                )
            );
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_lookup_redirects() {
        let result = lookup(&wiki(), &UrlBuilder::default(), "parentheses", "de")
            .await
            .unwrap();
        match result {
            Lookup::Redirect(url) => assert!(url.ends_with("&language=de"), "{}", url),
            other => panic!("Expected Redirect, got {:?}", other),
        }
    }
}
