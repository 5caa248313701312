//! Rewriting the placeholder language of a translation URL
//!
//! Every URL the builder produces points at the `qqq` documentation language,
//! either as a `language=qqq` query parameter or as a `/qqq` page suffix. The
//! rewrite is textual: the URL is not parsed, and only the first occurrence of
//! each pattern changes.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static LANGUAGE_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&])language=qqq(&|#|$)").unwrap());

static LANGUAGE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/qqq(&|#|$)").unwrap());

/// Point `url` at `language_code` instead of `qqq`
///
/// The code is inserted verbatim; it is not validated or escaped.
///
/// # Example
///
/// ```ignore
/// assert_eq!(
///     url_set_language("http://example.com/?language=qqq&other_language=qqq", "de"),
///     "http://example.com/?language=de&other_language=qqq"
/// );
/// ```
pub fn url_set_language(url: &str, language_code: &str) -> String {
    let url = LANGUAGE_PARAMETER.replacen(url, 1, |caps: &Captures| {
        format!("{}language={}{}", &caps[1], language_code, &caps[2])
    });
    LANGUAGE_SUFFIX
        .replacen(&url, 1, |caps: &Captures| {
            format!("/{}{}", language_code, &caps[1])
        })
        .into_owned()
}
