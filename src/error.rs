use thiserror::Error;

/// Error types for key resolution and link building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Network, HTTP status, decoding or API-level failure talking to the wiki
    #[error("remote error: {0}")]
    Remote(String),

    /// The key recovered from the page title disagrees with the requested key
    #[error("key {key} does not match canonical key {canonical} of {title}")]
    KeyMismatch {
        key: String,
        canonical: String,
        title: String,
    },

    /// A title that should look like `Namespace:Name/qqq` does not
    #[error("unexpected title shape: {title}")]
    UnexpectedTitle { title: String },

    /// Translation memory reported several messages at the same location
    #[error("translation memory returned {count} matches for {title}")]
    AmbiguousTranslationMemory { title: String, count: usize },

    /// Every discovery strategy came up empty
    #[error("could not find a translation URL for {title} ({key})")]
    NoUrl { title: String, key: String },

    /// The key cannot be turned into a title pattern
    #[error("cannot match titles for key {key}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
}

impl LinkError {
    /// Whether the failure happened on the wiki's side rather than in our own checks
    pub fn is_remote(&self) -> bool {
        matches!(self, LinkError::Remote(_))
    }
}

impl From<reqwest::Error> for LinkError {
    fn from(error: reqwest::Error) -> Self {
        LinkError::Remote(error.to_string())
    }
}

impl From<serde_json::Error> for LinkError {
    fn from(error: serde_json::Error) -> Self {
        LinkError::Remote(format!("invalid API response: {}", error))
    }
}

/// Result type for link operations
pub type LinkResult<T> = Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mismatch_message_names_everything() {
        let error = LinkError::KeyMismatch {
            key: "foo".to_string(),
            canonical: "bar".to_string(),
            title: "MediaWiki:Bar/qqq".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("foo"));
        assert!(message.contains("bar"));
        assert!(message.contains("MediaWiki:Bar/qqq"));
    }

    #[test]
    fn test_is_remote() {
        assert!(LinkError::Remote("timeout".to_string()).is_remote());
        assert!(
            !LinkError::NoUrl {
                title: "A:B/qqq".to_string(),
                key: "b".to_string()
            }
            .is_remote()
        );
    }

    #[test]
    fn test_json_error_converts_to_remote() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LinkError = json_error.into();
        match error {
            LinkError::Remote(msg) => assert!(msg.contains("invalid API response")),
            _ => panic!("Expected Remote"),
        }
    }
}
