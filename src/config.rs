//! Process-wide configuration
//!
//! The configuration is read once at startup from `config.toml` (or the file
//! named by `TRANSLATE_LINK_CONFIG`) and then handed to whoever needs it. A
//! missing file means a local development setup: defaults are used and a
//! random signing secret is generated.

use rand::{Rng, distributions::Alphanumeric};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::builder::UrlBuilder;
use crate::error::{LinkError, LinkResult};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "TRANSLATE_LINK_CONFIG";
/// Environment variable overriding `wiki_host`
pub const WIKI_HOST_VAR: &str = "TRANSLATE_LINK_WIKI_HOST";
/// Environment variable overriding `bind`
pub const BIND_VAR: &str = "TRANSLATE_LINK_BIND";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Immutable configuration snapshot
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signing secret, never logged
    ///
    /// Nothing signs with it yet. It is reserved for CSRF tokens once the
    /// index form grows a server-side helper, and is validated now so that
    /// existing deployment files keep loading when that lands.
    pub secret_key: String,
    /// Origin of the translation wiki, without trailing slash
    pub wiki_host: String,
    /// User-Agent sent with every API request
    pub user_agent: String,
    /// Message group whose keys are recovered from the page title
    pub core_group: String,
    /// Address the web server listens on
    pub bind: String,
    /// Per-request timeout for API calls
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_key: random_secret(),
            wiki_host: "https://translatewiki.net".to_string(),
            user_agent: "translate-link (https://translate-link.toolforge.org/; \
                         translate-link@lucaswerkmeister.de)"
                .to_string(),
            core_group: "core".to_string(),
            bind: "127.0.0.1:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load the configuration from a TOML file
    ///
    /// A file that does not exist yields the defaults; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: &Path) -> LinkResult<Self> {
        if !path.exists() {
            info!(
                "{} not found, assuming local development setup",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| LinkError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config = Self::parse(&content)
            .map_err(|e| LinkError::Config(format!("{}: {}", path.display(), e)))?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the configuration the way the binaries do: file from
    /// `TRANSLATE_LINK_CONFIG` (default `config.toml`), then environment overrides.
    pub fn from_env() -> LinkResult<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::load(Path::new(&path))?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse TOML content; absent keys take their defaults
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup(WIKI_HOST_VAR) {
            self.wiki_host = host;
        }
        if let Some(bind) = lookup(BIND_VAR) {
            self.bind = bind;
        }
        self.wiki_host = self.wiki_host.trim_end_matches('/').to_string();
    }

    /// The URL builder configured for this wiki
    pub fn url_builder(&self) -> UrlBuilder {
        UrlBuilder::new(&self.core_group)
    }

    fn validate(&self) -> Result<(), String> {
        if self.secret_key.trim().is_empty() {
            return Err("secret_key cannot be empty".to_string());
        }
        if !self.wiki_host.starts_with("https://") && !self.wiki_host.starts_with("http://") {
            return Err(format!("wiki_host must be an http(s) URL: {}", self.wiki_host));
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"***")
            .field("wiki_host", &self.wiki_host)
            .field("user_agent", &self.user_agent)
            .field("core_group", &self.core_group)
            .field("bind", &self.bind)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.wiki_host, "https://translatewiki.net");
        assert_eq!(config.core_group, "core");
        assert_eq!(config.secret_key.len(), 64);
        assert!(config.secret_key.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_secrets_differ() {
        assert_ne!(Config::default().secret_key, Config::default().secret_key);
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse("secret_key = \"s3cret\"\nbind = \"0.0.0.0:8000\"\n").unwrap();
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.bind, "0.0.0.0:8000");
        assert_eq!(config.wiki_host, "https://translatewiki.net");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_without_secret_generates_one() {
        let config = Config::parse("bind = \"0.0.0.0:8000\"\n").unwrap();
        assert_eq!(config.secret_key.len(), 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_host() {
        let result = Config::parse("wiki_host = \"translatewiki.net\"");
        assert!(result.unwrap_err().contains("wiki_host"));
    }

    #[test]
    fn test_parse_rejects_empty_secret() {
        assert!(Config::parse("secret_key = \"  \"").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        assert!(Config::parse("secret_key = ").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/translate-link/config.toml")).unwrap();
        assert_eq!(config.core_group, "core");
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let path = std::env::temp_dir().join(format!(
            "translate-link-invalid-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(LinkError::Config(msg)) => assert!(msg.contains("translate-link-invalid")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (WIKI_HOST_VAR, "http://localhost:8080/"),
            (BIND_VAR, "[::]:9000"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.wiki_host, "http://localhost:8080");
        assert_eq!(config.bind, "[::]:9000");
    }

    #[test]
    fn test_debug_masks_secret() {
        let config = Config::parse("secret_key = \"hunter2\"").unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("hunter2"));
    }
}
