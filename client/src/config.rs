//! Client configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Base URL used when `SURVEY_ADMIN_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9001/api/v1";

/// Request timeout used when `SURVEY_ADMIN_HTTP_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL; request paths are appended to it
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// File backing the token store; `None` keeps the token in memory
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SURVEY_ADMIN_API_BASE_URL`
    /// - `SURVEY_ADMIN_HTTP_TIMEOUT_SECS`
    /// - `SURVEY_ADMIN_TOKEN_FILE`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values count as unset; unparseable numbers fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            base_url: get("SURVEY_ADMIN_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                get("SURVEY_ADMIN_HTTP_TIMEOUT_SECS")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            token_file: get("SURVEY_ADMIN_TOKEN_FILE").map(PathBuf::from),
        }
    }

    /// Builder: set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builder: set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: persist the token in a file.
    #[must_use]
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:9001/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_values_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SURVEY_ADMIN_API_BASE_URL", "https://admin.example.com/api/v1"),
            ("SURVEY_ADMIN_HTTP_TIMEOUT_SECS", "5"),
            ("SURVEY_ADMIN_TOKEN_FILE", "/tmp/token.json"),
        ]));

        assert_eq!(config.base_url, "https://admin.example.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_file, Some(PathBuf::from("/tmp/token.json")));
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SURVEY_ADMIN_API_BASE_URL", "  "),
            ("SURVEY_ADMIN_HTTP_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.token_file, None);
    }
}
