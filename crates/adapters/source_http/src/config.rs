//! HTTP source configuration and the bearer credential.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SourceError;

/// Connection settings for the HTTP asset source.
///
/// The bearer token is deliberately not part of this struct: it is injected
/// separately as a [`Credential`] so it never lives in a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSourceConfig {
    /// Absolute URL returning `{ "tools": [...] }`.
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: 30,
        }
    }
}

impl HttpSourceConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Opaque bearer token. Never printed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, trimming surrounding whitespace (e.g. a trailing newline
    /// from a secrets file).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::EmptyToken`] if nothing is left after trimming.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SourceError> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(SourceError::EmptyToken);
        }
        Ok(Self(token.to_string()))
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = HttpSourceConfig::default();
        assert!(config.endpoint.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            endpoint = "https://backend.example.com/api/tools?lastFetched=null"
            timeout_secs = 5
        "#;
        let config: HttpSourceConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.endpoint,
            "https://backend.example.com/api/tools?lastFetched=null"
        );
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: HttpSourceConfig = toml::from_str(r#"endpoint = "http://x""#).unwrap();
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn should_trim_token() {
        let credential = Credential::new("  abc.def.ghi\n").unwrap();
        assert_eq!(credential.expose(), "abc.def.ghi");
    }

    #[test]
    fn should_reject_blank_token() {
        assert!(matches!(
            Credential::new(" \n"),
            Err(SourceError::EmptyToken)
        ));
    }

    #[test]
    fn should_redact_token_in_debug_output() {
        let credential = Credential::new("super-secret").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret"));
    }
}
