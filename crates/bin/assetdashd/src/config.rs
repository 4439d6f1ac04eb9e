//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `assetdash.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.
//!
//! The bearer token is never read from the TOML body: it comes from
//! `ASSETDASH_TOKEN` or from the file named by `source.token_file`.

use std::path::PathBuf;

use serde::Deserialize;

use assetdash_adapter_source_http::{Credential, HttpSourceConfig};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Where assets come from.
    pub source: SourceConfig,
    /// Page rendering settings.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which asset source backs the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Live remote endpoint.
    #[default]
    Http,
    /// Built-in sample collection.
    Fixture,
}

impl std::str::FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "fixture" => Ok(Self::Fixture),
            other => Err(ConfigError::Validation(format!(
                "unknown source kind `{other}` (expected `http` or `fixture`)"
            ))),
        }
    }
}

/// Asset source configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Selected source.
    pub kind: SourceKind,
    /// Settings for [`SourceKind::Http`].
    pub http: HttpSourceConfig,
    /// Settings for [`SourceKind::Fixture`].
    pub fixture: FixtureConfig,
    /// File holding the bearer token (e.g. a mounted secret).
    pub token_file: Option<PathBuf>,
    /// Resolved bearer token; filled from the environment or `token_file`.
    #[serde(skip)]
    pub token: Option<Credential>,
}

/// Fixture source settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Simulated response delay in milliseconds.
    pub delay_ms: u64,
}

/// Page rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Auto-refresh interval of the page while loading, in seconds.
    pub refresh_seconds: u32,
    /// Offset from UTC used to display timestamps, in minutes.
    pub utc_offset_minutes: i32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `assetdash.toml` (if present), apply
    /// environment-variable overrides, and resolve the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, the token
    /// file cannot be read, or the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("assetdash.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.resolve_token(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = var("ASSETDASH_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("ASSETDASH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("ASSETDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("ASSETDASH_SOURCE") {
            self.source.kind = val.parse()?;
        }
        if let Some(val) = var("ASSETDASH_ENDPOINT") {
            self.source.http.endpoint = val;
        }
        if let Some(val) = var("ASSETDASH_TOKEN_FILE") {
            self.source.token_file = Some(PathBuf::from(val));
        }
        if let Some(val) = var("ASSETDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn resolve_token(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let raw = match (var("ASSETDASH_TOKEN"), &self.source.token_file) {
            (Some(token), _) => Some(token),
            (None, Some(path)) => {
                Some(
                    std::fs::read_to_string(path).map_err(|source| ConfigError::TokenFile {
                        path: path.clone(),
                        source,
                    })?,
                )
            }
            (None, None) => None,
        };
        self.source.token = match raw {
            Some(raw) => Some(
                Credential::new(raw)
                    .map_err(|err| ConfigError::Validation(err.to_string()))?,
            ),
            None => None,
        };
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.dashboard.refresh_seconds == 0 {
            return Err(ConfigError::Validation(
                "dashboard.refresh_seconds must be non-zero".to_string(),
            ));
        }
        if self.dashboard.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(ConfigError::Validation(
                "dashboard.utc_offset_minutes must be within one day".to_string(),
            ));
        }
        if self.source.kind == SourceKind::Http {
            if self.source.http.timeout_secs == 0 {
                return Err(ConfigError::Validation(
                    "source.http.timeout_secs must be non-zero".to_string(),
                ));
            }
            if self.source.http.endpoint.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "source.http.endpoint is required for the http source".to_string(),
                ));
            }
            if self.source.token.is_none() {
                return Err(ConfigError::Validation(
                    "a bearer token is required for the http source \
                     (set ASSETDASH_TOKEN or source.token_file)"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_seconds: 2,
            utc_offset_minutes: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "assetdashd=info,assetdash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The token file could not be read.
    #[error("failed to read token file `{}`", .path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
