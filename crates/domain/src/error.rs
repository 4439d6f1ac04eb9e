//! Load error taxonomy shared by every asset source.
//!
//! Each failure mode keeps its own variant so callers can log and test them
//! precisely. The dashboard collapses all of them into a single
//! [`LoadFailure`] carrying a human-readable message.

use std::error::Error as StdError;

use serde::Serialize;

/// Why a response body did not match the `{ "tools": [...] }` contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    /// The top-level JSON value is not an object.
    #[error("expected a JSON object at the top level")]
    NotAnObject,

    /// The object has no `tools` field.
    #[error("missing `tools` field")]
    MissingTools,

    /// The `tools` field exists but is not an array.
    #[error("`tools` is not an array")]
    ToolsNotAnArray,

    /// An element of `tools` could not be read as an asset record.
    #[error("invalid asset record at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the offending element in the source array.
        index: usize,
        /// Decoder message for that element.
        reason: String,
    },

    /// Two records share the same identifier.
    #[error("duplicate asset id `{0}`")]
    DuplicateId(String),
}

/// A failed load cycle.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request never produced a response (DNS, TLS, timeout, reset, …).
    #[error("network request failed")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with a non-success status.
    #[error("Failed to fetch data: {status}{}", reason_suffix(.reason))]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase, empty when unknown.
        reason: String,
    },

    /// The body is not valid JSON.
    #[error("response body is not valid JSON")]
    MalformedBody(#[source] serde_json::Error),

    /// The body is JSON but not shaped as expected.
    #[error("Invalid data structure from API")]
    Schema(#[from] SchemaViolation),
}

impl LoadError {
    /// Wrap any transport error.
    pub fn network(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Network(err.into())
    }

    /// Coarse classification of this error.
    #[must_use]
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::Network(_) => LoadErrorKind::Network,
            Self::HttpStatus { .. } => LoadErrorKind::HttpStatus,
            Self::MalformedBody(_) => LoadErrorKind::MalformedBody,
            Self::Schema(_) => LoadErrorKind::SchemaViolation,
        }
    }

    /// Full message including every source in the chain, separated by `": "`.
    #[must_use]
    pub fn user_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

fn reason_suffix(reason: &str) -> String {
    let reason = reason.trim();
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {reason}")
    }
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    Network,
    HttpStatus,
    MalformedBody,
    SchemaViolation,
}

/// The user-visible outcome of a failed load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Which failure mode occurred.
    pub kind: LoadErrorKind,
    /// Human-readable description, shown verbatim on the dashboard.
    pub message: String,
}

impl From<&LoadError> for LoadFailure {
    fn from(err: &LoadError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

impl From<LoadError> for LoadFailure {
    fn from(err: LoadError) -> Self {
        Self::from(&err)
    }
}
