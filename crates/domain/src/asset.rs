//! Asset — a monitored piece of equipment, as supplied by the asset source.
//!
//! Records arrive wrapped in a `{ "tools": [...] }` envelope. The collection
//! is a snapshot: it is decoded once per load cycle and never mutated.

mod status;

pub use status::AssetStatus;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LoadError, SchemaViolation};

/// Opaque identifier assigned by the source; stable across fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single asset record.
///
/// Only `_id` is mandatory. Everything else degrades gracefully: missing or
/// mistyped text fields stay `None`, flags that are not JSON booleans read as
/// `false`, and any status outside the known set is [`AssetStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "_id", alias = "id")]
    pub id: AssetId,
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub critical: bool,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub safety: bool,
    /// Raw ISO 8601 timestamp; parsed only for display.
    #[serde(
        default,
        rename = "updatedAt",
        deserialize_with = "string_or_none"
    )]
    pub updated_at: Option<String>,
    /// Group identifier, shown verbatim.
    #[serde(default, deserialize_with = "string_or_none")]
    pub group: Option<String>,
    /// Company identifier, shown verbatim.
    #[serde(default, deserialize_with = "string_or_none")]
    pub company: Option<String>,
}

impl Asset {
    /// Create an asset with the given id and every optional field unset.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: AssetId::new(id),
            name: None,
            status: AssetStatus::Unknown,
            critical: false,
            safety: false,
            updated_at: None,
            group: None,
            company: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    #[must_use]
    pub fn with_safety(mut self, safety: bool) -> Self {
        self.safety = safety;
        self
    }

    #[must_use]
    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    })
}

fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(
        serde_json::Value::deserialize(deserializer)?,
        serde_json::Value::Bool(true)
    ))
}

/// Decode a response body shaped as `{ "tools": [Asset, ...] }`.
///
/// Source order is preserved. Identifiers must be non-empty and unique.
///
/// # Errors
///
/// Returns [`LoadError::MalformedBody`] when the body is not JSON, and
/// [`LoadError::Schema`] when the JSON does not follow the envelope contract.
pub fn decode_collection(body: &[u8]) -> Result<Vec<Asset>, LoadError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(LoadError::MalformedBody)?;

    let serde_json::Value::Object(mut root) = value else {
        return Err(SchemaViolation::NotAnObject.into());
    };
    let tools = root.remove("tools").ok_or(SchemaViolation::MissingTools)?;
    let serde_json::Value::Array(items) = tools else {
        return Err(SchemaViolation::ToolsNotAnArray.into());
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut assets = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let asset: Asset =
            serde_json::from_value(item).map_err(|err| SchemaViolation::InvalidRecord {
                index,
                reason: err.to_string(),
            })?;
        if asset.id.as_str().is_empty() {
            return Err(SchemaViolation::InvalidRecord {
                index,
                reason: "empty `_id`".to_string(),
            }
            .into());
        }
        if !seen.insert(asset.id.clone()) {
            return Err(SchemaViolation::DuplicateId(asset.id.to_string()).into());
        }
        assets.push(asset);
    }

    Ok(assets)
}
