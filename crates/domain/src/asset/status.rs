//! Asset status — the operational state reported for an asset.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operational state of an asset.
///
/// The source may send any string (or nothing at all); everything outside
/// the known set collapses to [`Unknown`](Self::Unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetStatus {
    Up,
    Down,
    Maintenance,
    #[default]
    Unknown,
}

impl AssetStatus {
    /// Interpret a raw status string, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_label(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("up") {
            Self::Up
        } else if raw.eq_ignore_ascii_case("down") {
            Self::Down
        } else if raw.eq_ignore_ascii_case("maintenance") {
            Self::Maintenance
        } else {
            Self::Unknown
        }
    }

    /// Uppercase display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Maintenance => "MAINTENANCE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Lowercase CSS class name derived from the label.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Maintenance => "maintenance",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AssetStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AssetStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any JSON shape is accepted; only strings can name a known status.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(raw) => Self::from_label(&raw),
            _ => Self::Unknown,
        })
    }
}
