//! Card — the visual description of one asset.
//!
//! [`CardRenderer`] is a pure mapping from [`Asset`] to [`AssetCard`]. It
//! never fails: missing text degrades to placeholders and unparsable
//! timestamps to [`INVALID_DATE`](crate::time::INVALID_DATE).

use chrono::FixedOffset;
use serde::Serialize;

use crate::asset::{Asset, AssetStatus};
use crate::time;

/// Placeholder for an asset without a name.
pub const UNNAMED: &str = "Unnamed asset";

/// Placeholder for a missing group or company.
pub const NOT_AVAILABLE: &str = "N/A";

/// Highlight badge shown in a card footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Critical,
    Safety,
}

impl Badge {
    /// Uppercase badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Safety => "SAFETY",
        }
    }

    /// CSS class name.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Safety => "safety",
        }
    }
}

/// Card header: title and status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardHeader {
    pub name: String,
    pub status: AssetStatus,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

/// Card body: descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardBody {
    pub group: String,
    pub company: String,
    pub last_updated: String,
}

/// Card footer: zero, one, or two badges, critical first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFooter {
    pub badges: Vec<Badge>,
}

/// Rendered description of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetCard {
    /// Render key; the asset identifier.
    pub key: String,
    pub header: CardHeader,
    pub body: CardBody,
    pub footer: CardFooter,
}

impl AssetCard {
    /// DOM id of the card title, referenced by `aria-labelledby`.
    #[must_use]
    pub fn title_id(&self) -> String {
        format!("asset-name-{}", self.key)
    }
}

/// Maps assets to cards, formatting timestamps in a fixed display offset.
#[derive(Debug, Clone, Copy)]
pub struct CardRenderer {
    offset: FixedOffset,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(time::utc_offset())
    }
}

impl CardRenderer {
    /// Create a renderer that displays timestamps in `offset`.
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Render a single asset.
    #[must_use]
    pub fn render(&self, asset: &Asset) -> AssetCard {
        let mut badges = Vec::with_capacity(2);
        if asset.critical {
            badges.push(Badge::Critical);
        }
        if asset.safety {
            badges.push(Badge::Safety);
        }

        AssetCard {
            key: asset.id.to_string(),
            header: CardHeader {
                name: text_or(asset.name.as_deref(), UNNAMED),
                status: asset.status,
                status_label: asset.status.label(),
                status_class: asset.status.css_class(),
            },
            body: CardBody {
                group: text_or(asset.group.as_deref(), NOT_AVAILABLE),
                company: text_or(asset.company.as_deref(), NOT_AVAILABLE),
                last_updated: time::display_or_invalid(asset.updated_at.as_deref(), self.offset),
            },
            footer: CardFooter { badges },
        }
    }

    /// Render every asset, preserving order.
    #[must_use]
    pub fn render_all(&self, assets: &[Asset]) -> Vec<AssetCard> {
        assets.iter().map(|asset| self.render(asset)).collect()
    }
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::INVALID_DATE;

    fn full_asset() -> Asset {
        Asset::new("a1")
            .with_name("Hydraulic Press")
            .with_status(AssetStatus::Maintenance)
            .with_updated_at("2025-09-07T13:53:05.371Z")
            .with_group("5f1a")
            .with_company("5d7b")
    }

    #[test]
    fn should_render_header_body_and_key() {
        let card = CardRenderer::default().render(&full_asset());
        assert_eq!(card.key, "a1");
        assert_eq!(card.title_id(), "asset-name-a1");
        assert_eq!(card.header.name, "Hydraulic Press");
        assert_eq!(card.header.status_label, "MAINTENANCE");
        assert_eq!(card.header.status_class, "maintenance");
        assert_eq!(card.body.group, "5f1a");
        assert_eq!(card.body.company, "5d7b");
        assert_eq!(card.body.last_updated, "9/7/2025, 1:53:05 PM");
    }

    #[test]
    fn should_render_unknown_status_when_unrecognized() {
        let asset = Asset::new("a").with_status(AssetStatus::from_label("EXPLODED"));
        let card = CardRenderer::default().render(&asset);
        assert_eq!(card.header.status_label, "UNKNOWN");
        assert_eq!(card.header.status_class, "unknown");
    }

    #[test]
    fn should_render_no_badges_when_flags_are_false() {
        let card = CardRenderer::default().render(&full_asset());
        assert!(card.footer.badges.is_empty());
    }

    #[test]
    fn should_render_each_badge_independently() {
        let renderer = CardRenderer::default();

        let critical = renderer.render(&full_asset().with_critical(true));
        assert_eq!(critical.footer.badges, [Badge::Critical]);

        let safety = renderer.render(&full_asset().with_safety(true));
        assert_eq!(safety.footer.badges, [Badge::Safety]);

        let both = renderer.render(&full_asset().with_critical(true).with_safety(true));
        assert_eq!(both.footer.badges, [Badge::Critical, Badge::Safety]);
    }

    #[test]
    fn should_use_placeholders_when_fields_missing() {
        let card = CardRenderer::default().render(&Asset::new("bare"));
        assert_eq!(card.header.name, UNNAMED);
        assert_eq!(card.body.group, NOT_AVAILABLE);
        assert_eq!(card.body.company, NOT_AVAILABLE);
        assert_eq!(card.body.last_updated, INVALID_DATE);
    }

    #[test]
    fn should_treat_blank_name_as_missing() {
        let card = CardRenderer::default().render(&Asset::new("a").with_name("   "));
        assert_eq!(card.header.name, UNNAMED);
    }

    #[test]
    fn should_not_fail_on_invalid_timestamp() {
        let asset = full_asset().with_updated_at("not a date");
        let card = CardRenderer::default().render(&asset);
        assert_eq!(card.body.last_updated, INVALID_DATE);
    }

    #[test]
    fn should_render_all_in_source_order() {
        let assets = vec![Asset::new("z"), Asset::new("m"), Asset::new("a")];
        let cards = CardRenderer::default().render_all(&assets);
        let keys: Vec<&str> = cards.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["z", "m", "a"]);
    }

    #[test]
    fn should_format_timestamp_in_configured_offset() {
        let renderer = CardRenderer::new(time::offset_from_minutes(-240));
        let card = renderer.render(&full_asset());
        assert_eq!(card.body.last_updated, "9/7/2025, 9:53:05 AM");
    }

    #[test]
    fn should_serialize_badges_in_lowercase() {
        let json = serde_json::to_value(Badge::Safety).unwrap();
        assert_eq!(json, serde_json::json!("safety"));
    }
}
