//! # assetdash-domain
//!
//! Pure domain model for the asset dashboard.
//!
//! ## Responsibilities
//! - Define **Assets** (server-supplied records tracked by operational status)
//! - Define the closed **Status** enumeration with its `Unknown` fallback
//! - Decode the `{ "tools": [...] }` response body into a validated collection
//! - Map each asset into a **Card** description (pure rendering contract)
//! - Define the **load error** taxonomy shared by every asset source
//! - Timestamp display formatting
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod asset;
pub mod card;
