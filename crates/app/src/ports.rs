//! Port definitions.
//!
//! The loader only sees asset sources through the traits declared here; the
//! HTTP and fixture adapters implement them from their own crates.

pub mod asset_source;

pub use asset_source::AssetSource;
