//! # assetdash-app
//!
//! Application layer — the **port definition** for asset sources and the
//! data-loading use-case.
//!
//! ## Responsibilities
//! - Define the `AssetSource` port that adapters implement (HTTP, fixture, …)
//! - Drive one load cycle at a time through the `DataLoader` state machine:
//!   `Loading` → `Error` | `Loaded`
//! - Publish every state transition on a `tokio::sync::watch` channel so
//!   readers (the HTTP dashboard) always see the latest snapshot
//! - Guard state writes with cancellation flags so a torn-down dashboard is
//!   never updated
//!
//! ## Dependency rule
//! Depends on `assetdash-domain` only (plus `tokio` for channels and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod loader;
pub mod ports;
