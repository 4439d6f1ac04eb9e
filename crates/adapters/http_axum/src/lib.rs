//! # assetdash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered asset dashboard** at `/`, showing
//!   exactly one of: a loading indicator, an error alert, or the card grid
//! - Serve a **JSON view** of the same state at `/api/state`
//! - Accept a manual refresh (`POST /refresh`) that starts a new load cycle
//! - Map the loader's state into HTTP responses (HTML or JSON)
//!
//! ## No-JS dashboard approach
//! - The page is rendered server-side as complete HTML.
//! - While a load cycle is running the page carries
//!   `<meta http-equiv="refresh">` so the browser re-polls until it settles.
//! - The refresh button is a `<form>` that POSTs and redirects (PRG pattern).
//!
//! ## Dependency rule
//! Depends on `assetdash-app` (loader and port trait) and `assetdash-domain`
//! (cards, errors). Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod router;
pub mod state;
