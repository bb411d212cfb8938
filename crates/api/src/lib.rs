//! HTTP API layer for imery-rs.
//!
//! RPC-over-POST endpoints under `/api` with camelCase JSON bodies.
//! Caller identity is an explicit `userId` field on each request; there
//! is no session or token handling.
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
