//! Core business logic for imery-rs.

pub mod services;

pub use services::*;
