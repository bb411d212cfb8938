//! Common utilities and shared types for imery-rs.
//!
//! This crate provides foundational components used across all imery-rs crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Ticket Colors**: Background color generation for exhibition tickets
//!
//! # Example
//!
//! ```no_run
//! use imery_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod id;

pub use color::TicketColor;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
