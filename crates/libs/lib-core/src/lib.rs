//! # Core Library
//!
//! Configuration, error type, DTOs, the SQLite store and the agronomy
//! reference tables shared by the web layer and the utilities.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;
pub mod agronomy;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, run_migrations, DbPool};
