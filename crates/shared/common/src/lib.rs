//! Common utilities shared across the repository crates.
//!
//! This crate provides:
//! - Unified error handling for query operations
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
