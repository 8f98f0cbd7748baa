//! Repository query extensions.
//!
//! Generic list, paging and raw SQL operations for SeaORM entities:
//!
//! - **condition**: predicate group and sort translation
//! - **params**: raw SQL parameters with `@name` placeholders
//! - **repository**: the [`QueryRepository`] operations
//! - **infra**: connection management
//!
//! Operations run on whatever executor the repository is given, so the
//! caller decides whether they take part in a transaction.

pub mod condition;
pub mod infra;
pub mod params;
pub mod repository;

pub use infra::Database;
pub use params::Params;
pub use repository::{QueryRepository, Repository, RepositoryExt};

// Re-export the query building blocks callers need alongside the repository
pub use common::{AppError, AppResult, DatabaseConfig};
pub use domain::{Field, PageRequest, Predicate, SortDirection, SortSpec};
