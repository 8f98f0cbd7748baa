//! Domain layer - Database-agnostic query building blocks.
//!
//! This crate contains pure query-shaping logic with no ORM dependencies:
//! predicates, sort specifications and page requests. The repository layer
//! translates these into SQL.

pub mod constants;
pub mod error;
pub mod page;
pub mod predicate;
pub mod sort;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use page::PageRequest;
pub use predicate::{
    to_predicate_group, Comparison, Field, FieldPredicate, FieldValue, GroupOperator, Predicate,
    PredicateGroup,
};
pub use sort::{parse_ordering, SortDirection, SortSpec};
