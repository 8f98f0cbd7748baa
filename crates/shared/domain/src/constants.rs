//! Domain-level constants.
//!
//! These constants define the paging and ordering contract shared by every
//! repository query.

// =============================================================================
// Pagination
// =============================================================================

/// First page number. Page indices are 1-based.
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed rows per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

// =============================================================================
// Ordering
// =============================================================================

/// Separator between sort clauses, e.g. `"CreationTime desc,Id asc"`
pub const SORT_CLAUSE_SEPARATOR: char = ',';

/// Direction token that selects ascending order (compared case-insensitively)
pub const SORT_ASCENDING_TOKEN: &str = "asc";
