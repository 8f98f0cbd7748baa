//! Sort specifications parsed from ordering strings.

use serde::{Deserialize, Serialize};

use crate::constants::{SORT_ASCENDING_TOKEN, SORT_CLAUSE_SEPARATOR};
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `"asc"` in any case is ascending; every other token is descending.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case(SORT_ASCENDING_TOKEN) {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Ascending)
    }
}

/// One `field direction` clause of an ordering string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Parse an ordering string such as `"CreationTime desc,Id asc"`.
///
/// Blank input yields no sort clauses. Every clause must hold exactly a field
/// name and a direction token.
pub fn parse_ordering(ordering: &str) -> DomainResult<Vec<SortSpec>> {
    if ordering.trim().is_empty() {
        return Ok(Vec::new());
    }

    ordering
        .split(SORT_CLAUSE_SEPARATOR)
        .map(parse_clause)
        .collect()
}

fn parse_clause(clause: &str) -> DomainResult<SortSpec> {
    let tokens: Vec<&str> = clause.split_whitespace().collect();

    match tokens.as_slice() {
        [field, direction] => Ok(SortSpec {
            field: (*field).to_string(),
            direction: SortDirection::from_token(direction),
        }),
        _ => Err(DomainError::invalid_sort(format!(
            "expected `<field> <asc|desc>`, got `{}`",
            clause.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_clause_order() {
        let specs = parse_ordering("CreationTime desc,Id asc").unwrap();
        assert_eq!(
            specs,
            vec![SortSpec::desc("CreationTime"), SortSpec::asc("Id")]
        );
    }

    #[test]
    fn test_direction_is_case_insensitive() {
        let specs = parse_ordering("a ASC, b Asc, c aSc").unwrap();
        assert!(specs.iter().all(|s| s.direction.is_ascending()));
    }

    #[test]
    fn test_unknown_direction_is_descending() {
        let specs = parse_ordering("age down,name whatever").unwrap();
        assert!(specs
            .iter()
            .all(|s| s.direction == SortDirection::Descending));
    }

    #[test]
    fn test_empty_and_blank_yield_nothing() {
        assert!(parse_ordering("").unwrap().is_empty());
        assert!(parse_ordering("   ").unwrap().is_empty());
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        let specs = parse_ordering("  Age   desc ,  Name asc ").unwrap();
        assert_eq!(specs, vec![SortSpec::desc("Age"), SortSpec::asc("Name")]);
    }

    #[test]
    fn test_missing_direction_is_rejected() {
        let err = parse_ordering("Age").unwrap_err();
        assert!(matches!(err, DomainError::InvalidSortSpecification(_)));
    }

    #[test]
    fn test_trailing_separator_is_rejected() {
        let err = parse_ordering("Age desc,").unwrap_err();
        assert!(matches!(err, DomainError::InvalidSortSpecification(_)));
    }

    #[test]
    fn test_too_many_tokens_is_rejected() {
        assert!(parse_ordering("Age desc nulls_last").is_err());
    }
}
