//! Predicate builder and the database-agnostic predicate group.
//!
//! Predicates are built with a small combinator API instead of being
//! reflected out of closures:
//!
//! ```
//! use domain::{Field, Predicate};
//!
//! let adults_named_bob: Predicate = Field::new("age").ge(18).and(Field::new("name").eq("Bob"));
//! ```
//!
//! The repository layer translates the resulting [`PredicateGroup`] into the
//! SQL engine's own condition type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comparison value, independent of any database driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

/// Comparison applied to a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq(FieldValue),
    Ne(FieldValue),
    Gt(FieldValue),
    Ge(FieldValue),
    Lt(FieldValue),
    Le(FieldValue),
    /// SQL `LIKE` pattern, `%` and `_` wildcards passed through
    Like(String),
    In(Vec<FieldValue>),
    Between(FieldValue, FieldValue),
    IsNull,
}

/// Leaf of a predicate tree: one field, one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPredicate {
    pub field: String,
    pub comparison: Comparison,
}

/// How the members of a [`PredicateGroup`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperator {
    And,
    Or,
}

/// AND/OR tree of field comparisons.
///
/// An empty group matches every row regardless of its operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateGroup {
    pub operator: GroupOperator,
    pub predicates: Vec<Predicate>,
}

impl PredicateGroup {
    /// Empty AND group (matches everything)
    pub fn match_all() -> Self {
        Self {
            operator: GroupOperator::And,
            predicates: Vec::new(),
        }
    }

    pub fn new(operator: GroupOperator, predicates: Vec<Predicate>) -> Self {
        Self {
            operator,
            predicates,
        }
    }

    /// True when the group places no restriction on rows
    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Default for PredicateGroup {
    fn default() -> Self {
        Self::match_all()
    }
}

/// A boolean expression over entity fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Field(FieldPredicate),
    Group(PredicateGroup),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Combine with `other` under AND
    pub fn and(self, other: Predicate) -> Predicate {
        self.combine(GroupOperator::And, other)
    }

    /// Combine with `other` under OR
    pub fn or(self, other: Predicate) -> Predicate {
        self.combine(GroupOperator::Or, other)
    }

    /// Negate. Negating twice yields the original predicate.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        match self {
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    fn combine(self, operator: GroupOperator, other: Predicate) -> Predicate {
        match self {
            // Flatten chains like `a.and(b).and(c)` into a single group
            Predicate::Group(mut group) if group.operator == operator => {
                group.predicates.push(other);
                Predicate::Group(group)
            }
            lhs => Predicate::Group(PredicateGroup::new(operator, vec![lhs, other])),
        }
    }
}

impl From<FieldPredicate> for Predicate {
    fn from(p: FieldPredicate) -> Self {
        Predicate::Field(p)
    }
}

impl From<PredicateGroup> for Predicate {
    fn from(g: PredicateGroup) -> Self {
        Predicate::Group(g)
    }
}

/// Entry point of the builder: names the field a comparison applies to.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn compare(self, comparison: Comparison) -> Predicate {
        Predicate::Field(FieldPredicate {
            field: self.name,
            comparison,
        })
    }

    pub fn eq(self, value: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Eq(value.into()))
    }

    pub fn ne(self, value: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Ne(value.into()))
    }

    pub fn gt(self, value: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Gt(value.into()))
    }

    pub fn ge(self, value: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Ge(value.into()))
    }

    pub fn lt(self, value: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Lt(value.into()))
    }

    pub fn le(self, value: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Le(value.into()))
    }

    pub fn like(self, pattern: impl Into<String>) -> Predicate {
        self.compare(Comparison::Like(pattern.into()))
    }

    pub fn is_in<I, V>(self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.compare(Comparison::In(values.into_iter().map(Into::into).collect()))
    }

    pub fn between(self, low: impl Into<FieldValue>, high: impl Into<FieldValue>) -> Predicate {
        self.compare(Comparison::Between(low.into(), high.into()))
    }

    pub fn is_null(self) -> Predicate {
        self.compare(Comparison::IsNull)
    }
}

/// Normalize an optional predicate into a predicate group.
///
/// `None` yields the match-all group. Single predicates are wrapped in an
/// AND group of one.
pub fn to_predicate_group(predicate: Option<&Predicate>) -> PredicateGroup {
    match predicate {
        None => PredicateGroup::match_all(),
        Some(Predicate::Group(group)) => group.clone(),
        Some(other) => PredicateGroup::new(GroupOperator::And, vec![other.clone()]),
    }
}
