//! Translation of predicate groups and sort specs into SeaORM queries.

use std::str::FromStr;

use sea_orm::sea_query::{Condition, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, IdenStatic, Iterable, Order, QueryFilter, QueryOrder,
    Select, Value,
};

use common::{AppError, AppResult};
use domain::{
    Comparison, FieldPredicate, FieldValue, GroupOperator, Predicate, PredicateGroup, SortSpec,
};

/// Resolve a field name to a column of `E`.
///
/// Tries the column's own parser first (snake_case or camelCase), then a
/// comparison ignoring case and underscores, so `CreationTime` finds
/// `creation_time`.
pub fn resolve_column<E: EntityTrait>(field: &str) -> Option<E::Column> {
    if let Ok(column) = E::Column::from_str(field) {
        return Some(column);
    }

    let wanted = normalize(field);
    E::Column::iter().find(|column| normalize(column.as_str()) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Start a `SELECT` over `E` restricted by `group`.
///
/// A group that restricts nothing leaves the query without a `WHERE` clause.
pub fn filtered_select<E: EntityTrait>(group: &PredicateGroup) -> AppResult<Select<E>> {
    let select = E::find();
    if group_matches_everything(group) {
        return Ok(select);
    }

    Ok(select.filter(to_condition::<E>(group)?))
}

/// Translate a predicate group into a SeaORM condition over `E`.
pub fn to_condition<E: EntityTrait>(group: &PredicateGroup) -> AppResult<Condition> {
    if group_matches_everything(group) {
        return Ok(Condition::all());
    }

    let mut condition = match group.operator {
        GroupOperator::And => Condition::all(),
        GroupOperator::Or => Condition::any(),
    };

    // Unrestricted members of an And group add nothing.
    for predicate in group.predicates.iter().filter(|p| !matches_everything(p)) {
        condition = condition.add(predicate_condition::<E>(predicate)?);
    }

    Ok(condition)
}

/// Whether `group` lets every row through, looking through nested groups.
///
/// An And group does when all of its members do, an Or group when any
/// member does. An empty group of either kind always does.
fn group_matches_everything(group: &PredicateGroup) -> bool {
    if group.is_match_all() {
        return true;
    }

    match group.operator {
        GroupOperator::And => group.predicates.iter().all(matches_everything),
        GroupOperator::Or => group.predicates.iter().any(matches_everything),
    }
}

fn matches_everything(predicate: &Predicate) -> bool {
    matches!(predicate, Predicate::Group(group) if group_matches_everything(group))
}

fn predicate_condition<E: EntityTrait>(predicate: &Predicate) -> AppResult<Condition> {
    match predicate {
        Predicate::Field(field) => Ok(Condition::all().add(field_expr::<E>(field)?)),
        Predicate::Group(group) => to_condition::<E>(group),
        Predicate::Not(inner) => {
            if matches_everything(inner) {
                return Err(AppError::unsupported_predicate(
                    "negation of a predicate group that matches every row",
                ));
            }
            Ok(predicate_condition::<E>(inner)?.not())
        }
    }
}

fn field_expr<E: EntityTrait>(predicate: &FieldPredicate) -> AppResult<SimpleExpr> {
    let column = resolve_column::<E>(&predicate.field).ok_or_else(|| {
        AppError::unsupported_predicate(format!(
            "field `{}` is not mapped on `{}`",
            predicate.field,
            E::default().table_name()
        ))
    })?;

    let expr = match &predicate.comparison {
        Comparison::Eq(v) => column.eq(to_value(v)),
        Comparison::Ne(v) => column.ne(to_value(v)),
        Comparison::Gt(v) => column.gt(to_value(v)),
        Comparison::Ge(v) => column.gte(to_value(v)),
        Comparison::Lt(v) => column.lt(to_value(v)),
        Comparison::Le(v) => column.lte(to_value(v)),
        Comparison::Like(pattern) => column.like(pattern.as_str()),
        Comparison::In(values) => column.is_in(values.iter().map(to_value)),
        Comparison::Between(low, high) => column.between(to_value(low), to_value(high)),
        Comparison::IsNull => column.is_null(),
    };

    Ok(expr)
}

/// Convert a domain value into a SeaORM bind value
pub fn to_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(v) => Value::from(*v),
        FieldValue::Int(v) => Value::from(*v),
        FieldValue::Float(v) => Value::from(*v),
        FieldValue::Text(v) => Value::from(v.clone()),
        FieldValue::Uuid(v) => Value::from(*v),
        FieldValue::Timestamp(v) => Value::from(*v),
    }
}

/// Append `ORDER BY` clauses to `select`, in the order given.
pub fn apply_ordering<E: EntityTrait>(
    mut select: Select<E>,
    sorting: &[SortSpec],
) -> AppResult<Select<E>> {
    for spec in sorting {
        let column = resolve_column::<E>(&spec.field).ok_or_else(|| {
            AppError::invalid_sort(format!(
                "unknown sort field `{}` on `{}`",
                spec.field,
                E::default().table_name()
            ))
        })?;

        let order = if spec.direction.is_ascending() {
            Order::Asc
        } else {
            Order::Desc
        };
        select = select.order_by(column, order);
    }

    Ok(select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{parse_ordering, to_predicate_group, Field};
    use sea_orm::{DbBackend, QueryTrait};

    mod post {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "posts")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub title: String,
            pub view_count: i32,
            pub creation_time: DateTimeUtc,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn render(select: Select<post::Entity>) -> String {
        select.build(DbBackend::Postgres).to_string()
    }

    fn resolved(field: &str) -> Option<String> {
        resolve_column::<post::Entity>(field).map(|column| column.as_str().to_string())
    }

    #[test]
    fn test_resolve_column_variants() {
        assert_eq!(resolved("creation_time").as_deref(), Some("creation_time"));
        assert_eq!(resolved("creationTime").as_deref(), Some("creation_time"));
        assert_eq!(resolved("CreationTime").as_deref(), Some("creation_time"));
        assert_eq!(resolved("Id").as_deref(), Some("id"));
        assert_eq!(resolved("author"), None);
    }

    #[test]
    fn test_unmapped_field_is_unsupported() {
        let p = Field::new("author").eq("bob");
        let err = to_condition::<post::Entity>(&to_predicate_group(Some(&p))).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedPredicateExpression(_)));
    }

    #[test]
    fn test_negated_match_all_is_unsupported() {
        let p = Predicate::Group(PredicateGroup::match_all()).not();
        let err = to_condition::<post::Entity>(&to_predicate_group(Some(&p))).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedPredicateExpression(_)));
    }

    #[test]
    fn test_negated_nested_match_all_is_unsupported() {
        let nested = PredicateGroup::new(
            GroupOperator::And,
            vec![Predicate::Group(PredicateGroup::match_all())],
        );
        let p = Predicate::Group(nested).not();
        let err = to_condition::<post::Entity>(&to_predicate_group(Some(&p))).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedPredicateExpression(_)));

        let either = PredicateGroup::new(
            GroupOperator::Or,
            vec![
                Field::new("id").eq(1),
                Predicate::Group(PredicateGroup::match_all()),
            ],
        );
        let p = Predicate::Group(either).not();
        let err = to_condition::<post::Entity>(&to_predicate_group(Some(&p))).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedPredicateExpression(_)));
    }

    #[test]
    fn test_nested_match_all_members() {
        let both = PredicateGroup::new(
            GroupOperator::And,
            vec![
                Predicate::Group(PredicateGroup::match_all()),
                Field::new("id").eq(1),
            ],
        );
        let sql = render(filtered_select::<post::Entity>(&both).unwrap());
        assert!(sql.contains(r#""posts"."id" = 1"#));
        assert!(!sql.contains(" AND "));

        let either = PredicateGroup::new(
            GroupOperator::Or,
            vec![
                Field::new("id").eq(1),
                Predicate::Group(PredicateGroup::match_all()),
            ],
        );
        let sql = render(filtered_select::<post::Entity>(&either).unwrap());
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_match_all_adds_no_where_clause() {
        let select = filtered_select::<post::Entity>(&to_predicate_group(None)).unwrap();
        assert!(!render(select).contains("WHERE"));
    }

    #[test]
    fn test_comparisons_render() {
        let p = Field::new("ViewCount")
            .ge(10)
            .and(Field::new("title").like("Rust%"));
        let select = filtered_select::<post::Entity>(&to_predicate_group(Some(&p))).unwrap();
        let sql = render(select);

        assert!(sql.contains(r#""posts"."view_count" >= 10"#));
        assert!(sql.contains(r#""posts"."title" LIKE 'Rust%'"#));
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn test_or_group_renders_or() {
        let p = Field::new("id").eq(1).or(Field::new("id").eq(2));
        let select = filtered_select::<post::Entity>(&to_predicate_group(Some(&p))).unwrap();
        let sql = render(select);

        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_ordering_renders_in_clause_order() {
        let sorting = parse_ordering("CreationTime desc,Id asc").unwrap();
        let select = apply_ordering(post::Entity::find(), &sorting).unwrap();
        let sql = render(select);

        assert!(sql.ends_with(r#"ORDER BY "posts"."creation_time" DESC, "posts"."id" ASC"#));
    }

    #[test]
    fn test_unknown_sort_field_is_invalid_sort() {
        let sorting = parse_ordering("author asc").unwrap();
        let err = apply_ordering(post::Entity::find(), &sorting).unwrap_err();
        assert!(matches!(err, AppError::InvalidSortSpecification(_)));
    }
}
