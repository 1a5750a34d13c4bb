//! Translation of compiled queries into sea-query statements.

use sea_orm::{
    Condition, Value,
    sea_query::{Alias, Asterisk, Expr, Func, LikeExpr, Order, Query, SelectStatement, SimpleExpr},
};

use crate::domain::{
    common::entities::app_errors::CoreError,
    filter::{
        entities::{CompiledQuery, Predicate},
        value_objects::{ScalarValue, SortDirection, SortSpec, ValueMatch},
    },
};

const LIKE_ESCAPE: char = '\\';

pub fn predicate_to_condition(predicate: &Predicate) -> Condition {
    let mut condition = Condition::all();

    for (field, constraints) in predicate.iter() {
        if let Some(matcher) = &constraints.matcher {
            condition = condition.add(match matcher {
                ValueMatch::Contains(needle) => contains_expr(field, needle),
                ValueMatch::Equals(value) => Expr::col(Alias::new(field)).eq(to_value(value)),
            });
        }
        if let Some(min) = &constraints.min {
            condition = condition.add(Expr::col(Alias::new(field)).gte(to_value(min)));
        }
        if let Some(max) = &constraints.max {
            condition = condition.add(Expr::col(Alias::new(field)).lte(to_value(max)));
        }
    }

    condition
}

pub fn sort_order(sort: &SortSpec) -> Result<Order, CoreError> {
    match &sort.direction {
        SortDirection::Asc => Ok(Order::Asc),
        SortDirection::Desc => Ok(Order::Desc),
        SortDirection::Other(raw) => Err(CoreError::InvalidSortDirection(raw.clone())),
    }
}

/// `SELECT * FROM "<table>" WHERE ... ORDER BY ...`
pub fn search_statement(table: &str, query: &CompiledQuery) -> Result<SelectStatement, CoreError> {
    let mut statement = Query::select();
    statement.column(Asterisk).from(Alias::new(table));

    if !query.predicate.is_empty() {
        statement.cond_where(predicate_to_condition(&query.predicate));
    }
    if let Some(sort) = &query.sort {
        statement.order_by(Alias::new(&sort.field), sort_order(sort)?);
    }

    Ok(statement)
}

pub fn find_by_id_statement(table: &str, primary_key: &str, id: i64) -> SelectStatement {
    let mut statement = Query::select();
    statement
        .column(Asterisk)
        .from(Alias::new(table))
        .and_where(Expr::col(Alias::new(primary_key)).eq(id))
        .limit(1);
    statement
}

/// `LOWER(CAST(col AS text)) LIKE '%needle%'`, with LIKE wildcards in the
/// needle taken literally.
fn contains_expr(field: &str, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(
        Expr::col(Alias::new(field)).cast_as(Alias::new("text")),
    ))
    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn to_value(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Text(text) => Value::from(text.clone()),
        ScalarValue::Integer(number) => Value::from(*number),
        ScalarValue::Float(number) => Value::from(*number),
        ScalarValue::Boolean(flag) => Value::from(*flag),
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::{PostgresQueryBuilder, QueryStatementWriter};

    use super::*;
    use crate::domain::{
        filter::{services::FilterCompiler, value_objects::SearchParams},
        record::catalog,
    };

    fn compile(pairs: &[(&str, &str)]) -> CompiledQuery {
        let params: SearchParams = pairs.iter().copied().collect();
        FilterCompiler::with_schema(&catalog::CITIZEN.schema).compile(&params)
    }

    fn to_sql(query: &CompiledQuery) -> String {
        search_statement("Citizen", query)
            .unwrap()
            .to_string(PostgresQueryBuilder)
    }

    #[test]
    fn test_empty_query_selects_everything() {
        let sql = to_sql(&CompiledQuery::default());
        assert_eq!(sql, r#"SELECT * FROM "Citizen""#);
    }

    #[test]
    fn test_range_bounds_are_conjunctive() {
        let sql = to_sql(&compile(&[
            ("birth_dateMin", "2100-01-01"),
            ("birth_dateMax", "2125-12-31"),
        ]));

        assert!(sql.contains(r#""birth_date" >= '2100-01-01'"#), "{sql}");
        assert!(sql.contains(r#""birth_date" <= '2125-12-31'"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_contains_is_case_insensitive_like() {
        let sql = to_sql(&compile(&[("first_name", "Ann")]));

        assert!(sql.contains("LOWER("), "{sql}");
        assert!(sql.contains("LIKE '%ann%'"), "{sql}");
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_equality_and_sort() {
        let sql = to_sql(&compile(&[
            ("status", "alive"),
            ("sortBy", "birth_date"),
            ("order", "desc"),
        ]));

        assert!(sql.contains(r#""status" = 'alive'"#), "{sql}");
        assert!(sql.ends_with(r#"ORDER BY "birth_date" DESC"#), "{sql}");
    }

    #[test]
    fn test_unrecognised_direction_is_rejected_by_the_store() {
        let query = compile(&[("sortBy", "birth_date"), ("order", "sideways")]);

        let error = search_statement("Citizen", &query).unwrap_err();
        assert_eq!(
            error,
            CoreError::InvalidSortDirection("SIDEWAYS".to_string())
        );
    }

    #[test]
    fn test_find_by_id_statement() {
        let statement = find_by_id_statement("Citizen", "id", 7);
        let sql = statement.to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"WHERE "id" = 7"#), "{sql}");
        assert!(sql.contains("LIMIT 1"), "{sql}");
    }
}
