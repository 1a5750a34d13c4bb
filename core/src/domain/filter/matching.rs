//! In-memory evaluation of compiled queries against JSON records.
//!
//! Mirrors what a SQL store does with the same predicate: a missing or null
//! value never satisfies a constraint, substring matches ignore case, numeric
//! operands compare numerically and text operands compare lexically.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::domain::filter::{
    entities::{FieldPredicate, Predicate},
    value_objects::{ScalarValue, SortDirection, SortSpec, ValueMatch},
};

impl Predicate {
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        self.iter().all(|(field, predicate)| {
            predicate.matches(record.get(field).unwrap_or(&Value::Null))
        })
    }
}

impl FieldPredicate {
    pub fn matches(&self, stored: &Value) -> bool {
        if stored.is_null() {
            return self.is_empty();
        }

        let matched = match &self.matcher {
            Some(ValueMatch::Contains(needle)) => text_of(stored)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Some(ValueMatch::Equals(expected)) => {
                compare(stored, expected) == Some(Ordering::Equal)
            }
            None => true,
        };

        matched
            && self.min.as_ref().is_none_or(|min| {
                matches!(
                    compare(stored, min),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            })
            && self.max.as_ref().is_none_or(|max| {
                matches!(compare(stored, max), Some(Ordering::Less | Ordering::Equal))
            })
    }
}

/// Orders two records by the sort field. Records without the field sort
/// first in ascending order.
///
/// Only `Asc` and `Desc` are meaningful here; callers reject other
/// directions before sorting.
pub fn compare_records(
    left: &Map<String, Value>,
    right: &Map<String, Value>,
    sort: &SortSpec,
) -> Ordering {
    let ordering = compare_values(
        left.get(&sort.field).unwrap_or(&Value::Null),
        right.get(&sort.field).unwrap_or(&Value::Null),
    );

    match sort.direction {
        SortDirection::Desc => ordering.reverse(),
        _ => ordering,
    }
}

fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => rank(left).cmp(&rank(right)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Compares a stored value with a constraint operand, or `None` when the two
/// cannot be compared.
fn compare(stored: &Value, operand: &ScalarValue) -> Option<Ordering> {
    match operand {
        ScalarValue::Integer(expected) => {
            numeric_of(stored).and_then(|actual| actual.partial_cmp(&(*expected as f64)))
        }
        ScalarValue::Float(expected) => {
            numeric_of(stored).and_then(|actual| actual.partial_cmp(expected))
        }
        ScalarValue::Boolean(expected) => stored.as_bool().map(|actual| actual.cmp(expected)),
        ScalarValue::Text(expected) => Some(text_of(stored).as_str().cmp(expected.as_str())),
    }
}

fn numeric_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{
        schema::{EntitySchema, FieldDef},
        services::FilterCompiler,
        value_objects::SearchParams,
    };
    use serde_json::json;

    const PLANET: EntitySchema = EntitySchema::new(&[
        FieldDef::text("name"),
        FieldDef::integer("current_population"),
        FieldDef::float("growth_rate"),
    ]);

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    fn compile(pairs: &[(&str, &str)]) -> Predicate {
        let params: SearchParams = pairs.iter().copied().collect();
        FilterCompiler::with_schema(&PLANET).compile(&params).predicate
    }

    #[test]
    fn test_contains_ignores_case() {
        let predicate = compile(&[("name", "ann")]);

        assert!(predicate.matches(&record(json!({ "name": "Anna" }))));
        assert!(predicate.matches(&record(json!({ "name": "Susanna" }))));
        assert!(!predicate.matches(&record(json!({ "name": "Bob" }))));
    }

    #[test]
    fn test_missing_value_fails_constraints() {
        let predicate = compile(&[("name", "ann")]);
        assert!(!predicate.matches(&record(json!({ "name": null }))));
        assert!(!predicate.matches(&record(json!({ "id": 4 }))));
    }

    #[test]
    fn test_numeric_range_is_inclusive() {
        let predicate = compile(&[("growth_rateMin", "1"), ("growth_rateMax", "2.5")]);

        assert!(predicate.matches(&record(json!({ "growth_rate": 1 }))));
        assert!(predicate.matches(&record(json!({ "growth_rate": 2.5 }))));
        assert!(!predicate.matches(&record(json!({ "growth_rate": 0.9 }))));
        assert!(!predicate.matches(&record(json!({ "growth_rate": 3 }))));
    }

    #[test]
    fn test_numeric_range_accepts_numeric_strings() {
        let predicate = compile(&[("current_populationMin", "100")]);
        assert!(predicate.matches(&record(json!({ "current_population": "250" }))));
        assert!(!predicate.matches(&record(json!({ "current_population": "many" }))));
    }

    #[test]
    fn test_lexical_range_on_iso_dates() {
        let params: SearchParams = [("birth_dateMin", "2100-01-01"), ("birth_dateMax", "2125-12-31")]
            .into_iter()
            .collect();
        let predicate = FilterCompiler::new().compile(&params).predicate;

        assert!(predicate.matches(&record(json!({ "birth_date": "2110-06-15" }))));
        assert!(!predicate.matches(&record(json!({ "birth_date": "2099-12-31" }))));
        assert!(!predicate.matches(&record(json!({ "birth_date": "2126-01-01" }))));
    }

    #[test]
    fn test_equality_on_integers() {
        let predicate = compile(&[("current_population", "42")]);
        assert!(predicate.matches(&record(json!({ "current_population": 42 }))));
        assert!(!predicate.matches(&record(json!({ "current_population": 43 }))));
    }

    #[test]
    fn test_empty_predicate_matches_anything() {
        let predicate = Predicate::new();
        assert!(predicate.matches(&record(json!({}))));
        assert!(predicate.matches(&record(json!({ "name": null }))));
    }

    #[test]
    fn test_compare_records_by_direction() {
        let older = record(json!({ "id": 1, "birth_date": "2100-01-01" }));
        let younger = record(json!({ "id": 2, "birth_date": "2120-01-01" }));
        let unknown = record(json!({ "id": 3 }));

        let ascending = SortSpec::new("birth_date", SortDirection::Asc);
        assert_eq!(compare_records(&older, &younger, &ascending), Ordering::Less);
        assert_eq!(compare_records(&unknown, &older, &ascending), Ordering::Less);

        let descending = SortSpec::new("birth_date", SortDirection::Desc);
        assert_eq!(compare_records(&older, &younger, &descending), Ordering::Greater);
    }
}
