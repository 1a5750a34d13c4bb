use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use thiserror::Error;

/// Reserved key naming the sort field.
pub const SORT_BY_KEY: &str = "sortBy";
/// Reserved key carrying the sort direction.
pub const ORDER_KEY: &str = "order";

pub const MIN_SUFFIX: &str = "Min";
pub const MAX_SUFFIX: &str = "Max";

/// A single incoming filter value.
///
/// Decoded query strings only ever produce `Text`; the typed variants are for
/// callers that already hold typed data.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ParamValue {
    /// Absent and empty-string values mean "no filter".
    pub fn is_blank(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Null)
    }
}

/// Flat key/value mapping a search request is compiled from.
///
/// Backed by an ordered map so iteration never depends on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams(BTreeMap<String, ParamValue>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Typed operand of a compiled constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Text(text) => f.write_str(text),
            ScalarValue::Integer(value) => write!(f, "{value}"),
            ScalarValue::Float(value) => write!(f, "{value}"),
            ScalarValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// How a plain (non-range) key constrains its field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum ValueMatch {
    /// Case-insensitive substring match.
    Contains(String),
    Equals(ScalarValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintKind {
    RangeMin,
    RangeMax,
    Contains,
    Equals,
}

/// Flattened view of one constraint, as handed to a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldConstraint {
    pub kind: ConstraintKind,
    pub field: String,
    pub value: ScalarValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
    /// Anything else, upper-cased and left for the store to judge.
    Other(String),
}

impl SortDirection {
    pub fn from_order(order: &str) -> Self {
        let upper = order.to_uppercase();
        match upper.as_str() {
            "ASC" => SortDirection::Asc,
            "DESC" => SortDirection::Desc,
            _ => SortDirection::Other(upper),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
            SortDirection::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum RejectReason {
    #[error("value is not a number")]
    NotANumber,

    #[error("value is not an integer")]
    NotAnInteger,

    #[error("value is not a boolean")]
    NotABoolean,

    #[error("value is not an ISO-8601 date")]
    NotADate,

    #[error("value is not one of the field's allowed values")]
    NotAnAllowedValue,

    #[error("range key has no field name")]
    MissingFieldName,

    #[error("field is not declared on this entity")]
    UnknownField,

    #[error("field cannot be filtered or sorted on")]
    ProtectedField,
}

/// A parameter the compiler skipped instead of turning into a constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedParam {
    pub key: String,
    pub value: String,
    pub reason: RejectReason,
}
