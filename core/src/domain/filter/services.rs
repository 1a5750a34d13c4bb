use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::domain::filter::{
    entities::{CompiledQuery, Predicate},
    schema::{EntitySchema, FieldKind},
    value_objects::{
        MAX_SUFFIX, MIN_SUFFIX, ORDER_KEY, ParamValue, RejectReason, RejectedParam, SORT_BY_KEY,
        ScalarValue, SearchParams, SortDirection, SortSpec, ValueMatch,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

/// Translates flat search parameters into a predicate and an optional sort.
///
/// Pure and stateless: safe to share between request handlers. Compilation
/// never fails; parameters that cannot be honoured are reported in
/// [`CompiledQuery::rejected`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCompiler<'s> {
    schema: Option<&'s EntitySchema>,
    strict_fields: bool,
}

impl<'s> FilterCompiler<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: &'s EntitySchema) -> Self {
        Self {
            schema: Some(schema),
            strict_fields: false,
        }
    }

    /// Drop fields the schema does not declare. No effect without a schema.
    pub fn strict(mut self, strict_fields: bool) -> Self {
        self.strict_fields = strict_fields;
        self
    }

    pub fn compile(&self, params: &SearchParams) -> CompiledQuery {
        let mut predicate = Predicate::new();
        let mut rejected = Vec::new();

        for (key, value) in params.iter() {
            if key == SORT_BY_KEY || key == ORDER_KEY || value.is_blank() {
                continue;
            }

            let outcome = match split_range_key(key) {
                Some((field, bound)) => self.compile_range(field, bound, value).map(|scalar| {
                    match bound {
                        Bound::Min => predicate.set_min(field, scalar),
                        Bound::Max => predicate.set_max(field, scalar),
                    }
                }),
                None => self
                    .compile_match(key, value)
                    .map(|matcher| predicate.set_matcher(key, matcher)),
            };

            if let Err(reason) = outcome {
                warn!(key, value = %value, %reason, "skipping search parameter");
                rejected.push(RejectedParam {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason,
                });
            }
        }

        let sort = self.compile_sort(params, &mut rejected);

        debug!(
            fields = predicate.len(),
            sorted = sort.is_some(),
            rejected = rejected.len(),
            "compiled search parameters"
        );

        CompiledQuery {
            predicate,
            sort,
            rejected,
        }
    }

    fn compile_sort(
        &self,
        params: &SearchParams,
        rejected: &mut Vec<RejectedParam>,
    ) -> Option<SortSpec> {
        let sort_by = params.get(SORT_BY_KEY).filter(|value| !value.is_blank())?;
        let field = sort_by.to_string();

        if let Err(reason) = self.check_field(&field) {
            warn!(field, %reason, "ignoring sort parameter");
            rejected.push(RejectedParam {
                key: SORT_BY_KEY.to_string(),
                value: field,
                reason,
            });
            return None;
        }

        let direction = params
            .get(ORDER_KEY)
            .filter(|value| !value.is_blank())
            .map(|order| SortDirection::from_order(&order.to_string()))
            .unwrap_or_default();

        Some(SortSpec::new(field, direction))
    }

    fn compile_range(
        &self,
        field: &str,
        bound: Bound,
        value: &ParamValue,
    ) -> Result<ScalarValue, RejectReason> {
        if field.is_empty() {
            return Err(RejectReason::MissingFieldName);
        }
        self.check_field(field)?;

        let kind = self.kind_of(field);
        let scalar = match value {
            ParamValue::Text(text) => match kind {
                Some(kind) if kind.is_numeric() => ScalarValue::Float(parse_number(text)?),
                Some(FieldKind::Date) => ScalarValue::Text(parse_date(text)?),
                _ => ScalarValue::Text(text.clone()),
            },
            ParamValue::Integer(number) => ScalarValue::Integer(*number),
            ParamValue::Float(number) => ScalarValue::Float(finite(*number)?),
            ParamValue::Boolean(flag) => ScalarValue::Boolean(*flag),
            ParamValue::Null => unreachable!("blank values are skipped before compiling"),
        };

        debug!(field, ?bound, value = %scalar, "range constraint");
        Ok(scalar)
    }

    fn compile_match(&self, field: &str, value: &ParamValue) -> Result<ValueMatch, RejectReason> {
        self.check_field(field)?;

        let matcher = match value {
            ParamValue::Text(text) => match self.kind_of(field) {
                Some(FieldKind::Integer) => text
                    .trim()
                    .parse::<i64>()
                    .map(|number| ValueMatch::Equals(ScalarValue::Integer(number)))
                    .map_err(|_| RejectReason::NotAnInteger)?,
                Some(FieldKind::Float) => {
                    ValueMatch::Equals(ScalarValue::Float(parse_number(text)?))
                }
                Some(FieldKind::Boolean) => {
                    ValueMatch::Equals(ScalarValue::Boolean(parse_boolean(text)?))
                }
                Some(FieldKind::Enumerated(variants)) => {
                    if !variants.contains(&text.as_str()) {
                        return Err(RejectReason::NotAnAllowedValue);
                    }
                    ValueMatch::Equals(ScalarValue::Text(text.clone()))
                }
                Some(FieldKind::Text) | Some(FieldKind::Date) | None => {
                    ValueMatch::Contains(text.clone())
                }
            },
            ParamValue::Integer(number) => ValueMatch::Equals(ScalarValue::Integer(*number)),
            ParamValue::Float(number) => {
                ValueMatch::Equals(ScalarValue::Float(finite(*number)?))
            }
            ParamValue::Boolean(flag) => ValueMatch::Equals(ScalarValue::Boolean(*flag)),
            ParamValue::Null => unreachable!("blank values are skipped before compiling"),
        };

        Ok(matcher)
    }

    fn check_field(&self, field: &str) -> Result<(), RejectReason> {
        let Some(schema) = self.schema else {
            return Ok(());
        };

        if schema.is_protected(field) {
            return Err(RejectReason::ProtectedField);
        }
        if self.strict_fields && schema.field(field).is_none() {
            return Err(RejectReason::UnknownField);
        }
        Ok(())
    }

    fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.schema.and_then(|schema| schema.kind_of(field))
    }
}

/// Splits `fieldMin` / `fieldMax` into the base field and the bound.
fn split_range_key(key: &str) -> Option<(&str, Bound)> {
    if let Some(field) = key.strip_suffix(MIN_SUFFIX) {
        return Some((field, Bound::Min));
    }
    key.strip_suffix(MAX_SUFFIX).map(|field| (field, Bound::Max))
}

fn parse_number(text: &str) -> Result<f64, RejectReason> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| RejectReason::NotANumber)
        .and_then(finite)
}

fn finite(number: f64) -> Result<f64, RejectReason> {
    if number.is_finite() {
        Ok(number)
    } else {
        Err(RejectReason::NotANumber)
    }
}

fn parse_boolean(text: &str) -> Result<bool, RejectReason> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(RejectReason::NotABoolean),
    }
}

/// Parses an ISO-8601 date or datetime and returns it zero-padded, so that
/// bounds order chronologically when compared as text. Offset datetimes are
/// normalised to UTC.
fn parse_date(text: &str) -> Result<String, RejectReason> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    DateTime::parse_from_rfc3339(text)
        .map(|datetime| {
            datetime
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::AutoSi, true)
        })
        .map_err(|_| RejectReason::NotADate)
}
