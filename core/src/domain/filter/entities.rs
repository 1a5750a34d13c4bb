use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::filter::value_objects::{
    ConstraintKind, FieldConstraint, RejectedParam, ScalarValue, SortSpec, ValueMatch,
};

/// Every constraint placed on a single field. All parts must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldPredicate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<ValueMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<ScalarValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<ScalarValue>,
}

impl FieldPredicate {
    pub fn is_empty(&self) -> bool {
        self.matcher.is_none() && self.min.is_none() && self.max.is_none()
    }
}

/// Conjunction of per-field constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Predicate {
    fields: BTreeMap<String, FieldPredicate>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of constrained fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldPredicate> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldPredicate)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn set_matcher(&mut self, field: &str, matcher: ValueMatch) {
        self.entry(field).matcher = Some(matcher);
    }

    pub fn set_min(&mut self, field: &str, value: ScalarValue) {
        self.entry(field).min = Some(value);
    }

    pub fn set_max(&mut self, field: &str, value: ScalarValue) {
        self.entry(field).max = Some(value);
    }

    fn entry(&mut self, field: &str) -> &mut FieldPredicate {
        self.fields.entry(field.to_string()).or_default()
    }

    /// Flattens the predicate into one entry per constraint, ordered by field
    /// name then matcher, lower bound, upper bound.
    pub fn constraints(&self) -> Vec<FieldConstraint> {
        let mut constraints = Vec::new();

        for (field, predicate) in &self.fields {
            if let Some(matcher) = &predicate.matcher {
                let (kind, value) = match matcher {
                    ValueMatch::Contains(needle) => {
                        (ConstraintKind::Contains, ScalarValue::Text(needle.clone()))
                    }
                    ValueMatch::Equals(value) => (ConstraintKind::Equals, value.clone()),
                };
                constraints.push(FieldConstraint {
                    kind,
                    field: field.clone(),
                    value,
                });
            }
            if let Some(min) = &predicate.min {
                constraints.push(FieldConstraint {
                    kind: ConstraintKind::RangeMin,
                    field: field.clone(),
                    value: min.clone(),
                });
            }
            if let Some(max) = &predicate.max {
                constraints.push(FieldConstraint {
                    kind: ConstraintKind::RangeMax,
                    field: field.clone(),
                    value: max.clone(),
                });
            }
        }

        constraints
    }
}

/// Output of the filter compiler: what to match, how to order it, and which
/// parameters were dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub predicate: Predicate,
    pub sort: Option<SortSpec>,
    pub rejected: Vec<RejectedParam>,
}

impl CompiledQuery {
    /// True when the query matches every record in unspecified order.
    pub fn is_unconstrained(&self) -> bool {
        self.predicate.is_empty() && self.sort.is_none()
    }
}
