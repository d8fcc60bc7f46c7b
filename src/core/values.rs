//! Resolution of bound source records into aligned numeric sequences.
//!
//! Records are `serde_json::Value`s addressed through dotted [`BindingPath`]s.
//! Anything that cannot be read as a number resolves to `NaN`; downstream
//! stages treat `NaN` as "no segment" instead of an error.

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::primitives::{parse_datetime_str, parse_decimal_str};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathSegment {
    Field(String),
    Index(usize),
}

/// Dotted accessor into a JSON record, e.g. `"sales.q1"` or `"points.0.y"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl BindingPath {
    pub fn parse(raw: &str) -> ChartResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChartError::InvalidData(
                "binding path must not be empty".to_owned(),
            ));
        }

        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            if part.is_empty() {
                return Err(ChartError::InvalidData(format!(
                    "binding path `{trimmed}` contains an empty component"
                )));
            }
            segments.push(match part.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Field(part.to_owned()),
            });
        }

        Ok(Self {
            raw: trimmed.to_owned(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Walks the path through `record`. Numeric components also match object
    /// keys spelled as digits.
    #[must_use]
    pub fn resolve<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        let mut current = record;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Field(name), Value::Object(map)) => map.get(name)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
                (PathSegment::Index(index), Value::Object(map)) => {
                    map.get(&index.to_string())?
                }
                _ => return None,
            };
        }
        Some(current)
    }
}

impl FromStr for BindingPath {
    type Err = ChartError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for BindingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for BindingPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for BindingPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Reads one JSON value as a number.
#[must_use]
pub fn numeric_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(raw) => parse_decimal_str(raw).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Resolves one y sequence, index-aligned with `records`.
#[must_use]
pub fn resolve_y_values(records: &[Value], path: &BindingPath) -> Vec<f64> {
    records
        .iter()
        .map(|record| path.resolve(record).map_or(f64::NAN, numeric_value))
        .collect()
}

/// Resolves one aligned sequence per path for multi-value series.
#[must_use]
pub fn resolve_multi_y_values(records: &[Value], paths: &[BindingPath]) -> Vec<Vec<f64>> {
    paths
        .iter()
        .map(|path| resolve_y_values(records, path))
        .collect()
}

/// Interpretation of the x binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XValueType {
    #[default]
    Double,
    /// RFC 3339 strings, stored as unix seconds.
    DateTime,
    /// Free-form labels, stored as first-appearance category indices.
    Category,
}

/// Resolved x values plus the category table when labels were bound.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XValues {
    pub value_type: XValueType,
    pub values: Vec<f64>,
    pub categories: IndexSet<String>,
}

impl XValues {
    /// Record indices used as x (no x binding).
    #[must_use]
    pub fn indexed(len: usize) -> Self {
        Self {
            value_type: XValueType::Double,
            values: (0..len).map(|i| i as f64).collect(),
            categories: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn is_category(&self) -> bool {
        self.value_type == XValueType::Category
    }

    /// Label for a category index, if this is a category sequence.
    #[must_use]
    pub fn category_label(&self, x: f64) -> Option<&str> {
        if !self.is_category() || !x.is_finite() || x < 0.0 {
            return None;
        }
        self.categories.get_index(x as usize).map(String::as_str)
    }
}

fn detect_x_value_type(value: &Value) -> XValueType {
    match value {
        Value::String(raw) if parse_datetime_str(raw).is_some() => XValueType::DateTime,
        Value::String(raw) if parse_decimal_str(raw).is_some() => XValueType::Double,
        Value::String(_) => XValueType::Category,
        _ => XValueType::Double,
    }
}

/// Resolves x values for `records`.
///
/// The value type is decided by the first non-null bound value. Missing x
/// values fall back to the record index for numeric/date data and to the
/// label `""` for category data.
#[must_use]
pub fn resolve_x_values(records: &[Value], path: Option<&BindingPath>) -> XValues {
    let Some(path) = path else {
        return XValues::indexed(records.len());
    };

    let value_type = records
        .iter()
        .filter_map(|record| path.resolve(record))
        .find(|value| !value.is_null())
        .map_or(XValueType::Double, detect_x_value_type);

    let mut categories = IndexSet::new();
    let values = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let bound = path.resolve(record);
            match value_type {
                XValueType::Double => bound
                    .map(numeric_value)
                    .filter(|v| !v.is_nan())
                    .unwrap_or(index as f64),
                XValueType::DateTime => bound
                    .and_then(Value::as_str)
                    .and_then(parse_datetime_str)
                    .unwrap_or(index as f64),
                XValueType::Category => {
                    let label = match bound {
                        Some(Value::String(raw)) => raw.clone(),
                        Some(Value::Null) | None => String::new(),
                        Some(other) => other.to_string(),
                    };
                    let (slot, _) = categories.insert_full(label);
                    slot as f64
                }
            }
        })
        .collect();

    XValues {
        value_type,
        values,
        categories,
    }
}

/// Members of one distinct x category, ordered by descending y.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    /// Shared x value of the members.
    pub x: f64,
    /// Record indices; descending by y, ties in original index order, `NaN` last.
    pub members: Vec<usize>,
}

impl CategoryBucket {
    /// First member with a defined y, i.e. the largest value of the bucket.
    #[must_use]
    pub fn representative(&self, y: &[f64]) -> Option<usize> {
        self.members
            .iter()
            .copied()
            .find(|&index| y.get(index).is_some_and(|v| !v.is_nan()))
    }
}

/// Groups indices by distinct x value in first-appearance order.
#[must_use]
pub fn group_by_category(x: &[f64], y: &[f64]) -> Vec<CategoryBucket> {
    let mut groups: IndexMap<OrderedFloat<f64>, Vec<usize>> = IndexMap::new();
    for (index, value) in x.iter().enumerate() {
        groups.entry(OrderedFloat(*value)).or_default().push(index);
    }

    groups
        .into_iter()
        .map(|(key, mut members)| {
            // Stable sort keeps original order between equal values.
            members.sort_by_key(|&index| {
                let value = y.get(index).copied().unwrap_or(f64::NAN);
                let key = if value.is_nan() {
                    f64::NEG_INFINITY
                } else {
                    value
                };
                std::cmp::Reverse(OrderedFloat(key))
            });
            CategoryBucket {
                x: key.into_inner(),
                members,
            }
        })
        .collect()
}

#[must_use]
pub fn distinct_category_count(x: &[f64]) -> usize {
    x.iter()
        .map(|value| OrderedFloat(*value))
        .collect::<IndexSet<_>>()
        .len()
}
