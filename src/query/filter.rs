//! Field filters for `fetch`
//!
//! A [`Filter`] holds a list of [`Condition`]s that must all hold for a
//! record to match. Filters are built either with the builder methods or
//! from name/value parameter pairs, where a name ending in
//! [`CONTAINS_SUFFIX`] asks for a substring match:
//!
//! ```text
//! {"name?contains": "rob", "class": 11}
//!   → Contains { field: "name", needle: "rob" } AND Equals { field: "class", value: 11 }
//! ```

use serde_json::Value;

use crate::storage::Record;

use super::Predicate;

/// Parameter-name suffix that selects a substring match
pub const CONTAINS_SUFFIX: &str = "?contains";

/// A single comparison against one record field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field is present and equal to `value` (numbers compare by value)
    Equals { field: String, value: Value },

    /// Field is a string containing `needle`, ignoring case
    Contains { field: String, needle: String },
}

impl Condition {
    /// Parse one parameter pair
    ///
    /// `"<field>?contains"` with a string value becomes `Contains`; every
    /// other pair, including a `?contains` name with a non-string value,
    /// is an equality test on the literal name.
    pub fn from_param(name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if let (Some(field), Value::String(needle)) = (name.strip_suffix(CONTAINS_SUFFIX), &value) {
            return Condition::Contains {
                field: field.to_string(),
                needle: needle.clone(),
            };
        }
        Condition::Equals { field: name, value }
    }

    pub fn field(&self) -> &str {
        match self {
            Condition::Equals { field, .. } | Condition::Contains { field, .. } => field,
        }
    }

    /// Evaluate against a record; an absent field never matches
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Condition::Equals { field, value } => record
                .get(field)
                .map_or(false, |actual| loosely_equal(actual, value)),
            Condition::Contains { field, needle } => match record.get(field) {
                Some(Value::String(haystack)) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => false,
            },
        }
    }
}

/// Conjunction of conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Empty filter (matches every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs in the `?contains` parameter form
    pub fn from_params<I, K>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            conditions: params
                .into_iter()
                .map(|(name, value)| Condition::from_param(name, value))
                .collect(),
        }
    }

    /// Require `field` to equal `value`
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Require `field` to be a string containing `needle`, ignoring case
    pub fn contains(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.conditions.push(Condition::Contains {
            field: field.into(),
            needle: needle.into(),
        });
        self
    }

    /// Add an already-built condition
    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Predicate for Filter {
    fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from_params(iter)
    }
}

/// JSON equality where numbers compare by value, so `1 == 1.0`
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| loosely_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).map_or(false, |y| loosely_equal(x, y)))
        }
        _ => a == b,
    }
}
