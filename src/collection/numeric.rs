//! Numeric field stepping for increment/decrement

use serde_json::{Number, Value};

use crate::error::{DocError, Result};
use crate::storage::Record;

/// Add `delta` to every numeric field of `record`
///
/// Non-numeric fields are copied unchanged. Booleans count as non-numeric:
/// a JSON `true` is not the number 1, so it is never stepped to `2`.
/// Nested values are not descended into. Integers stay integers until they
/// overflow, then widen to floating point.
pub(crate) fn step_numeric_fields(record: &Record, delta: i64) -> Result<Record> {
    record
        .iter()
        .map(|(field, value)| -> Result<(String, Value)> {
            let stepped = match value {
                Value::Number(n) => Value::Number(step(n, delta).ok_or_else(|| {
                    DocError::InvalidOperation(format!(
                        "field '{}' ({}) cannot be stepped by {}",
                        field, n, delta
                    ))
                })?),
                other => other.clone(),
            };
            Ok((field.clone(), stepped))
        })
        .collect()
}

fn step(n: &Number, delta: i64) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        if let Some(sum) = i.checked_add(delta) {
            return Some(Number::from(sum));
        }
    } else if let Some(u) = n.as_u64() {
        let sum = if delta >= 0 {
            u.checked_add(delta.unsigned_abs())
        } else {
            u.checked_sub(delta.unsigned_abs())
        };
        if let Some(sum) = sum {
            return Some(Number::from(sum));
        }
    }

    Number::from_f64(n.as_f64()? + delta as f64)
}
