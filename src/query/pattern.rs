//! Wildcard pattern matching

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::{DocError, Result};

/// Case-insensitive regular expression searched anywhere in a value's
/// compact JSON rendering
///
/// The searched text is exactly what `serde_json` prints without
/// whitespace, e.g. `{"name":"Random","age":16}`: strings are in double
/// quotes, `null`/`true`/`false` are lowercase, and there is no space after
/// `:` or `,`. Patterns that rely on quoting or spacing must match that form.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern`; fails with `InvalidPattern` on bad syntax
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| DocError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    /// Search (not full-match) the rendered value
    pub fn is_match(&self, value: &Value) -> bool {
        self.regex.is_match(&value.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
