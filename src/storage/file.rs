//! JSON Collection File
//!
//! Reads and writes one collection file as a single JSON object.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::config::Config;
use crate::error::{DocError, Result};

use super::Entries;

/// Handle to one collection file on disk
///
/// Holds only the path and format settings; the file itself is opened and
/// closed inside each call.
#[derive(Debug, Clone)]
pub struct JsonFile {
    /// Location of the collection file
    path: PathBuf,
    /// Spaces per indentation level
    indent: usize,
    /// fsync after every save
    sync_writes: bool,
}

impl JsonFile {
    /// Bind a file path using the format settings from `config`
    pub fn new(path: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            path: path.into(),
            indent: config.indent,
            sync_writes: config.sync_writes,
        }
    }

    /// Write an empty mapping if no file exists yet
    ///
    /// Returns `true` when the file was created. An existing file is left
    /// untouched, even if its contents are corrupt.
    pub fn init_if_missing(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.save(&Entries::new())?;
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load the full mapping
    ///
    /// Fails with `Corrupt` if the file is not a JSON object whose values
    /// are all JSON objects.
    pub fn load(&self) -> Result<Entries> {
        let bytes = fs::read(&self.path)?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e))?;
        let entries = match value {
            Value::Object(map) => map,
            other => {
                return Err(self.corrupt(format!(
                    "top-level value is {}, expected an object",
                    json_type_name(&other)
                )))
            }
        };

        if let Some((key, value)) = entries.iter().find(|(_, v)| !v.is_object()) {
            return Err(self.corrupt(format!(
                "record '{}' is {}, expected an object",
                key,
                json_type_name(value)
            )));
        }

        Ok(entries)
    }

    /// Replace the file contents with `entries`
    pub fn save(&self, entries: &Entries) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        let indent = vec![b' '; self.indent];
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        entries
            .serialize(&mut serializer)
            .map_err(|e| DocError::Serialization(e.to_string()))?;

        writer.flush()?;

        if self.sync_writes {
            let file = writer.into_inner().map_err(|e| {
                DocError::Serialization(format!("Failed to flush collection file: {}", e))
            })?;
            file.sync_all()?;
        }

        Ok(())
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: impl ToString) -> DocError {
        DocError::Corrupt {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
