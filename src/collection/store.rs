//! Collection Store
//!
//! CRUD and query operations against one persisted key → record mapping.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{DocError, Result};
use crate::query::{Filter, Pattern, Predicate};
use crate::storage::{Entries, JsonFile, Record};

use super::numeric::step_numeric_fields;

/// One hit from [`CollectionStore::wildcard_query`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub key: String,
    pub value: Record,
}

/// Handle to one file-backed collection
///
/// ## Concurrency
/// - `lock` is shared by clones of this handle.
/// - Reads (`get`, `all`, `fetch`, `query`, ...) take it shared, so they
///   never observe a file that a mutation is halfway through rewriting.
/// - Mutations take it exclusively, so read-modify-write cycles through
///   the same handle never interleave.
/// - Separate handles on the same file, or other processes, are not
///   coordinated; concurrent writers through them can lose updates.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    /// Backing file
    file: JsonFile,

    /// Shared for reads, exclusive for mutating round trips
    lock: Arc<RwLock<()>>,
}

impl CollectionStore {
    /// Bind a store to `path`, creating `{}` there if no file exists
    ///
    /// Fails with an I/O error if the location cannot be written. An
    /// existing file is not validated until the first operation.
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let file = JsonFile::new(path.as_ref(), config);

        if file.init_if_missing()? {
            info!(path = %file.path().display(), "Created empty collection");
        }

        Ok(Self {
            file,
            lock: Arc::new(RwLock::new(())),
        })
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert `record` under `key`
    ///
    /// Fails with `KeyConflict` if the key exists; the stored record is left
    /// untouched. An empty record is ignored and nothing is written.
    pub fn put(&self, key: &str, record: Record) -> Result<()> {
        if record.is_empty() {
            debug!(key, "Skipping put of empty record");
            return Ok(());
        }

        let _write_guard = self.lock.write();
        let mut entries = self.file.load()?;

        if entries.contains_key(key) {
            return Err(DocError::KeyConflict(key.to_string()));
        }

        entries.insert(key.to_string(), Value::Object(record));
        self.file.save(&entries)?;

        debug!(key, "Put record");
        Ok(())
    }

    /// Remove `key`
    ///
    /// Returns whether the key existed. A missing key is not an error and
    /// leaves the file unwritten.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let _write_guard = self.lock.write();
        let mut entries = self.file.load()?;

        if entries.shift_remove(key).is_none() {
            debug!(key, "Delete of missing key");
            return Ok(false);
        }

        self.file.save(&entries)?;

        debug!(key, "Deleted record");
        Ok(true)
    }

    /// Shallow-merge `partial` into the record at `key`
    ///
    /// Fields in `partial` overwrite fields of the same name; all other
    /// fields are kept. Fails with `KeyNotFound` if the key is absent.
    pub fn update(&self, key: &str, partial: Record) -> Result<()> {
        let _write_guard = self.lock.write();
        let mut entries = self.file.load()?;

        let record = record_mut(&mut entries, key)?;
        record.extend(partial);
        self.file.save(&entries)?;

        debug!(key, "Updated record");
        Ok(())
    }

    /// Add 1 to every numeric field of the record at `key`
    pub fn increment(&self, key: &str) -> Result<()> {
        self.increment_by(key, 1)
    }

    /// Add `amount` to every numeric field of the record at `key`
    ///
    /// Non-numeric fields pass through unchanged. A record with no numeric
    /// fields is left as it is. Fails with `KeyNotFound` if the key is
    /// absent.
    pub fn increment_by(&self, key: &str, amount: i64) -> Result<()> {
        self.step(key, amount)
    }

    /// Subtract 1 from every numeric field of the record at `key`
    pub fn decrement(&self, key: &str) -> Result<()> {
        self.decrement_by(key, 1)
    }

    /// Subtract `amount` from every numeric field of the record at `key`
    pub fn decrement_by(&self, key: &str, amount: i64) -> Result<()> {
        let delta = amount.checked_neg().ok_or_else(|| {
            DocError::InvalidOperation(format!("cannot decrement by {}", amount))
        })?;
        self.step(key, delta)
    }

    /// Replace the collection with an empty mapping
    ///
    /// The file itself stays in place.
    pub fn flush(&self) -> Result<()> {
        let _write_guard = self.lock.write();
        self.file.save(&Entries::new())?;

        info!(path = %self.file.path().display(), "Flushed collection");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get the record at `key`
    ///
    /// Returns:
    /// - `Ok(Some(record))` — key found
    /// - `Ok(None)` — key not found (not an error)
    pub fn get(&self, key: &str) -> Result<Option<Record>> {
        let mut entries = self.load_shared()?;
        Ok(entries.remove(key).and_then(into_record))
    }

    /// Check whether `key` exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.load_shared()?.contains_key(key))
    }

    /// The whole key → record mapping
    pub fn all(&self) -> Result<Entries> {
        self.load_shared()
    }

    /// Records (without keys) matching `filter`, or every record if `None`
    pub fn fetch(&self, filter: Option<&Filter>) -> Result<Vec<Record>> {
        let records = records(self.load_shared()?).map(|(_, record)| record);

        Ok(match filter {
            Some(filter) => records.filter(|r| filter.matches(r)).collect(),
            None => records.collect(),
        })
    }

    /// Up to `limit` records accepted by `predicate`, in file order
    ///
    /// `limit = None` returns every match.
    pub fn query<P>(&self, predicate: &P, limit: Option<usize>) -> Result<Vec<Record>>
    where
        P: Predicate + ?Sized,
    {
        let matches = records(self.load_shared()?)
            .map(|(_, record)| record)
            .filter(|r| predicate.matches(r))
            .take(limit.unwrap_or(usize::MAX))
            .collect();

        Ok(matches)
    }

    /// Entries whose record text matches `pattern` (case-insensitive regex
    /// search over the compact JSON of each record)
    ///
    /// The pattern is compiled before the file is read, so a bad pattern
    /// fails with `InvalidPattern` without touching storage.
    pub fn wildcard_query(&self, pattern: &str) -> Result<Vec<Match>> {
        let pattern = Pattern::new(pattern)?;

        let matches = self
            .load_shared()?
            .into_iter()
            .filter(|(_, value)| pattern.is_match(value))
            .filter_map(|(key, value)| into_record(value).map(|value| Match { key, value }))
            .collect::<Vec<_>>();

        debug!(pattern = pattern.as_str(), hits = matches.len(), "Wildcard query");
        Ok(matches)
    }

    /// Number of keys
    pub fn count(&self) -> Result<usize> {
        Ok(self.load_shared()?.len())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the collection file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Load under the shared lock
    fn load_shared(&self) -> Result<Entries> {
        let _read_guard = self.lock.read();
        self.file.load()
    }

    /// Shared increment/decrement round trip
    fn step(&self, key: &str, delta: i64) -> Result<()> {
        let _write_guard = self.lock.write();
        let mut entries = self.file.load()?;

        let record = record_mut(&mut entries, key)?;
        let stepped = step_numeric_fields(record, delta)?;
        record.extend(stepped);
        self.file.save(&entries)?;

        debug!(key, delta, "Stepped numeric fields");
        Ok(())
    }
}

/// Mutable record at `key`, or `KeyNotFound`
fn record_mut<'a>(entries: &'a mut Entries, key: &str) -> Result<&'a mut Record> {
    entries
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| DocError::KeyNotFound(key.to_string()))
}

fn into_record(value: Value) -> Option<Record> {
    match value {
        Value::Object(record) => Some(record),
        _ => None,
    }
}

/// Iterate `(key, record)` pairs in file order
fn records(entries: Entries) -> impl Iterator<Item = (String, Record)> {
    entries
        .into_iter()
        .filter_map(|(key, value)| into_record(value).map(|record| (key, record)))
}
