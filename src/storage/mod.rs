//! Storage Module
//!
//! Whole-file JSON persistence for a single collection.
//!
//! ## Responsibilities
//! - Create an empty collection file on first access
//! - Load the entire key → record mapping on every call
//! - Rewrite the entire mapping after every mutation
//!
//! ## File Format
//! ```text
//! {
//!   "6867879163": {
//!     "name": "Random",
//!     "username": "@random"
//!   },
//!   "6867879165": {
//!     "name": "Robo",
//!     "age": 16
//!   }
//! }
//! ```
//!
//! A single UTF-8 JSON object, pretty-printed (2-space indent by default).
//! Key order on disk follows insertion order.

mod file;

pub use file::JsonFile;

use serde_json::{Map, Value};

/// A stored document: field name → JSON value
pub type Record = Map<String, Value>;

/// A full collection: key → record (each value is always a JSON object)
pub type Entries = Map<String, Value>;
