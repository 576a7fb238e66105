//! # docstore
//!
//! A minimal document store:
//! - One named collection per JSON file under a root directory
//! - Each collection maps string keys to JSON object records
//! - Every operation is a whole-file round trip (load, apply, save)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Database                             │
//! │                 (root directory handle)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ collection("users")
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   CollectionStore                           │
//! │        (CRUD, increment/decrement, fetch/query)             │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    JsonFile     │                │      Query      │
//!   │ (<root>/x.json) │                │ (Filter/Pattern)│
//!   └─────────────────┘                └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docstore::Database;
//! use serde_json::json;
//!
//! let db = Database::named("Storage")?;
//! let users = db.collection("users")?;
//!
//! let record = json!({"name": "Robo", "age": 16});
//! users.put("u1", record.as_object().cloned().unwrap_or_default())?;
//! users.increment("u1")?;
//! assert_eq!(users.get("u1")?.unwrap()["age"], json!(17));
//! # Ok::<(), docstore::DocError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod storage;
pub mod query;
pub mod collection;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DocError, ErrorKind, Result};
pub use config::Config;
pub use collection::{CollectionStore, Match};
pub use database::Database;
pub use query::{Condition, Filter, Pattern, Predicate};
pub use storage::{Entries, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of docstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
