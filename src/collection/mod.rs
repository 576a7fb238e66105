//! Collection Module
//!
//! The per-collection storage engine.
//!
//! ## Responsibilities
//! - CRUD on one key → record mapping backed by one JSON file
//! - Full-scan queries (field filters, closures, regex search)
//! - Whole-record numeric increment/decrement
//!
//! ## Round Trips
//! Every call loads the whole file; mutating calls write the whole file
//! back before returning. Nothing is cached between calls, so each call
//! observes the latest persisted state.

mod numeric;
mod store;

pub use store::{CollectionStore, Match};
