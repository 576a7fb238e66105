//! Query Module
//!
//! Record matching used by `fetch`, `query` and `wildcard_query`.
//!
//! ## Pieces
//! - [`Filter`]: an AND of [`Condition`]s (field equality, substring match)
//! - [`Predicate`]: anything that can accept or reject a record, including
//!   plain closures `Fn(&Record) -> bool`
//! - [`Pattern`]: a case-insensitive regex searched over a record's JSON text

mod filter;
mod pattern;
mod predicate;

pub use filter::{Condition, Filter, CONTAINS_SUFFIX};
pub use pattern::Pattern;
pub use predicate::Predicate;
