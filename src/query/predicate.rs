//! Record predicates

use crate::storage::Record;

/// Decides whether a record belongs in a query result
///
/// Predicates see record values only, never the key they are stored under.
pub trait Predicate {
    fn matches(&self, record: &Record) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Record) -> bool,
{
    fn matches(&self, record: &Record) -> bool {
        self(record)
    }
}
