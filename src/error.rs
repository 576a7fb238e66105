//! Error types for docstore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using DocError
pub type Result<T> = std::result::Result<T, DocError>;

/// Unified error type for docstore operations
#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt collection file {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Key '{0}' already exists in the collection")]
    KeyConflict(String),

    #[error("Key '{0}' not found in the collection")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid collection name: {0:?}")]
    InvalidName(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Coarse classification of a [`DocError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Put on a key that already holds a record
    KeyConflict,
    /// Update/increment/decrement on a missing key
    KeyNotFound,
    /// Storage unreadable, unwritable, or holding corrupt content
    Io,
    /// Caller supplied something unusable (bad regex, bad name, ...)
    InvalidInput,
}

impl DocError {
    /// Map this error onto the store's error taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocError::KeyConflict(_) => ErrorKind::KeyConflict,
            DocError::KeyNotFound(_) => ErrorKind::KeyNotFound,
            DocError::Io(_) | DocError::Corrupt { .. } | DocError::Serialization(_) => {
                ErrorKind::Io
            }
            DocError::InvalidPattern(_)
            | DocError::InvalidName(_)
            | DocError::InvalidOperation(_) => ErrorKind::InvalidInput,
        }
    }
}
