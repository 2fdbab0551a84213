//! Error and result types for accessor operations.
//!
//! The error surface is deliberately small: a backend fault is the only thing
//! that reaches callers as an `Err`. Expected "not found" / "no match" /
//! "nothing changed" conditions are normal return values (`None`, `false`, or
//! an empty vec), never errors.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Errors an accessor operation can surface.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Serialization/deserialization failure when converting a typed document
    /// to or from its stored representation.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during backend construction or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A fault raised by the underlying database driver (connectivity loss,
    /// malformed filter, constraint violation, ...). Propagated unchanged:
    /// no wrapping, no retry, no suppression.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for accessor operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl From<BsonError> for AccessError {
    fn from(err: BsonError) -> Self {
        AccessError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for AccessError {
    fn from(err: SerdeJsonError) -> Self {
        AccessError::Serialization(err.to_string())
    }
}
