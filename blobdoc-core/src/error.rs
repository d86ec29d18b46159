//! Error types and result types for blob document store operations.
//!
//! Every fallible operation in this crate returns [`DocumentStoreResult<T>`].
//! The variants separate the three failure families a caller usually wants to tell
//! apart: a missing blob, a failing backend, and a payload that cannot be encoded or
//! decoded with the store's [`TypeRegistry`](crate::registry::TypeRegistry).

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a blob document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting values to or from BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization, e.g. the bucket could not be created.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// No blob exists at the given path.
    /// The first argument is the bucket, the second is the blob path.
    #[error("Blob {1} not found in bucket {0}")]
    BlobNotFound(String, String),
    /// A value's concrete type (or a decoded type tag) was never registered.
    #[error("Unregistered type: {0}")]
    UnregisteredType(String),
    /// A registration conflicts with an existing one.
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),
    /// A stored value carries a different type tag than the one requested.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    /// The blob decoded, but its structure is not a valid collection or envelope.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying blob storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl DocumentStoreError {
    /// Returns `true` if this error means the addressed blob does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocumentStoreError::BlobNotFound(..))
    }

    /// Returns `true` if this error comes from encoding or decoding a payload
    /// rather than from the backend.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            DocumentStoreError::Serialization(_)
                | DocumentStoreError::UnregisteredType(_)
                | DocumentStoreError::TypeMismatch { .. }
                | DocumentStoreError::InvalidDocument(_)
        )
    }
}

/// A specialized `Result` type for blob document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
