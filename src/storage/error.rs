//! Storage layer error types
//!
//! These are the failures the Git/file collaborator reports. Callers above the
//! storage layer propagate them unchanged; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::types::InvalidNameError;

/// the main error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// error from the underlying Git library
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// I/O error (filesystem level)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// invalid branch or file name
    #[error("invalid name: {0}")]
    InvalidName(#[from] InvalidNameError),

    /// the specified branch/ref was not found
    #[error("ref not found: {0}")]
    RefNotFound(String),

    /// the commit was not found
    #[error("commit not found: {0}")]
    CommitNotFound(String),

    /// repo is not initialized
    #[error("repository not initialized: {0}")]
    NotInitialized(PathBuf),

    /// repo is empty (no commits)
    #[error("repository is empty: no commits found")]
    EmptyRepository,

    /// a file in the tree could not be decoded
    #[error("corrupted data at {path}: {reason}")]
    CorruptedData { path: PathBuf, reason: String },

    /// the tree entry has an unexpected type
    #[error("unexpected entry type at {path}: expected {expected}, found {found}")]
    UnexpectedEntryType {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// internal error that shouldn't happen
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// check if this is a git operation failure (checkout, commit, refs)
    pub fn is_git(&self) -> bool {
        matches!(
            self,
            StorageError::Git(_)
                | StorageError::RefNotFound(_)
                | StorageError::CommitNotFound(_)
                | StorageError::NotInitialized(_)
                | StorageError::EmptyRepository
        )
    }

    /// check if this is a filesystem or file-content failure
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StorageError::Io(_)
                | StorageError::Serialization(_)
                | StorageError::CorruptedData { .. }
                | StorageError::UnexpectedEntryType { .. }
        )
    }
}

/// result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = StorageError::RefNotFound("feature".to_string());
        assert!(missing.is_git());
        assert!(!missing.is_io());

        let io = StorageError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert!(io.is_io());
        assert!(!io.is_git());

        let corrupt = StorageError::CorruptedData {
            path: "pages/Home.json".into(),
            reason: "eof".to_string(),
        };
        assert!(corrupt.is_io());
    }
}
