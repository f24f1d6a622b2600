//! # Store Error Types
//!
//! Error types for collection file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use medipos_core::CoreError;

/// Persistence layer errors.
///
/// These wrap file and serialization errors, and carry core business
/// errors through the checkout path unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Collection file could not be read or written.
    ///
    /// ## When This Occurs
    /// - Store directory is missing or unwritable
    /// - Disk full
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Collection file content is not valid JSON for its type.
    ///
    /// ## When This Occurs
    /// - File was hand-edited
    /// - File was written by an incompatible version
    #[error("Collection file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Record not found in its collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
