//! Repository error types.

use gridbudget_core::store::StoreError;
use sea_orm::DbErr;
use tracing::error;
use uuid::Uuid;

/// Errors raised by the repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    /// A stored value cannot be mapped back to the domain.
    #[error("Corrupt record {id}: {reason}")]
    Corrupt {
        /// Offending record.
        id: Uuid,
        /// What could not be read.
        reason: String,
    },

    /// The input cannot be stored.
    #[error("Invalid record: {0}")]
    Invalid(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            other => {
                error!(error = %other, "Repository operation failed");
                Self::Backend(other.to_string())
            }
        }
    }
}
