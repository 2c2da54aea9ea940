//! Catalog error types.

use gridbudget_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use super::types::ItemType;
use crate::store::StoreError;

/// Catalog-related errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Item not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Catalog kind that was searched.
        kind: &'static str,
        /// Requested identifier.
        id: Uuid,
    },

    /// Unknown catalog kind in a path or payload.
    #[error("Unknown catalog kind: {0}")]
    UnknownKind(String),

    /// Input failed validation.
    #[error("{0}")]
    Validation(String),

    /// Payload kind does not match the addressed collection.
    #[error("Expected a {expected} payload")]
    KindMismatch {
        /// Kind of the addressed collection.
        expected: ItemType,
    },

    /// Store failure.
    #[error(transparent)]
    Store(StoreError),
}

impl CatalogError {
    /// Maps a store error for an item of the given kind.
    #[must_use]
    pub fn from_store(kind: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound { kind, id },
            other => Self::Store(other),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => Self::NotFound(err.to_string()),
            CatalogError::UnknownKind(_)
            | CatalogError::Validation(_)
            | CatalogError::KindMismatch { .. } => Self::Validation(err.to_string()),
            CatalogError::Store(store) => store.into(),
        }
    }
}
