//! Budget error types.

use gridbudget_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::ItemType;
use crate::store::StoreError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The catalog item is already a line of this draft.
    #[error("Item {code} is already in the budget")]
    DuplicateItem {
        /// Catalog item ID.
        item_id: Uuid,
        /// Catalog code, for the operator notice.
        code: String,
    },

    /// Submitted without any line item.
    #[error("Budget must contain at least one item")]
    EmptyBudget,

    /// A required field is missing or invalid.
    #[error("{0}")]
    Validation(String),

    /// An amount is negative or exceeds the supported range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),

    /// No line at this position.
    #[error("Line {0} does not exist")]
    LineNotFound(usize),

    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// The selected catalog item does not exist.
    #[error("{kind} not found: {id}")]
    ItemNotFound {
        /// Catalog kind.
        kind: ItemType,
        /// Catalog item ID.
        id: Uuid,
    },

    /// Persistence failed; the draft is kept.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BudgetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::DuplicateItem { .. } => Self::Conflict(err.to_string()),
            BudgetError::EmptyBudget => Self::BusinessRule(err.to_string()),
            BudgetError::Validation(_) | BudgetError::OutOfRange(_) => {
                Self::Validation(err.to_string())
            }
            BudgetError::LineNotFound(_)
            | BudgetError::NotFound(_)
            | BudgetError::ItemNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            BudgetError::Store(store) => store.into(),
        }
    }
}
