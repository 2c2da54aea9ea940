//! Persistence seams.
//!
//! The traits here are implemented by the db crate with SeaORM and by
//! [`memory::MemoryStore`] for tests and local runs. They are object safe so
//! the API can hold them as `Arc<dyn ...>`.

pub mod memory;

use async_trait::async_trait;
use gridbudget_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::budget::{Budget, NewBudget};
use crate::catalog::{CatalogItem, CatalogItemInput, Hardware, HardwareInput, ItemType};
use crate::options::{DropdownOption, NewDropdownOption, OptionCategory};

pub use memory::MemoryStore;

/// Errors raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this ID.
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    /// The backing store failed.
    #[error("Store failure: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Backend(msg) => Self::Database(msg),
        }
    }
}

/// Storage for the five budgetable catalog kinds.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists items of one kind, oldest first.
    async fn list(&self, kind: ItemType) -> Result<Vec<CatalogItem>, StoreError>;

    /// Finds one item of the given kind.
    async fn find(&self, kind: ItemType, id: Uuid) -> Result<CatalogItem, StoreError>;

    /// Stores a new item and assigns its ID.
    async fn create(&self, input: CatalogItemInput) -> Result<CatalogItem, StoreError>;

    /// Replaces an existing item of the input's kind.
    async fn update(&self, id: Uuid, input: CatalogItemInput) -> Result<CatalogItem, StoreError>;

    /// Deletes an item.
    async fn delete(&self, kind: ItemType, id: Uuid) -> Result<(), StoreError>;
}

/// Storage for hardware records.
#[async_trait]
pub trait HardwareStore: Send + Sync {
    /// Lists hardware, oldest first.
    async fn list(&self) -> Result<Vec<Hardware>, StoreError>;

    /// Finds one record.
    async fn find(&self, id: Uuid) -> Result<Hardware, StoreError>;

    /// Stores a new record.
    async fn create(&self, input: HardwareInput) -> Result<Hardware, StoreError>;

    /// Replaces a record.
    async fn update(&self, id: Uuid, input: HardwareInput) -> Result<Hardware, StoreError>;

    /// Deletes a record.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Storage for dropdown options.
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Options of one category, in insertion order.
    async fn list(&self, category: OptionCategory) -> Result<Vec<DropdownOption>, StoreError>;

    /// Stores a new option.
    async fn create(&self, input: NewDropdownOption) -> Result<DropdownOption, StoreError>;

    /// Deletes an option.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Storage for finalized budgets.
///
/// Implementations assign `id` and `created_at` and rebuild totals from the
/// stored items and costs whenever a budget is read.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Persists a validated budget.
    async fn create(&self, budget: NewBudget) -> Result<Budget, StoreError>;

    /// Fetches a budget by ID.
    async fn get(&self, id: Uuid) -> Result<Budget, StoreError>;

    /// Lists budgets, newest first.
    async fn list(&self) -> Result<Vec<Budget>, StoreError>;

    /// Deletes a budget.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
