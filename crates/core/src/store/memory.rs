//! In-memory store used by tests and database-less runs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BudgetStore, CatalogStore, HardwareStore, OptionStore, StoreError};
use crate::budget::{Budget, NewBudget};
use crate::catalog::{CatalogItem, CatalogItemInput, Hardware, HardwareInput, ItemType};
use crate::options::{DropdownOption, NewDropdownOption, OptionCategory};

/// Implements every store trait over vectors behind async locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: RwLock<Vec<CatalogItem>>,
    hardware: RwLock<Vec<Hardware>>,
    options: RwLock<Vec<DropdownOption>>,
    budgets: RwLock<Vec<Budget>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list(&self, kind: ItemType) -> Result<Vec<CatalogItem>, StoreError> {
        let items = self.catalog.read().await;
        Ok(items
            .iter()
            .filter(|item| item.item_type() == kind)
            .cloned()
            .collect())
    }

    async fn find(&self, kind: ItemType, id: Uuid) -> Result<CatalogItem, StoreError> {
        let items = self.catalog.read().await;
        items
            .iter()
            .find(|item| item.item_type() == kind && item.id() == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, input: CatalogItemInput) -> Result<CatalogItem, StoreError> {
        let item = input.into_item(Uuid::new_v4(), Utc::now());
        self.catalog.write().await.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: Uuid, input: CatalogItemInput) -> Result<CatalogItem, StoreError> {
        let kind = input.item_type();
        let mut items = self.catalog.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.item_type() == kind && item.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        let updated = input.into_item(id, slot.created_at());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, kind: ItemType, id: Uuid) -> Result<(), StoreError> {
        let mut items = self.catalog.write().await;
        let before = items.len();
        items.retain(|item| !(item.item_type() == kind && item.id() == id));
        if items.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl HardwareStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Hardware>, StoreError> {
        Ok(self.hardware.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Hardware, StoreError> {
        self.hardware
            .read()
            .await
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, input: HardwareInput) -> Result<Hardware, StoreError> {
        let hardware = input.into_hardware(Uuid::new_v4(), Utc::now());
        self.hardware.write().await.push(hardware.clone());
        Ok(hardware)
    }

    async fn update(&self, id: Uuid, input: HardwareInput) -> Result<Hardware, StoreError> {
        let mut records = self.hardware.write().await;
        let slot = records
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = input.into_hardware(id, slot.created_at);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.hardware.write().await;
        let before = records.len();
        records.retain(|h| h.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl OptionStore for MemoryStore {
    async fn list(&self, category: OptionCategory) -> Result<Vec<DropdownOption>, StoreError> {
        let options = self.options.read().await;
        Ok(options
            .iter()
            .filter(|o| o.category == category)
            .cloned()
            .collect())
    }

    async fn create(&self, input: NewDropdownOption) -> Result<DropdownOption, StoreError> {
        let option = input.into_option(Uuid::new_v4(), Utc::now());
        self.options.write().await.push(option.clone());
        Ok(option)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut options = self.options.write().await;
        let before = options.len();
        options.retain(|o| o.id != id);
        if options.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn create(&self, budget: NewBudget) -> Result<Budget, StoreError> {
        let budget = Budget::assemble(Uuid::new_v4(), Utc::now(), budget)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.budgets.write().await.push(budget.clone());
        Ok(budget)
    }

    async fn get(&self, id: Uuid) -> Result<Budget, StoreError> {
        self.budgets
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Budget>, StoreError> {
        // Latest insertion first among equal timestamps.
        let mut budgets: Vec<Budget> = self.budgets.read().await.iter().rev().cloned().collect();
        budgets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(budgets)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut budgets = self.budgets.write().await;
        let before = budgets.len();
        budgets.retain(|b| b.id != id);
        if budgets.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
