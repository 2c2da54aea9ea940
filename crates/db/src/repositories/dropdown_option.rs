//! Dropdown option repository.

use async_trait::async_trait;
use chrono::Utc;
use gridbudget_core::options::{DropdownOption, NewDropdownOption, OptionCategory};
use gridbudget_core::store::{OptionStore, StoreError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::dropdown_options;

fn from_model(m: dropdown_options::Model) -> Result<DropdownOption, RepositoryError> {
    let category = m
        .category
        .parse::<OptionCategory>()
        .map_err(|e| RepositoryError::Corrupt {
            id: m.id,
            reason: e.to_string(),
        })?;
    Ok(DropdownOption {
        id: m.id,
        category,
        value: m.value,
        label: m.label,
        created_at: m.created_at.into(),
    })
}

/// Dropdown option repository.
#[derive(Debug, Clone)]
pub struct DropdownOptionRepository {
    db: DatabaseConnection,
}

impl DropdownOptionRepository {
    /// Creates a new dropdown option repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Options of one category, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row has an unknown category.
    pub async fn list_by_category(
        &self,
        category: OptionCategory,
    ) -> Result<Vec<DropdownOption>, RepositoryError> {
        dropdown_options::Entity::find()
            .filter(dropdown_options::Column::Category.eq(category.as_str()))
            .order_by_asc(dropdown_options::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(from_model)
            .collect()
    }

    /// Counts stored options across all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(dropdown_options::Entity::find().count(&self.db).await?)
    }

    /// Inserts an option.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert(&self, input: NewDropdownOption) -> Result<DropdownOption, RepositoryError> {
        let model = dropdown_options::ActiveModel {
            id: Set(Uuid::new_v4()),
            category: Set(input.category.as_str().to_string()),
            value: Set(input.value),
            label: Set(input.label),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        from_model(model)
    }

    /// Deletes an option.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = dropdown_options::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl OptionStore for DropdownOptionRepository {
    async fn list(&self, category: OptionCategory) -> Result<Vec<DropdownOption>, StoreError> {
        Ok(self.list_by_category(category).await?)
    }

    async fn create(&self, input: NewDropdownOption) -> Result<DropdownOption, StoreError> {
        Ok(self.insert(input).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        Ok(self.remove(id).await?)
    }
}
