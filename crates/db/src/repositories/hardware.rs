//! Hardware repository.

use async_trait::async_trait;
use chrono::Utc;
use gridbudget_core::catalog::{Hardware, HardwareInput};
use gridbudget_core::store::{HardwareStore, StoreError};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::hardware;

fn from_model(m: hardware::Model) -> Hardware {
    Hardware {
        id: m.id,
        code: m.code,
        category: m.category,
        description: m.description,
        unit_price: m.unit_price,
        created_at: m.created_at.into(),
    }
}

/// Hardware repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct HardwareRepository {
    db: DatabaseConnection,
}

impl HardwareRepository {
    /// Creates a new hardware repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists hardware, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Hardware>, RepositoryError> {
        Ok(hardware::Entity::find()
            .order_by_asc(hardware::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(from_model)
            .collect())
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such record.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Hardware, RepositoryError> {
        hardware::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(from_model)
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Inserts a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert(&self, input: HardwareInput) -> Result<Hardware, RepositoryError> {
        let model = hardware::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            category: Set(input.category),
            description: Set(input.description),
            unit_price: Set(input.unit_price),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(hardware_id = %model.id, "Hardware created");
        Ok(from_model(model))
    }

    /// Replaces a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such record.
    pub async fn replace(&self, id: Uuid, input: HardwareInput) -> Result<Hardware, RepositoryError> {
        let model = hardware::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(id))?;

        let mut active: hardware::ActiveModel = model.into();
        active.code = Set(input.code);
        active.category = Set(input.category);
        active.description = Set(input.description);
        active.unit_price = Set(input.unit_price);

        Ok(from_model(active.update(&self.db).await?))
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = hardware::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl HardwareStore for HardwareRepository {
    async fn list(&self) -> Result<Vec<Hardware>, StoreError> {
        Ok(self.list_all().await?)
    }

    async fn find(&self, id: Uuid) -> Result<Hardware, StoreError> {
        Ok(self.find_by_id(id).await?)
    }

    async fn create(&self, input: HardwareInput) -> Result<Hardware, StoreError> {
        Ok(self.insert(input).await?)
    }

    async fn update(&self, id: Uuid, input: HardwareInput) -> Result<Hardware, StoreError> {
        Ok(self.replace(id, input).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        Ok(self.remove(id).await?)
    }
}
