//! Catalog repository for poles, structures, conductors and equipment.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use gridbudget_core::catalog::{
    CatalogItem, CatalogItemInput, Conductor, Equipment, ItemType, Material, Pole, Structure,
};
use gridbudget_core::store::{CatalogStore, StoreError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::{conductors, equipment, poles, structure_materials, structures};

const MEDIUM: &str = "medium";
const LOW: &str = "low";

fn voltage_level(kind: ItemType) -> Option<&'static str> {
    match kind {
        ItemType::MediumVoltageStructure => Some(MEDIUM),
        ItemType::LowVoltageStructure => Some(LOW),
        ItemType::Pole | ItemType::Conductor | ItemType::Equipment => None,
    }
}

fn pole_from_model(m: poles::Model) -> CatalogItem {
    CatalogItem::Pole(Pole {
        id: m.id,
        code: m.code,
        pole_type: m.pole_type,
        height: m.height,
        capacity: m.capacity,
        unit_price: m.unit_price,
        created_at: m.created_at.into(),
    })
}

fn conductor_from_model(m: conductors::Model) -> CatalogItem {
    CatalogItem::Conductor(Conductor {
        id: m.id,
        code: m.code,
        conductor_type: m.conductor_type,
        insulation: m.insulation,
        section: m.section,
        configuration: m.configuration,
        unit_price: m.unit_price,
        created_at: m.created_at.into(),
    })
}

fn equipment_from_model(m: equipment::Model) -> CatalogItem {
    CatalogItem::Equipment(Equipment {
        id: m.id,
        code: m.code,
        category: m.category,
        equipment_type: m.equipment_type,
        description: m.description,
        unit_price: m.unit_price,
        created_at: m.created_at.into(),
    })
}

fn material_from_model(m: structure_materials::Model) -> Material {
    Material {
        code: m.code,
        description: m.description,
        unit: m.unit,
        quantity: m.quantity,
        unit_price: m.unit_price,
    }
}

fn structure_from_model(
    m: structures::Model,
    materials: Vec<structure_materials::Model>,
) -> Result<CatalogItem, RepositoryError> {
    let structure = Structure::new(
        m.id,
        m.code,
        m.description,
        m.voltage_class,
        materials.into_iter().map(material_from_model).collect(),
        m.created_at.into(),
    );
    match m.voltage_level.as_str() {
        MEDIUM => Ok(CatalogItem::MediumVoltageStructure(structure)),
        LOW => Ok(CatalogItem::LowVoltageStructure(structure)),
        other => Err(RepositoryError::Corrupt {
            id: m.id,
            reason: format!("unknown voltage level {other}"),
        }),
    }
}

async fn insert_materials<C: ConnectionTrait>(
    conn: &C,
    structure_id: Uuid,
    materials: &[Material],
) -> Result<(), RepositoryError> {
    for (position, material) in (0i32..).zip(materials) {
        structure_materials::ActiveModel {
            id: Set(Uuid::new_v4()),
            structure_id: Set(structure_id),
            position: Set(position),
            code: Set(material.code.clone()),
            description: Set(material.description.clone()),
            unit: Set(material.unit.clone()),
            quantity: Set(material.quantity),
            unit_price: Set(material.unit_price),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

/// Catalog repository for the budgetable kinds.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Lists items of one kind, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_items(&self, kind: ItemType) -> Result<Vec<CatalogItem>, RepositoryError> {
        match kind {
            ItemType::Pole => Ok(poles::Entity::find()
                .order_by_asc(poles::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(pole_from_model)
                .collect()),
            ItemType::Conductor => Ok(conductors::Entity::find()
                .order_by_asc(conductors::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(conductor_from_model)
                .collect()),
            ItemType::Equipment => Ok(equipment::Entity::find()
                .order_by_asc(equipment::Column::CreatedAt)
                .all(&self.db)
                .await?
                .into_iter()
                .map(equipment_from_model)
                .collect()),
            ItemType::MediumVoltageStructure | ItemType::LowVoltageStructure => {
                self.list_structures(kind).await
            }
        }
    }

    async fn list_structures(&self, kind: ItemType) -> Result<Vec<CatalogItem>, RepositoryError> {
        let level = voltage_level(kind).unwrap_or(MEDIUM);
        let headers = structures::Entity::find()
            .filter(structures::Column::VoltageLevel.eq(level))
            .order_by_asc(structures::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let ids: Vec<Uuid> = headers.iter().map(|s| s.id).collect();
        let mut materials: HashMap<Uuid, Vec<structure_materials::Model>> = HashMap::new();
        if !ids.is_empty() {
            for material in structure_materials::Entity::find()
                .filter(structure_materials::Column::StructureId.is_in(ids))
                .order_by_asc(structure_materials::Column::Position)
                .all(&self.db)
                .await?
            {
                materials.entry(material.structure_id).or_default().push(material);
            }
        }

        headers
            .into_iter()
            .map(|header| {
                let lines = materials.remove(&header.id).unwrap_or_default();
                structure_from_model(header, lines)
            })
            .collect()
    }

    /// Finds one item of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item of that kind has this ID.
    pub async fn find_item(&self, kind: ItemType, id: Uuid) -> Result<CatalogItem, RepositoryError> {
        let found = match kind {
            ItemType::Pole => poles::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(pole_from_model),
            ItemType::Conductor => conductors::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(conductor_from_model),
            ItemType::Equipment => equipment::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(equipment_from_model),
            ItemType::MediumVoltageStructure | ItemType::LowVoltageStructure => {
                let level = voltage_level(kind).unwrap_or(MEDIUM);
                let header = structures::Entity::find_by_id(id)
                    .filter(structures::Column::VoltageLevel.eq(level))
                    .one(&self.db)
                    .await?;
                match header {
                    Some(header) => {
                        let lines = structure_materials::Entity::find()
                            .filter(structure_materials::Column::StructureId.eq(id))
                            .order_by_asc(structure_materials::Column::Position)
                            .all(&self.db)
                            .await?;
                        Some(structure_from_model(header, lines)?)
                    }
                    None => None,
                }
            }
        };
        found.ok_or(RepositoryError::NotFound(id))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts a new item.
    ///
    /// Structures and their materials are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_item(&self, input: CatalogItemInput) -> Result<CatalogItem, RepositoryError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let kind = input.item_type();

        match input {
            CatalogItemInput::Pole(p) => {
                poles::ActiveModel {
                    id: Set(id),
                    code: Set(p.code),
                    pole_type: Set(p.pole_type),
                    height: Set(p.height),
                    capacity: Set(p.capacity),
                    unit_price: Set(p.unit_price),
                    created_at: Set(now.into()),
                }
                .insert(&self.db)
                .await?;
            }
            CatalogItemInput::Conductor(c) => {
                conductors::ActiveModel {
                    id: Set(id),
                    code: Set(c.code),
                    conductor_type: Set(c.conductor_type),
                    insulation: Set(c.insulation),
                    section: Set(c.section),
                    configuration: Set(c.configuration),
                    unit_price: Set(c.unit_price),
                    created_at: Set(now.into()),
                }
                .insert(&self.db)
                .await?;
            }
            CatalogItemInput::Equipment(e) => {
                equipment::ActiveModel {
                    id: Set(id),
                    code: Set(e.code),
                    category: Set(e.category),
                    equipment_type: Set(e.equipment_type),
                    description: Set(e.description),
                    unit_price: Set(e.unit_price),
                    created_at: Set(now.into()),
                }
                .insert(&self.db)
                .await?;
            }
            CatalogItemInput::MediumVoltageStructure(s) | CatalogItemInput::LowVoltageStructure(s) => {
                let txn = self.db.begin().await?;
                structures::ActiveModel {
                    id: Set(id),
                    voltage_level: Set(voltage_level(kind).unwrap_or(MEDIUM).to_string()),
                    code: Set(s.code),
                    description: Set(s.description),
                    voltage_class: Set(s.voltage_class),
                    created_at: Set(now.into()),
                }
                .insert(&txn)
                .await?;
                insert_materials(&txn, id, &s.materials).await?;
                txn.commit().await?;
            }
        }

        info!(item_id = %id, kind = %kind, "Catalog item created");
        self.find_item(kind, id).await
    }

    /// Replaces an item, keeping its ID and creation time.
    ///
    /// A structure's material list is replaced as a whole.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item of the input's kind has this ID.
    pub async fn update_item(
        &self,
        id: Uuid,
        input: CatalogItemInput,
    ) -> Result<CatalogItem, RepositoryError> {
        let kind = input.item_type();

        match input {
            CatalogItemInput::Pole(p) => {
                let model = poles::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(RepositoryError::NotFound(id))?;
                let mut active: poles::ActiveModel = model.into();
                active.code = Set(p.code);
                active.pole_type = Set(p.pole_type);
                active.height = Set(p.height);
                active.capacity = Set(p.capacity);
                active.unit_price = Set(p.unit_price);
                active.update(&self.db).await?;
            }
            CatalogItemInput::Conductor(c) => {
                let model = conductors::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(RepositoryError::NotFound(id))?;
                let mut active: conductors::ActiveModel = model.into();
                active.code = Set(c.code);
                active.conductor_type = Set(c.conductor_type);
                active.insulation = Set(c.insulation);
                active.section = Set(c.section);
                active.configuration = Set(c.configuration);
                active.unit_price = Set(c.unit_price);
                active.update(&self.db).await?;
            }
            CatalogItemInput::Equipment(e) => {
                let model = equipment::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .ok_or(RepositoryError::NotFound(id))?;
                let mut active: equipment::ActiveModel = model.into();
                active.code = Set(e.code);
                active.category = Set(e.category);
                active.equipment_type = Set(e.equipment_type);
                active.description = Set(e.description);
                active.unit_price = Set(e.unit_price);
                active.update(&self.db).await?;
            }
            CatalogItemInput::MediumVoltageStructure(s) | CatalogItemInput::LowVoltageStructure(s) => {
                let level = voltage_level(kind).unwrap_or(MEDIUM);
                let txn = self.db.begin().await?;
                let model = structures::Entity::find_by_id(id)
                    .filter(structures::Column::VoltageLevel.eq(level))
                    .one(&txn)
                    .await?
                    .ok_or(RepositoryError::NotFound(id))?;
                let mut active: structures::ActiveModel = model.into();
                active.code = Set(s.code);
                active.description = Set(s.description);
                active.voltage_class = Set(s.voltage_class);
                active.update(&txn).await?;

                structure_materials::Entity::delete_many()
                    .filter(structure_materials::Column::StructureId.eq(id))
                    .exec(&txn)
                    .await?;
                insert_materials(&txn, id, &s.materials).await?;
                txn.commit().await?;
            }
        }

        info!(item_id = %id, kind = %kind, "Catalog item updated");
        self.find_item(kind, id).await
    }

    /// Deletes an item. Budgets that reference it keep their snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete_item(&self, kind: ItemType, id: Uuid) -> Result<(), RepositoryError> {
        let result = match kind {
            ItemType::Pole => poles::Entity::delete_by_id(id).exec(&self.db).await?,
            ItemType::Conductor => conductors::Entity::delete_by_id(id).exec(&self.db).await?,
            ItemType::Equipment => equipment::Entity::delete_by_id(id).exec(&self.db).await?,
            ItemType::MediumVoltageStructure | ItemType::LowVoltageStructure => {
                structures::Entity::delete_many()
                    .filter(structures::Column::Id.eq(id))
                    .filter(
                        structures::Column::VoltageLevel.eq(voltage_level(kind).unwrap_or(MEDIUM)),
                    )
                    .exec(&self.db)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        info!(item_id = %id, kind = %kind, "Catalog item deleted");
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn list(&self, kind: ItemType) -> Result<Vec<CatalogItem>, StoreError> {
        Ok(self.list_items(kind).await?)
    }

    async fn find(&self, kind: ItemType, id: Uuid) -> Result<CatalogItem, StoreError> {
        Ok(self.find_item(kind, id).await?)
    }

    async fn create(&self, input: CatalogItemInput) -> Result<CatalogItem, StoreError> {
        Ok(self.insert_item(input).await?)
    }

    async fn update(&self, id: Uuid, input: CatalogItemInput) -> Result<CatalogItem, StoreError> {
        Ok(self.update_item(id, input).await?)
    }

    async fn delete(&self, kind: ItemType, id: Uuid) -> Result<(), StoreError> {
        Ok(self.delete_item(kind, id).await?)
    }
}
