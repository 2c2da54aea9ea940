//! `SeaORM` Entity for structures table.
//!
//! Medium- and low-voltage structures share the table, told apart by
//! `voltage_level` (`medium` or `low`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "structures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub voltage_level: String,
    pub code: String,
    pub description: String,
    pub voltage_class: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::structure_materials::Entity")]
    StructureMaterials,
}

impl Related<super::structure_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StructureMaterials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
