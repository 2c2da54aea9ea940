//! `SeaORM` Entity for budgets table.
//!
//! Only inputs are stored; totals are recomputed on read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_name: String,
    pub client_name: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub labor_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub additional_services: Decimal,
    #[sea_orm(column_type = "Decimal(Some((7, 4)))")]
    pub bdi_percentage: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::budget_items::Entity")]
    BudgetItems,
}

impl Related<super::budget_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
