//! Adds the BDI percentage to budgets.
//!
//! Budgets created before this migration get a BDI of zero.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ADD_BDI_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("ALTER TABLE budgets DROP COLUMN IF EXISTS bdi_percentage;")
            .await?;
        Ok(())
    }
}

const ADD_BDI_SQL: &str = r"
ALTER TABLE budgets
    ADD COLUMN bdi_percentage NUMERIC(7, 4) NOT NULL DEFAULT 0
    CHECK (bdi_percentage >= 0 AND bdi_percentage <= 100);
";
