//! Initial database migration.
//!
//! Creates the catalog tables, budgets with their line items, and dropdown
//! options.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CATALOG
        // ============================================================
        db.execute_unprepared(POLES_SQL).await?;
        db.execute_unprepared(STRUCTURES_SQL).await?;
        db.execute_unprepared(STRUCTURE_MATERIALS_SQL).await?;
        db.execute_unprepared(CONDUCTORS_SQL).await?;
        db.execute_unprepared(EQUIPMENT_SQL).await?;
        db.execute_unprepared(HARDWARE_SQL).await?;

        // ============================================================
        // PART 2: BUDGETS
        // ============================================================
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_ITEMS_SQL).await?;

        // ============================================================
        // PART 3: FORM OPTIONS
        // ============================================================
        db.execute_unprepared(DROPDOWN_OPTIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const POLES_SQL: &str = r"
CREATE TABLE poles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(100) NOT NULL,
    pole_type VARCHAR(100) NOT NULL,
    height NUMERIC(10, 2) NOT NULL CHECK (height >= 0),
    capacity INTEGER NOT NULL CHECK (capacity >= 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_poles_code ON poles(code);
";

const STRUCTURES_SQL: &str = r"
CREATE TABLE structures (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    voltage_level VARCHAR(10) NOT NULL CHECK (voltage_level IN ('medium', 'low')),
    code VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    voltage_class VARCHAR(50) NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_structures_level ON structures(voltage_level);
";

const STRUCTURE_MATERIALS_SQL: &str = r"
CREATE TABLE structure_materials (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    structure_id UUID NOT NULL REFERENCES structures(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    code VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    unit VARCHAR(20) NOT NULL DEFAULT '',
    quantity NUMERIC(19, 4) NOT NULL CHECK (quantity >= 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    UNIQUE (structure_id, position)
);

CREATE INDEX idx_structure_materials_structure ON structure_materials(structure_id);
";

const CONDUCTORS_SQL: &str = r"
CREATE TABLE conductors (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(100) NOT NULL,
    conductor_type VARCHAR(100) NOT NULL,
    insulation VARCHAR(100) NOT NULL,
    section VARCHAR(100) NOT NULL,
    configuration VARCHAR(100) NOT NULL,
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const EQUIPMENT_SQL: &str = r"
CREATE TABLE equipment (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(100) NOT NULL,
    category VARCHAR(100) NOT NULL,
    equipment_type VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const HARDWARE_SQL: &str = r"
CREATE TABLE hardware (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(100) NOT NULL,
    category VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_name VARCHAR(255) NOT NULL CHECK (length(trim(project_name)) > 0),
    client_name VARCHAR(255) NOT NULL CHECK (length(trim(client_name)) > 0),
    labor_cost NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (labor_cost >= 0),
    additional_services NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (additional_services >= 0),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_budgets_created_at ON budgets(created_at DESC);
";

const BUDGET_ITEMS_SQL: &str = r"
CREATE TABLE budget_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    budget_id UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    item_id UUID NOT NULL,
    item_type VARCHAR(50) NOT NULL,
    code VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    quantity NUMERIC(19, 4) NOT NULL CHECK (quantity >= 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    UNIQUE (budget_id, position),
    UNIQUE (budget_id, item_id)
);

CREATE INDEX idx_budget_items_budget ON budget_items(budget_id);
";

const DROPDOWN_OPTIONS_SQL: &str = r"
CREATE TABLE dropdown_options (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category VARCHAR(50) NOT NULL,
    value VARCHAR(255) NOT NULL,
    label VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_dropdown_options_category ON dropdown_options(category);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS dropdown_options;
DROP TABLE IF EXISTS budget_items;
DROP TABLE IF EXISTS budgets;
DROP TABLE IF EXISTS hardware;
DROP TABLE IF EXISTS equipment;
DROP TABLE IF EXISTS conductors;
DROP TABLE IF EXISTS structure_materials;
DROP TABLE IF EXISTS structures;
DROP TABLE IF EXISTS poles;
";
