//! `SeaORM` entity definitions.

pub mod budget_items;
pub mod budgets;
pub mod conductors;
pub mod dropdown_options;
pub mod equipment;
pub mod hardware;
pub mod poles;
pub mod structure_materials;
pub mod structures;
