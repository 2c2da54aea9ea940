//! Core business logic for GridBudget.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `catalog` - Priced catalog items (poles, structures, conductors, equipment, hardware)
//! - `budget` - Budget composition and total computation
//! - `numeric` - Permissive parsing of operator-typed numbers
//! - `options` - Dropdown option categories
//! - `dashboard` - Catalog and budget aggregates
//! - `document` - Budget document rendering
//! - `store` - Persistence traits and an in-memory implementation

pub mod budget;
pub mod catalog;
pub mod dashboard;
pub mod document;
pub mod numeric;
pub mod options;
pub mod store;
