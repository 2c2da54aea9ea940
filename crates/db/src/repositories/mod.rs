//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Each one also implements the matching store trait from `gridbudget-core`.

pub mod budget;
pub mod catalog;
pub mod dropdown_option;
pub mod error;
pub mod hardware;

pub use budget::BudgetRepository;
pub use catalog::CatalogRepository;
pub use dropdown_option::DropdownOptionRepository;
pub use error::RepositoryError;
pub use hardware::HardwareRepository;
