//! Catalog and budget aggregates for the dashboard.

use chrono::{DateTime, Utc};
use gridbudget_shared::AppError;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::budget::{Budget, BudgetError};
use crate::catalog::ItemType;
use crate::store::{BudgetStore, CatalogStore, HardwareStore, StoreError};

/// Number of budgets listed under "recent".
pub const RECENT_BUDGETS: usize = 5;

/// Dashboard errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The budget totals cannot be summed.
    #[error(transparent)]
    Budget(#[from] BudgetError),
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Store(e) => e.into(),
            DashboardError::Budget(e) => e.into(),
        }
    }
}

/// Item counts per catalog kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    /// Poles.
    pub poles: usize,
    /// Medium-voltage structures.
    pub medium_voltage_structures: usize,
    /// Low-voltage structures.
    pub low_voltage_structures: usize,
    /// Conductors.
    pub conductors: usize,
    /// Equipment.
    pub equipment: usize,
    /// Hardware.
    pub hardware: usize,
}

impl CatalogCounts {
    fn set(&mut self, kind: ItemType, count: usize) {
        match kind {
            ItemType::Pole => self.poles = count,
            ItemType::MediumVoltageStructure => self.medium_voltage_structures = count,
            ItemType::LowVoltageStructure => self.low_voltage_structures = count,
            ItemType::Conductor => self.conductors = count,
            ItemType::Equipment => self.equipment = count,
        }
    }
}

/// Short budget entry for the recent list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentBudget {
    /// Budget ID.
    pub id: Uuid,
    /// Project name.
    pub project_name: String,
    /// Client name.
    pub client_name: String,
    /// Grand total.
    pub total: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Catalog counts.
    pub catalog: CatalogCounts,
    /// Number of budgets.
    pub budgets: usize,
    /// Sum of all budget totals.
    pub budgets_total: Decimal,
    /// Most recent budgets, newest first.
    pub recent_budgets: Vec<RecentBudget>,
}

impl DashboardStats {
    /// Aggregates budgets listed newest first.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the sum of budget totals overflows.
    pub fn from_parts(catalog: CatalogCounts, budgets: &[Budget]) -> Result<Self, BudgetError> {
        let budgets_total = budgets
            .iter()
            .try_fold(Decimal::ZERO, |acc, b| acc.checked_add(b.totals().total))
            .ok_or(BudgetError::OutOfRange("budgets_total"))?;
        Ok(Self {
            catalog,
            budgets: budgets.len(),
            budgets_total,
            recent_budgets: budgets
                .iter()
                .take(RECENT_BUDGETS)
                .map(|b| RecentBudget {
                    id: b.id,
                    project_name: b.project_name.clone(),
                    client_name: b.client_name.clone(),
                    total: b.totals().total,
                    created_at: b.created_at,
                })
                .collect(),
        })
    }

    /// Reads every store and aggregates.
    pub async fn collect(
        catalog: &dyn CatalogStore,
        hardware: &dyn HardwareStore,
        budgets: &dyn BudgetStore,
    ) -> Result<Self, DashboardError> {
        let mut counts = CatalogCounts::default();
        for kind in ItemType::ALL {
            counts.set(kind, catalog.list(kind).await?.len());
        }
        counts.hardware = hardware.list().await?.len();
        let budgets = budgets.list().await?;
        Ok(Self::from_parts(counts, &budgets)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetLineItem, NewBudget};
    use crate::catalog::{CatalogItemInput, HardwareInput, PoleInput};
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn new_budget(project: &str, price: Decimal) -> NewBudget {
        NewBudget {
            project_name: project.to_string(),
            client_name: "Cliente".to_string(),
            items: vec![BudgetLineItem::new(
                Uuid::new_v4(),
                ItemType::Equipment,
                "EQ".to_string(),
                String::new(),
                dec!(1),
                price,
            )
            .unwrap()],
            labor_cost: dec!(0),
            additional_services: dec!(0),
            bdi_percentage: dec!(0),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_collect_counts_and_recent() {
        let store = MemoryStore::new();
        CatalogStore::create(
            &store,
            CatalogItemInput::Pole(PoleInput {
                code: "DT-11-1000".to_string(),
                pole_type: "Duplo T".to_string(),
                height: dec!(11),
                capacity: 1000,
                unit_price: dec!(3200.00),
            }),
        )
        .await
        .unwrap();
        HardwareStore::create(
            &store,
            HardwareInput {
                code: "PAR-QUAD-M16-200".to_string(),
                category: "Parafuso".to_string(),
                description: "Parafuso Quadrada M-16 200mm".to_string(),
                unit_price: dec!(16.11),
            },
        )
        .await
        .unwrap();
        for i in 0..7 {
            BudgetStore::create(&store, new_budget(&format!("P{i}"), dec!(100)))
                .await
                .unwrap();
        }

        let stats = DashboardStats::collect(&store, &store, &store).await.unwrap();
        assert_eq!(stats.catalog.poles, 1);
        assert_eq!(stats.catalog.hardware, 1);
        assert_eq!(stats.catalog.conductors, 0);
        assert_eq!(stats.budgets, 7);
        assert_eq!(stats.budgets_total, dec!(700));
        assert_eq!(stats.recent_budgets.len(), RECENT_BUDGETS);
        assert_eq!(stats.recent_budgets[0].project_name, "P6");
    }

    #[test]
    fn test_from_parts_empty() {
        let stats = DashboardStats::from_parts(CatalogCounts::default(), &[]).unwrap();
        assert_eq!(stats.budgets, 0);
        assert_eq!(stats.budgets_total, dec!(0));
        assert!(stats.recent_budgets.is_empty());
    }

    #[test]
    fn test_overflowing_budgets_total_is_out_of_range() {
        let cap = crate::numeric::MAX_INPUT;
        let mut budget = new_budget("Grande", cap);
        budget.items[0] = BudgetLineItem::new(
            Uuid::new_v4(),
            ItemType::Equipment,
            "EQ".to_string(),
            String::new(),
            cap,
            cap,
        )
        .unwrap();
        budget.bdi_percentage = dec!(100);
        let huge = Budget::assemble(Uuid::new_v4(), Utc::now(), budget).unwrap();
        let budgets = vec![huge; 40_000];

        let result = DashboardStats::from_parts(CatalogCounts::default(), &budgets);
        assert!(matches!(
            result,
            Err(BudgetError::OutOfRange("budgets_total"))
        ));
    }
}
