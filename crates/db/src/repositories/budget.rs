//! Budget repository for budget database operations.
//!
//! Only the inputs of a budget are stored. Totals are rebuilt from the items
//! and costs by [`Budget::assemble`] every time a budget is read.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use gridbudget_core::budget::{Budget, BudgetLineItem, NewBudget};
use gridbudget_core::catalog::ItemType;
use gridbudget_core::store::{BudgetStore, StoreError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::{budget_items, budgets};

fn line_from_model(m: budget_items::Model) -> Result<BudgetLineItem, RepositoryError> {
    let item_type = m
        .item_type
        .parse::<ItemType>()
        .map_err(|e| RepositoryError::Corrupt {
            id: m.id,
            reason: e.to_string(),
        })?;
    BudgetLineItem::new(
        m.item_id,
        item_type,
        m.code,
        m.description,
        m.quantity,
        m.unit_price,
    )
    .map_err(|e| RepositoryError::Corrupt {
        id: m.id,
        reason: e.to_string(),
    })
}

fn budget_from_models(
    header: budgets::Model,
    lines: Vec<budget_items::Model>,
) -> Result<Budget, RepositoryError> {
    let items = lines
        .into_iter()
        .map(line_from_model)
        .collect::<Result<Vec<_>, _>>()?;
    let id = header.id;
    Budget::assemble(
        header.id,
        header.created_at.into(),
        NewBudget {
            project_name: header.project_name,
            client_name: header.client_name,
            items,
            labor_cost: header.labor_cost,
            additional_services: header.additional_services,
            bdi_percentage: header.bdi_percentage,
            notes: header.notes,
        },
    )
    .map_err(|e| RepositoryError::Corrupt {
        id,
        reason: e.to_string(),
    })
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a budget and its line items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub async fn create_budget(&self, input: NewBudget) -> Result<Budget, RepositoryError> {
        let budget_id = Uuid::new_v4();
        let now = Utc::now();
        // Assembling first rounds the costs the same way the columns will.
        let budget = Budget::assemble(budget_id, now, input)
            .map_err(|e| RepositoryError::Invalid(e.to_string()))?;
        let totals = budget.totals();
        let txn = self.db.begin().await?;

        budgets::ActiveModel {
            id: Set(budget_id),
            project_name: Set(budget.project_name.clone()),
            client_name: Set(budget.client_name.clone()),
            labor_cost: Set(totals.labor_cost),
            additional_services: Set(totals.additional_services),
            bdi_percentage: Set(totals.bdi_percentage),
            notes: Set(budget.notes.clone()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        for (position, line) in (0i32..).zip(budget.items()) {
            budget_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                budget_id: Set(budget_id),
                position: Set(position),
                item_id: Set(line.item_id()),
                item_type: Set(line.item_type().as_str().to_string()),
                code: Set(line.code().to_string()),
                description: Set(line.description().to_string()),
                quantity: Set(line.quantity()),
                unit_price: Set(line.unit_price()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(
            budget_id = %budget_id,
            items = budget.items().len(),
            total = %budget.totals().total,
            "Budget created"
        );
        Ok(budget)
    }

    /// Gets a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget does not exist.
    pub async fn get_budget(&self, budget_id: Uuid) -> Result<Budget, RepositoryError> {
        let header = budgets::Entity::find_by_id(budget_id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(budget_id))?;

        let lines = budget_items::Entity::find()
            .filter(budget_items::Column::BudgetId.eq(budget_id))
            .order_by_asc(budget_items::Column::Position)
            .all(&self.db)
            .await?;

        budget_from_models(header, lines)
    }

    /// Lists budgets, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_budgets(&self) -> Result<Vec<Budget>, RepositoryError> {
        let headers = budgets::Entity::find()
            .order_by_desc(budgets::Column::CreatedAt)
            .all(&self.db)
            .await?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = headers.iter().map(|b| b.id).collect();
        let mut lines: HashMap<Uuid, Vec<budget_items::Model>> = HashMap::new();
        for line in budget_items::Entity::find()
            .filter(budget_items::Column::BudgetId.is_in(ids))
            .order_by_asc(budget_items::Column::Position)
            .all(&self.db)
            .await?
        {
            lines.entry(line.budget_id).or_default().push(line);
        }

        headers
            .into_iter()
            .map(|header| {
                let items = lines.remove(&header.id).unwrap_or_default();
                budget_from_models(header, items)
            })
            .collect()
    }

    /// Deletes a budget; its line items go with it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete_budget(&self, budget_id: Uuid) -> Result<(), RepositoryError> {
        let result = budgets::Entity::delete_by_id(budget_id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(budget_id));
        }
        info!(budget_id = %budget_id, "Budget deleted");
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn create(&self, budget: NewBudget) -> Result<Budget, StoreError> {
        Ok(self.create_budget(budget).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Budget, StoreError> {
        Ok(self.get_budget(id).await?)
    }

    async fn list(&self) -> Result<Vec<Budget>, StoreError> {
        Ok(self.list_budgets().await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        Ok(self.delete_budget(id).await?)
    }
}
