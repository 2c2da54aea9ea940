//! Integration tests for the budget repository.
//!
//! Run with a database available: `cargo test -p gridbudget-db -- --ignored`.

mod common;

use gridbudget_core::budget::{BudgetLineItem, NewBudget};
use gridbudget_core::catalog::ItemType;
use gridbudget_db::{BudgetRepository, RepositoryError};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn new_budget(project_name: &str) -> NewBudget {
    NewBudget {
        project_name: project_name.to_string(),
        client_name: "Cooperativa Rural".to_string(),
        items: vec![
            BudgetLineItem::new(
                Uuid::new_v4(),
                ItemType::Pole,
                "PC-10-500".to_string(),
                "Concreto 10m 500daN".to_string(),
                dec!(3),
                dec!(850.00),
            )
            .unwrap(),
            BudgetLineItem::new(
                Uuid::new_v4(),
                ItemType::Conductor,
                "CD-CU-4AWG".to_string(),
                "Cobre 4 AWG XLPE Simples".to_string(),
                dec!(1),
                dec!(12.50),
            )
            .unwrap(),
        ],
        labor_cost: dec!(200),
        additional_services: dec!(50),
        bdi_percentage: dec!(25),
        notes: None,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_budget_persists_items_in_order() {
    let repo = BudgetRepository::new(common::connect().await);

    let created = repo
        .create_budget(new_budget("Extensão de rede"))
        .await
        .expect("Failed to create budget");
    assert_eq!(created.totals().total, dec!(3515.625));

    let fetched = repo
        .get_budget(created.id)
        .await
        .expect("Failed to fetch budget");
    let codes: Vec<_> = fetched.items().iter().map(BudgetLineItem::code).collect();
    assert_eq!(codes, vec!["PC-10-500", "CD-CU-4AWG"]);
    assert_eq!(fetched.totals(), created.totals());

    repo.delete_budget(created.id)
        .await
        .expect("Failed to delete budget");
    assert!(matches!(
        repo.get_budget(created.id).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_fine_grained_amounts_read_back_unchanged() {
    let repo = BudgetRepository::new(common::connect().await);
    let mut budget = new_budget("Ramal rural");
    budget.items.push(
        BudgetLineItem::new(
            Uuid::new_v4(),
            ItemType::Conductor,
            "CD-AL-2AWG".to_string(),
            "Aluminio 2 AWG".to_string(),
            dec!(1.23456),
            dec!(7.123456),
        )
        .unwrap(),
    );
    budget.labor_cost = dec!(200.12345);
    budget.bdi_percentage = dec!(12.34567);

    let created = repo
        .create_budget(budget)
        .await
        .expect("Failed to create budget");
    let fetched = repo
        .get_budget(created.id)
        .await
        .expect("Failed to fetch budget");
    assert_eq!(fetched.totals(), created.totals());
    assert_eq!(fetched.items(), created.items());
    assert_eq!(created.items()[2].quantity(), dec!(1.2346));

    repo.delete_budget(created.id)
        .await
        .expect("Failed to delete budget");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_budgets_newest_first() {
    let repo = BudgetRepository::new(common::connect().await);

    let older = repo
        .create_budget(new_budget("Lote A"))
        .await
        .expect("Failed to create budget");
    let newer = repo
        .create_budget(new_budget("Lote B"))
        .await
        .expect("Failed to create budget");

    let budgets = repo.list_budgets().await.expect("Failed to list budgets");
    let older_pos = budgets.iter().position(|b| b.id == older.id).expect("older listed");
    let newer_pos = budgets.iter().position(|b| b.id == newer.id).expect("newer listed");
    assert!(newer_pos < older_pos);

    for id in [older.id, newer.id] {
        repo.delete_budget(id).await.expect("Failed to delete budget");
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_missing_budget() {
    let repo = BudgetRepository::new(common::connect().await);
    let result = repo.delete_budget(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}
