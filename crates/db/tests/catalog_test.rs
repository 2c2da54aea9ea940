//! Integration tests for the catalog, hardware and option repositories.
//!
//! Run with a database available: `cargo test -p gridbudget-db -- --ignored`.

mod common;

use gridbudget_core::catalog::{
    CatalogItemInput, HardwareInput, ItemType, Material, PoleInput, StructureInput,
};
use gridbudget_core::options::{NewDropdownOption, OptionCategory};
use gridbudget_db::{
    CatalogRepository, DropdownOptionRepository, HardwareRepository, RepositoryError,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().to_string()[..8])
}

fn structure_input(code: &str) -> CatalogItemInput {
    let material = |code: &str, quantity, unit_price| Material {
        code: code.to_string(),
        description: format!("Material {code}"),
        unit: "pç".to_string(),
        quantity,
        unit_price,
    };
    CatalogItemInput::MediumVoltageStructure(StructureInput {
        code: code.to_string(),
        description: "Estrutura de passagem".to_string(),
        voltage_class: "13.8kV".to_string(),
        materials: vec![
            material("ISOL-PINO", dec!(3), dec!(45.00)),
            material("CRUZETA", dec!(1), dec!(265.00)),
        ],
    })
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pole_create_update_delete() {
    let repo = CatalogRepository::new(common::connect().await);
    let code = unique("PC");

    let created = repo
        .insert_item(CatalogItemInput::Pole(PoleInput {
            code: code.clone(),
            pole_type: "Concreto".to_string(),
            height: dec!(11),
            capacity: 600,
            unit_price: dec!(1450.00),
        }))
        .await
        .expect("Failed to create pole");
    assert_eq!(created.display_code(), code);
    assert_eq!(created.effective_price(), dec!(1450.00));

    let updated = repo
        .update_item(
            created.id(),
            CatalogItemInput::Pole(PoleInput {
                code: code.clone(),
                pole_type: "Concreto".to_string(),
                height: dec!(11),
                capacity: 1000,
                unit_price: dec!(1890.00),
            }),
        )
        .await
        .expect("Failed to update pole");
    assert_eq!(updated.effective_price(), dec!(1890.00));
    assert_eq!(updated.created_at(), created.created_at());

    repo.delete_item(ItemType::Pole, created.id())
        .await
        .expect("Failed to delete pole");
    let result = repo.find_item(ItemType::Pole, created.id()).await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_structure_materials_round_trip() {
    let repo = CatalogRepository::new(common::connect().await);
    let code = unique("CE");

    let created = repo
        .insert_item(structure_input(&code))
        .await
        .expect("Failed to create structure");
    assert_eq!(created.effective_price(), dec!(400.00));

    let fetched = repo
        .find_item(ItemType::MediumVoltageStructure, created.id())
        .await
        .expect("Failed to fetch structure");
    assert_eq!(fetched, created);

    // Low-voltage listing does not see medium-voltage structures.
    let low = repo
        .list_items(ItemType::LowVoltageStructure)
        .await
        .expect("Failed to list structures");
    assert!(low.iter().all(|item| item.id() != created.id()));

    repo.delete_item(ItemType::MediumVoltageStructure, created.id())
        .await
        .expect("Failed to delete structure");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_hardware_crud() {
    let repo = HardwareRepository::new(common::connect().await);
    let input = HardwareInput {
        code: unique("PAR"),
        category: "Parafusos".to_string(),
        description: "Parafuso cabeça abaulada 16x150".to_string(),
        unit_price: dec!(8.90),
    };

    let created = repo.insert(input.clone()).await.expect("Failed to create hardware");
    let replaced = repo
        .replace(
            created.id,
            HardwareInput {
                unit_price: dec!(9.40),
                ..input
            },
        )
        .await
        .expect("Failed to update hardware");
    assert_eq!(replaced.unit_price, dec!(9.40));

    repo.remove(created.id).await.expect("Failed to delete hardware");
    assert!(matches!(
        repo.find_by_id(created.id).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_dropdown_options_by_category() {
    let repo = DropdownOptionRepository::new(common::connect().await);
    let value = unique("Madeira");

    let created = repo
        .insert(NewDropdownOption::new(OptionCategory::PoleTypes, &value, "Madeira tratada"))
        .await
        .expect("Failed to create option");

    let options = repo
        .list_by_category(OptionCategory::PoleTypes)
        .await
        .expect("Failed to list options");
    assert!(options.iter().any(|o| o.id == created.id));

    let insulation = repo
        .list_by_category(OptionCategory::ConductorInsulation)
        .await
        .expect("Failed to list options");
    assert!(insulation.iter().all(|o| o.id != created.id));

    repo.remove(created.id).await.expect("Failed to delete option");
}
