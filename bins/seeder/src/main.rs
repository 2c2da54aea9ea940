//! Database seeder for GridBudget development and demos.
//!
//! Seeds the default dropdown options and a starter catalog of poles,
//! structures, conductors, equipment and hardware. Kinds that already have
//! records are left alone, so the seeder can be run repeatedly.
//!
//! Usage: cargo run --bin seeder

mod data;

use anyhow::Context;
use gridbudget_core::catalog::{
    CatalogItemInput, ConductorInput, EquipmentInput, HardwareInput, ItemType, Material,
    PoleInput, StructureInput,
};
use gridbudget_core::numeric::format_money;
use gridbudget_core::options::default_options;
use gridbudget_core::store::{CatalogStore, HardwareStore, OptionStore};
use gridbudget_db::{CatalogRepository, DropdownOptionRepository, HardwareRepository};

use crate::data::StructureSeed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = gridbudget_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding dropdown options...");
    seed_options(&DropdownOptionRepository::new(db.clone())).await?;

    let catalog = CatalogRepository::new(db.clone());
    for kind in ItemType::ALL {
        println!("Seeding {}...", kind.route_segment());
        seed_kind(&catalog, kind).await?;
    }

    println!("Seeding hardware...");
    seed_hardware(&HardwareRepository::new(db)).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_options(repo: &DropdownOptionRepository) -> anyhow::Result<()> {
    if repo.count().await? > 0 {
        println!("  Options already present, skipping...");
        return Ok(());
    }
    for option in default_options() {
        OptionStore::create(repo, option).await?;
    }
    Ok(())
}

fn structure_input(seed: &StructureSeed) -> StructureInput {
    StructureInput {
        code: seed.code.to_string(),
        description: seed.description.to_string(),
        voltage_class: seed.voltage_class.to_string(),
        materials: seed
            .materials
            .iter()
            .map(|&(code, description, quantity, unit_price)| Material {
                code: code.to_string(),
                description: description.to_string(),
                unit: "pç".to_string(),
                quantity,
                unit_price,
            })
            .collect(),
    }
}

fn starter_items(kind: ItemType) -> Vec<CatalogItemInput> {
    match kind {
        ItemType::Pole => data::POLES
            .iter()
            .map(|&(code, pole_type, height, capacity, unit_price)| {
                CatalogItemInput::Pole(PoleInput {
                    code: code.to_string(),
                    pole_type: pole_type.to_string(),
                    height,
                    capacity,
                    unit_price,
                })
            })
            .collect(),
        ItemType::MediumVoltageStructure => data::MEDIUM_VOLTAGE_STRUCTURES
            .iter()
            .map(|seed| CatalogItemInput::MediumVoltageStructure(structure_input(seed)))
            .collect(),
        ItemType::LowVoltageStructure => data::LOW_VOLTAGE_STRUCTURES
            .iter()
            .map(|seed| CatalogItemInput::LowVoltageStructure(structure_input(seed)))
            .collect(),
        ItemType::Conductor => data::CONDUCTORS
            .iter()
            .map(
                |&(code, conductor_type, insulation, section, configuration, unit_price)| {
                    CatalogItemInput::Conductor(ConductorInput {
                        code: code.to_string(),
                        conductor_type: conductor_type.to_string(),
                        insulation: insulation.to_string(),
                        section: section.to_string(),
                        configuration: configuration.to_string(),
                        unit_price,
                    })
                },
            )
            .collect(),
        ItemType::Equipment => data::EQUIPMENT
            .iter()
            .map(|&(code, category, equipment_type, description, unit_price)| {
                CatalogItemInput::Equipment(EquipmentInput {
                    code: code.to_string(),
                    category: category.to_string(),
                    equipment_type: equipment_type.to_string(),
                    description: description.to_string(),
                    unit_price,
                })
            })
            .collect(),
    }
}

async fn seed_kind(catalog: &CatalogRepository, kind: ItemType) -> anyhow::Result<()> {
    if !CatalogStore::list(catalog, kind).await?.is_empty() {
        println!("  {} already present, skipping...", kind.label());
        return Ok(());
    }
    for input in starter_items(kind) {
        input.validate()?;
        let item = CatalogStore::create(catalog, input).await?;
        println!(
            "  {} - R$ {}",
            item.display_code(),
            format_money(item.effective_price())
        );
    }
    Ok(())
}

async fn seed_hardware(repo: &HardwareRepository) -> anyhow::Result<()> {
    if !HardwareStore::list(repo).await?.is_empty() {
        println!("  Hardware already present, skipping...");
        return Ok(());
    }
    for &(code, category, description, unit_price) in data::HARDWARE {
        let input = HardwareInput {
            code: code.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            unit_price,
        };
        input.validate()?;
        HardwareStore::create(repo, input).await?;
    }
    Ok(())
}
