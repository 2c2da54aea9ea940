//! Catalog data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::error::CatalogError;
use crate::numeric::{MAX_INPUT, deserialize_stored_scale};

/// Decimal places kept for pole heights (`NUMERIC(10, 2)`).
const HEIGHT_SCALE: u32 = 2;

/// Tallest pole accepted, in meters.
const MAX_HEIGHT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

fn deserialize_height<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    <Decimal as serde::Deserialize>::deserialize(deserializer)
        .map(|height| height.round_dp_with_strategy(HEIGHT_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Budgetable catalog kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Distribution pole.
    Pole,
    /// Medium-voltage structure.
    MediumVoltageStructure,
    /// Low-voltage structure.
    LowVoltageStructure,
    /// Conductor, priced per meter.
    Conductor,
    /// Equipment (switches, transformers, reclosers...).
    Equipment,
}

impl ItemType {
    /// Every budgetable kind, in display order.
    pub const ALL: [Self; 5] = [
        Self::Pole,
        Self::MediumVoltageStructure,
        Self::LowVoltageStructure,
        Self::Conductor,
        Self::Equipment,
    ];

    /// Snake-case tag stored on line items.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pole => "pole",
            Self::MediumVoltageStructure => "medium_voltage_structure",
            Self::LowVoltageStructure => "low_voltage_structure",
            Self::Conductor => "conductor",
            Self::Equipment => "equipment",
        }
    }

    /// URL path segment of the REST collection.
    #[must_use]
    pub const fn route_segment(self) -> &'static str {
        match self {
            Self::Pole => "poles",
            Self::MediumVoltageStructure => "medium-voltage-structures",
            Self::LowVoltageStructure => "low-voltage-structures",
            Self::Conductor => "conductors",
            Self::Equipment => "equipment",
        }
    }

    /// Human-readable singular label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pole => "Pole",
            Self::MediumVoltageStructure => "Medium-voltage structure",
            Self::LowVoltageStructure => "Low-voltage structure",
            Self::Conductor => "Conductor",
            Self::Equipment => "Equipment",
        }
    }

    /// Whether items of this kind are composite structures.
    #[must_use]
    pub const fn is_structure(self) -> bool {
        matches!(
            self,
            Self::MediumVoltageStructure | Self::LowVoltageStructure
        )
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = CatalogError;

    /// Accepts the snake-case tag, the plural and the route segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pole" | "poles" => Ok(Self::Pole),
            "medium_voltage_structure" | "medium_voltage_structures" => {
                Ok(Self::MediumVoltageStructure)
            }
            "low_voltage_structure" | "low_voltage_structures" => Ok(Self::LowVoltageStructure),
            "conductor" | "conductors" => Ok(Self::Conductor),
            "equipment" => Ok(Self::Equipment),
            _ => Err(CatalogError::UnknownKind(s.to_string())),
        }
    }
}

/// A distribution pole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pole {
    /// Pole ID.
    pub id: Uuid,
    /// Catalog code, e.g. `DT-11-1000`.
    pub code: String,
    /// Pole type (Concreto, Fibra, Duplo T...).
    #[serde(rename = "type")]
    pub pole_type: String,
    /// Height in meters.
    pub height: Decimal,
    /// Nominal capacity in daN.
    pub capacity: i32,
    /// Price of one pole.
    pub unit_price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One material line of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Material code.
    pub code: String,
    /// Material description.
    pub description: String,
    /// Unit of measure (`pç`, `m`, `kg`...).
    pub unit: String,
    /// Quantity used by one structure.
    #[serde(deserialize_with = "deserialize_stored_scale")]
    pub quantity: Decimal,
    /// Price per unit of measure.
    #[serde(deserialize_with = "deserialize_stored_scale")]
    pub unit_price: Decimal,
}

impl Material {
    /// `quantity × unit_price`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn extended_price(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }

    /// `quantity × unit_price`, or `None` on overflow.
    #[must_use]
    pub fn checked_extended_price(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}

/// A composite structure priced as the sum of its materials.
///
/// The material list is only reachable through [`Structure::materials`] so
/// `total_price` can never drift from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Structure {
    /// Structure ID.
    pub id: Uuid,
    /// Catalog code, e.g. `CE1`.
    pub code: String,
    /// Structure description.
    pub description: String,
    /// Voltage class, e.g. `13.8kV`.
    pub voltage_class: String,
    materials: Vec<Material>,
    total_price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Structure {
    /// Builds a structure and derives its total price from `materials`.
    #[must_use]
    pub fn new(
        id: Uuid,
        code: String,
        description: String,
        voltage_class: String,
        materials: Vec<Material>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_price = materials
            .iter()
            .map(Material::extended_price)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        Self {
            id,
            code,
            description,
            voltage_class,
            materials,
            total_price,
            created_at,
        }
    }

    /// Ordered material list.
    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Sum of the materials' extended prices.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }
}

/// A conductor, priced per meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conductor {
    /// Conductor ID.
    pub id: Uuid,
    /// Catalog code.
    pub code: String,
    /// Conductor material (Cobre, Alumínio, AAAC).
    #[serde(rename = "type")]
    pub conductor_type: String,
    /// Insulation (XLPE, PVC).
    pub insulation: String,
    /// Cross section (`16 mm²`, `CAA 2 AWG`).
    pub section: String,
    /// Configuration (Simples, Multiplexado, Duplexado).
    pub configuration: String,
    /// Price per meter.
    pub unit_price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equipment {
    /// Equipment ID.
    pub id: Uuid,
    /// Catalog code.
    pub code: String,
    /// Category (Chave, Transformador...).
    pub category: String,
    /// Equipment type within the category.
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Description.
    pub description: String,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Hardware (clamps, bolts, insulators). Registered but never budgeted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hardware {
    /// Hardware ID.
    pub id: Uuid,
    /// Catalog code.
    pub code: String,
    /// Category (Braçadeira, Para-raios, Isolador...).
    pub category: String,
    /// Description.
    pub description: String,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Any budgetable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogItem {
    /// Pole.
    Pole(Pole),
    /// Medium-voltage structure.
    MediumVoltageStructure(Structure),
    /// Low-voltage structure.
    LowVoltageStructure(Structure),
    /// Conductor.
    Conductor(Conductor),
    /// Equipment.
    Equipment(Equipment),
}

impl CatalogItem {
    /// Item ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::Pole(p) => p.id,
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => s.id,
            Self::Conductor(c) => c.id,
            Self::Equipment(e) => e.id,
        }
    }

    /// Kind tag of this item.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Pole(_) => ItemType::Pole,
            Self::MediumVoltageStructure(_) => ItemType::MediumVoltageStructure,
            Self::LowVoltageStructure(_) => ItemType::LowVoltageStructure,
            Self::Conductor(_) => ItemType::Conductor,
            Self::Equipment(_) => ItemType::Equipment,
        }
    }

    /// Code shown in lists and copied onto line items.
    #[must_use]
    pub fn display_code(&self) -> &str {
        match self {
            Self::Pole(p) => &p.code,
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => &s.code,
            Self::Conductor(c) => &c.code,
            Self::Equipment(e) => &e.code,
        }
    }

    /// Description copied onto line items.
    ///
    /// Poles and conductors have no free-text description, so one is built
    /// from their attributes.
    #[must_use]
    pub fn display_description(&self) -> String {
        match self {
            Self::Pole(p) => format!("{} {}m {}daN", p.pole_type, p.height.normalize(), p.capacity),
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => s.description.clone(),
            Self::Conductor(c) => format!(
                "{} {} {} {}",
                c.conductor_type, c.section, c.insulation, c.configuration
            ),
            Self::Equipment(e) => e.description.clone(),
        }
    }

    /// Stored free-text description, when the kind has one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => Some(&s.description),
            Self::Equipment(e) => Some(&e.description),
            Self::Pole(_) | Self::Conductor(_) => None,
        }
    }

    /// Type attribute used by search, when the kind has one.
    #[must_use]
    pub fn type_label(&self) -> Option<&str> {
        match self {
            Self::Pole(p) => Some(&p.pole_type),
            Self::Conductor(c) => Some(&c.conductor_type),
            Self::Equipment(e) => Some(&e.equipment_type),
            Self::MediumVoltageStructure(_) | Self::LowVoltageStructure(_) => None,
        }
    }

    /// Price of one budget unit: the structure total for structures, the
    /// flat unit price otherwise.
    #[must_use]
    pub const fn effective_price(&self) -> Decimal {
        match self {
            Self::Pole(p) => p.unit_price,
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => s.total_price(),
            Self::Conductor(c) => c.unit_price,
            Self::Equipment(e) => e.unit_price,
        }
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Pole(p) => p.created_at,
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => s.created_at,
            Self::Conductor(c) => c.created_at,
            Self::Equipment(e) => e.created_at,
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Input for creating or replacing a pole.
#[derive(Debug, Clone, Deserialize)]
pub struct PoleInput {
    /// Catalog code.
    pub code: String,
    /// Pole type.
    #[serde(rename = "type")]
    pub pole_type: String,
    /// Height in meters.
    #[serde(deserialize_with = "deserialize_height")]
    pub height: Decimal,
    /// Capacity in daN.
    pub capacity: i32,
    /// Price of one pole.
    #[serde(deserialize_with = "deserialize_stored_scale")]
    pub unit_price: Decimal,
}

/// Input for creating or replacing a structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureInput {
    /// Catalog code.
    pub code: String,
    /// Description.
    pub description: String,
    /// Voltage class.
    #[serde(default)]
    pub voltage_class: String,
    /// Material list; the structure price is derived from it.
    #[serde(default)]
    pub materials: Vec<Material>,
}

/// Input for creating or replacing a conductor.
#[derive(Debug, Clone, Deserialize)]
pub struct ConductorInput {
    /// Catalog code.
    pub code: String,
    /// Conductor material.
    #[serde(rename = "type")]
    pub conductor_type: String,
    /// Insulation.
    pub insulation: String,
    /// Cross section.
    pub section: String,
    /// Configuration.
    pub configuration: String,
    /// Price per meter.
    #[serde(deserialize_with = "deserialize_stored_scale")]
    pub unit_price: Decimal,
}

/// Input for creating or replacing equipment.
#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentInput {
    /// Catalog code.
    pub code: String,
    /// Category.
    pub category: String,
    /// Type within the category.
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Description.
    pub description: String,
    /// Price of one unit.
    #[serde(deserialize_with = "deserialize_stored_scale")]
    pub unit_price: Decimal,
}

/// Input for creating or replacing hardware.
#[derive(Debug, Clone, Deserialize)]
pub struct HardwareInput {
    /// Catalog code.
    pub code: String,
    /// Category.
    pub category: String,
    /// Description.
    pub description: String,
    /// Price of one unit.
    #[serde(deserialize_with = "deserialize_stored_scale")]
    pub unit_price: Decimal,
}

/// Input for any budgetable catalog kind.
#[derive(Debug, Clone)]
pub enum CatalogItemInput {
    /// Pole.
    Pole(PoleInput),
    /// Medium-voltage structure.
    MediumVoltageStructure(StructureInput),
    /// Low-voltage structure.
    LowVoltageStructure(StructureInput),
    /// Conductor.
    Conductor(ConductorInput),
    /// Equipment.
    Equipment(EquipmentInput),
}

fn require_code(code: &str) -> Result<(), CatalogError> {
    if code.trim().is_empty() {
        return Err(CatalogError::Validation("code must not be empty".to_string()));
    }
    Ok(())
}

fn require_in_range(field: &str, value: Decimal, max: Decimal) -> Result<(), CatalogError> {
    if value < Decimal::ZERO {
        return Err(CatalogError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    if value > max {
        return Err(CatalogError::Validation(format!("{field} is too large")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> Result<(), CatalogError> {
    require_in_range(field, value, MAX_INPUT)
}

/// The structure price becomes a line unit price, so it obeys the same cap.
fn require_structure_total(materials: &[Material]) -> Result<(), CatalogError> {
    let total = materials.iter().try_fold(Decimal::ZERO, |acc, material| {
        material
            .checked_extended_price()
            .and_then(|price| acc.checked_add(price))
    });
    match total {
        Some(total) if total <= MAX_INPUT => Ok(()),
        _ => Err(CatalogError::Validation(
            "structure total_price is too large".to_string(),
        )),
    }
}

impl CatalogItemInput {
    /// Kind of item this input creates.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Pole(_) => ItemType::Pole,
            Self::MediumVoltageStructure(_) => ItemType::MediumVoltageStructure,
            Self::LowVoltageStructure(_) => ItemType::LowVoltageStructure,
            Self::Conductor(_) => ItemType::Conductor,
            Self::Equipment(_) => ItemType::Equipment,
        }
    }

    /// Parses a JSON payload for the given kind.
    pub fn from_json(kind: ItemType, value: serde_json::Value) -> Result<Self, CatalogError> {
        let invalid = |e: serde_json::Error| CatalogError::Validation(e.to_string());
        Ok(match kind {
            ItemType::Pole => Self::Pole(serde_json::from_value(value).map_err(invalid)?),
            ItemType::MediumVoltageStructure => {
                Self::MediumVoltageStructure(serde_json::from_value(value).map_err(invalid)?)
            }
            ItemType::LowVoltageStructure => {
                Self::LowVoltageStructure(serde_json::from_value(value).map_err(invalid)?)
            }
            ItemType::Conductor => {
                Self::Conductor(serde_json::from_value(value).map_err(invalid)?)
            }
            ItemType::Equipment => {
                Self::Equipment(serde_json::from_value(value).map_err(invalid)?)
            }
        })
    }

    /// Checks the code is present and every price or quantity is within
    /// `[0, MAX_INPUT]`.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self {
            Self::Pole(p) => {
                require_code(&p.code)?;
                require_in_range("height", p.height, MAX_HEIGHT)?;
                if p.capacity < 0 {
                    return Err(CatalogError::Validation(
                        "capacity must not be negative".to_string(),
                    ));
                }
                require_non_negative("unit_price", p.unit_price)
            }
            Self::MediumVoltageStructure(s) | Self::LowVoltageStructure(s) => {
                require_code(&s.code)?;
                for material in &s.materials {
                    require_code(&material.code)?;
                    require_non_negative("material quantity", material.quantity)?;
                    require_non_negative("material unit_price", material.unit_price)?;
                }
                require_structure_total(&s.materials)
            }
            Self::Conductor(c) => {
                require_code(&c.code)?;
                require_non_negative("unit_price", c.unit_price)
            }
            Self::Equipment(e) => {
                require_code(&e.code)?;
                require_non_negative("unit_price", e.unit_price)
            }
        }
    }

    /// Materializes the input as a stored item.
    #[must_use]
    pub fn into_item(self, id: Uuid, created_at: DateTime<Utc>) -> CatalogItem {
        match self {
            Self::Pole(p) => CatalogItem::Pole(Pole {
                id,
                code: p.code,
                pole_type: p.pole_type,
                height: p.height,
                capacity: p.capacity,
                unit_price: p.unit_price,
                created_at,
            }),
            Self::MediumVoltageStructure(s) => CatalogItem::MediumVoltageStructure(Structure::new(
                id,
                s.code,
                s.description,
                s.voltage_class,
                s.materials,
                created_at,
            )),
            Self::LowVoltageStructure(s) => CatalogItem::LowVoltageStructure(Structure::new(
                id,
                s.code,
                s.description,
                s.voltage_class,
                s.materials,
                created_at,
            )),
            Self::Conductor(c) => CatalogItem::Conductor(Conductor {
                id,
                code: c.code,
                conductor_type: c.conductor_type,
                insulation: c.insulation,
                section: c.section,
                configuration: c.configuration,
                unit_price: c.unit_price,
                created_at,
            }),
            Self::Equipment(e) => CatalogItem::Equipment(Equipment {
                id,
                code: e.code,
                category: e.category,
                equipment_type: e.equipment_type,
                description: e.description,
                unit_price: e.unit_price,
                created_at,
            }),
        }
    }
}

impl HardwareInput {
    /// Checks the code is present and the price is not negative.
    pub fn validate(&self) -> Result<(), CatalogError> {
        require_code(&self.code)?;
        require_non_negative("unit_price", self.unit_price)
    }

    /// Materializes the input as a stored record.
    #[must_use]
    pub fn into_hardware(self, id: Uuid, created_at: DateTime<Utc>) -> Hardware {
        Hardware {
            id,
            code: self.code,
            category: self.category,
            description: self.description,
            unit_price: self.unit_price,
            created_at,
        }
    }
}
