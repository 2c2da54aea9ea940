//! Enumerated choices for catalog-entry forms.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Option-related errors.
#[derive(Debug, Error)]
pub enum OptionError {
    /// Unknown category name.
    #[error("Unknown option category: {0}")]
    UnknownCategory(String),

    /// Blank value or label.
    #[error("{0} must not be empty")]
    Blank(&'static str),
}

impl From<OptionError> for gridbudget_shared::AppError {
    fn from(err: OptionError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Dropdown categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    /// Pole types.
    PoleTypes,
    /// Conductor materials.
    ConductorTypes,
    /// Conductor insulation.
    ConductorInsulation,
    /// Conductor configuration.
    ConductorConfiguration,
    /// Equipment categories.
    EquipmentCategories,
}

impl OptionCategory {
    /// Every category.
    pub const ALL: [Self; 5] = [
        Self::PoleTypes,
        Self::ConductorTypes,
        Self::ConductorInsulation,
        Self::ConductorConfiguration,
        Self::EquipmentCategories,
    ];

    /// Stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PoleTypes => "pole_types",
            Self::ConductorTypes => "conductor_types",
            Self::ConductorInsulation => "conductor_insulation",
            Self::ConductorConfiguration => "conductor_configuration",
            Self::EquipmentCategories => "equipment_categories",
        }
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionCategory {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| OptionError::UnknownCategory(s.to_string()))
    }
}

/// A stored dropdown option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    /// Option ID.
    pub id: Uuid,
    /// Category.
    pub category: OptionCategory,
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for a new option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDropdownOption {
    /// Category.
    pub category: OptionCategory,
    /// Stored value.
    pub value: String,
    /// Display label; defaults to the value.
    #[serde(default)]
    pub label: String,
}

impl NewDropdownOption {
    /// Builds an option input.
    #[must_use]
    pub fn new(category: OptionCategory, value: &str, label: &str) -> Self {
        Self {
            category,
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// Trims fields and fills a missing label from the value.
    pub fn normalized(self) -> Result<Self, OptionError> {
        let value = self.value.trim().to_string();
        if value.is_empty() {
            return Err(OptionError::Blank("value"));
        }
        let label = match self.label.trim() {
            "" => value.clone(),
            label => label.to_string(),
        };
        Ok(Self {
            category: self.category,
            value,
            label,
        })
    }

    /// Materializes the input as a stored option.
    #[must_use]
    pub fn into_option(self, id: Uuid, created_at: DateTime<Utc>) -> DropdownOption {
        DropdownOption {
            id,
            category: self.category,
            value: self.value,
            label: self.label,
            created_at,
        }
    }
}

/// Options installed on a fresh database.
#[must_use]
pub fn default_options() -> Vec<NewDropdownOption> {
    use OptionCategory::{
        ConductorConfiguration, ConductorInsulation, ConductorTypes, EquipmentCategories, PoleTypes,
    };

    [
        (PoleTypes, "Concreto", "Concreto"),
        (PoleTypes, "Fibra", "Fibra"),
        (PoleTypes, "Duplo T", "Duplo T"),
        (PoleTypes, "Especial", "Especial"),
        (ConductorTypes, "Cobre", "Cobre (Cu)"),
        (ConductorTypes, "Alumínio", "Alumínio (Al)"),
        (ConductorTypes, "AAAC", "AAAC"),
        (ConductorInsulation, "XLPE", "XLPE"),
        (ConductorInsulation, "PVC", "PVC"),
        (ConductorConfiguration, "Simples", "Simples"),
        (ConductorConfiguration, "Multiplexado", "Multiplexado"),
        (ConductorConfiguration, "Duplexado", "Duplexado"),
        (EquipmentCategories, "Chave", "Chave"),
        (EquipmentCategories, "Transformador", "Transformador"),
        (EquipmentCategories, "Capacitor", "Capacitor"),
        (EquipmentCategories, "Religador", "Religador"),
        (EquipmentCategories, "Regulador", "Regulador de Tensão"),
    ]
    .into_iter()
    .map(|(category, value, label)| NewDropdownOption::new(category, value, label))
    .collect()
}
