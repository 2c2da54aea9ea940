//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::BudgetError;
use super::totals::{BudgetTotals, compute_totals};
use crate::catalog::{CatalogItem, ItemType};
use crate::numeric::{
    MAX_INPUT, RawInput, parse_money_or_zero, parse_percent_or_zero, parse_quantity_or_zero,
    to_stored_scale,
};

/// One priced row of a budget.
///
/// Code, description and unit price are copied from the catalog when the
/// line is created and never follow later catalog edits. `total_price` is
/// recomputed on every quantity change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLineItem {
    item_id: Uuid,
    item_type: ItemType,
    code: String,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    total_price: Decimal,
}

impl BudgetLineItem {
    /// Builds a line; negative quantities are stored as zero.
    ///
    /// Quantity and price are rounded to the stored scale.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the price is negative, or when the quantity or price
    /// exceeds [`MAX_INPUT`].
    pub fn new(
        item_id: Uuid,
        item_type: ItemType,
        code: String,
        description: String,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<Self, BudgetError> {
        let unit_price = to_stored_scale(unit_price);
        if unit_price < Decimal::ZERO || unit_price > MAX_INPUT {
            return Err(BudgetError::OutOfRange("unit_price"));
        }
        let mut line = Self {
            item_id,
            item_type,
            code,
            description,
            quantity: Decimal::ZERO,
            unit_price,
            total_price: Decimal::ZERO,
        };
        line.set_quantity(quantity)?;
        Ok(line)
    }

    /// Snapshots a catalog item with quantity 1.
    ///
    /// Structures are priced as whole assemblies: their `total_price` becomes
    /// the line's unit price.
    pub fn from_catalog(item: &CatalogItem) -> Result<Self, BudgetError> {
        Self::new(
            item.id(),
            item.item_type(),
            item.display_code().to_string(),
            item.display_description(),
            Decimal::ONE,
            item.effective_price(),
        )
    }

    /// Originating catalog item.
    #[must_use]
    pub const fn item_id(&self) -> Uuid {
        self.item_id
    }

    /// Catalog kind of the originating item.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Code copied at selection time.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Description copied at selection time.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Price copied at selection time.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `quantity × unit_price`.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Leaves the line unchanged on error.
    pub(crate) fn set_quantity(&mut self, quantity: Decimal) -> Result<(), BudgetError> {
        let quantity = to_stored_scale(quantity.max(Decimal::ZERO));
        if quantity > MAX_INPUT {
            return Err(BudgetError::OutOfRange("quantity"));
        }
        self.total_price = quantity
            .checked_mul(self.unit_price)
            .ok_or(BudgetError::OutOfRange("total_price"))?;
        self.quantity = quantity;
        Ok(())
    }
}

fn default_quantity() -> RawInput {
    RawInput::from("1")
}

/// Line item as submitted by a client.
///
/// Any client-computed `total_price` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemInput {
    /// Originating catalog item.
    pub item_id: Uuid,
    /// Catalog kind.
    pub item_type: ItemType,
    /// Code.
    pub code: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Quantity; unparseable input counts as zero.
    #[serde(default = "default_quantity")]
    pub quantity: RawInput,
    /// Price of one unit.
    pub unit_price: Decimal,
}

impl TryFrom<LineItemInput> for BudgetLineItem {
    type Error = BudgetError;

    fn try_from(input: LineItemInput) -> Result<Self, Self::Error> {
        Self::new(
            input.item_id,
            input.item_type,
            input.code,
            input.description,
            parse_quantity_or_zero(input.quantity.as_str()),
            input.unit_price,
        )
    }
}

/// An in-progress budget.
///
/// Cost fields keep the operator's raw text; they are only interpreted when
/// totals are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetDraft {
    /// Project name.
    pub project_name: String,
    /// Client name.
    pub client_name: String,
    items: Vec<BudgetLineItem>,
    /// Labor cost as typed.
    pub labor_cost: RawInput,
    /// Additional services as typed.
    pub additional_services: RawInput,
    /// BDI percentage as typed.
    pub bdi_percentage: RawInput,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl BudgetDraft {
    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[BudgetLineItem] {
        &self.items
    }

    /// Whether a line already references this catalog item.
    #[must_use]
    pub fn contains_item(&self, item_id: Uuid) -> bool {
        self.items.iter().any(|line| line.item_id == item_id)
    }

    /// Appends a line and returns its index.
    pub(crate) fn push_line(&mut self, line: BudgetLineItem) -> Result<usize, BudgetError> {
        if self.contains_item(line.item_id) {
            return Err(BudgetError::DuplicateItem {
                item_id: line.item_id,
                code: line.code,
            });
        }
        self.items.push(line);
        Ok(self.items.len() - 1)
    }

    pub(crate) fn line(&self, index: usize) -> Result<&BudgetLineItem, BudgetError> {
        self.items.get(index).ok_or(BudgetError::LineNotFound(index))
    }

    pub(crate) fn line_mut(&mut self, index: usize) -> Result<&mut BudgetLineItem, BudgetError> {
        self.items
            .get_mut(index)
            .ok_or(BudgetError::LineNotFound(index))
    }

    pub(crate) fn remove_line(&mut self, index: usize) -> Result<BudgetLineItem, BudgetError> {
        if index >= self.items.len() {
            return Err(BudgetError::LineNotFound(index));
        }
        Ok(self.items.remove(index))
    }

    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: DraftPatch) {
        if let Some(project_name) = patch.project_name {
            self.project_name = project_name;
        }
        if let Some(client_name) = patch.client_name {
            self.client_name = client_name;
        }
        if let Some(labor_cost) = patch.labor_cost {
            self.labor_cost = labor_cost;
        }
        if let Some(additional_services) = patch.additional_services {
            self.additional_services = additional_services;
        }
        if let Some(bdi_percentage) = patch.bdi_percentage {
            self.bdi_percentage = bdi_percentage;
        }
        if let Some(notes) = patch.notes {
            self.notes = (!notes.trim().is_empty()).then_some(notes);
        }
    }
}

/// Partial update of a draft's header fields.
///
/// An empty `notes` string clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftPatch {
    /// Project name.
    pub project_name: Option<String>,
    /// Client name.
    pub client_name: Option<String>,
    /// Labor cost.
    pub labor_cost: Option<RawInput>,
    /// Additional services.
    pub additional_services: Option<RawInput>,
    /// BDI percentage.
    pub bdi_percentage: Option<RawInput>,
    /// Notes.
    pub notes: Option<String>,
}

/// A whole draft submitted in one request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetSubmission {
    /// Project name.
    #[serde(default)]
    pub project_name: String,
    /// Client name.
    #[serde(default)]
    pub client_name: String,
    /// Line items.
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    /// Labor cost.
    #[serde(default)]
    pub labor_cost: RawInput,
    /// Additional services.
    #[serde(default)]
    pub additional_services: RawInput,
    /// BDI percentage.
    #[serde(default)]
    pub bdi_percentage: RawInput,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl BudgetSubmission {
    /// Rebuilds the draft, rejecting repeated catalog items and amounts
    /// whose totals cannot be computed.
    pub fn into_draft(self) -> Result<BudgetDraft, BudgetError> {
        let mut draft = BudgetDraft {
            project_name: self.project_name,
            client_name: self.client_name,
            items: Vec::with_capacity(self.items.len()),
            labor_cost: self.labor_cost,
            additional_services: self.additional_services,
            bdi_percentage: self.bdi_percentage,
            notes: self.notes,
        };
        for input in self.items {
            draft.push_line(BudgetLineItem::try_from(input)?)?;
        }
        compute_totals(&draft)?;
        Ok(draft)
    }
}

/// A validated budget ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    /// Project name, trimmed.
    pub project_name: String,
    /// Client name, trimmed.
    pub client_name: String,
    /// Line items in display order.
    pub items: Vec<BudgetLineItem>,
    /// Labor cost.
    pub labor_cost: Decimal,
    /// Additional services.
    pub additional_services: Decimal,
    /// BDI percentage in `[0, 100]`.
    pub bdi_percentage: Decimal,
    /// Notes.
    pub notes: Option<String>,
}

impl NewBudget {
    /// Validates a draft for submission.
    ///
    /// An empty item list is reported before missing names, and the totals
    /// must be computable.
    pub fn from_draft(draft: &BudgetDraft) -> Result<Self, BudgetError> {
        if draft.items.is_empty() {
            return Err(BudgetError::EmptyBudget);
        }
        let project_name = draft.project_name.trim();
        if project_name.is_empty() {
            return Err(BudgetError::Validation(
                "project_name must not be empty".to_string(),
            ));
        }
        let client_name = draft.client_name.trim();
        if client_name.is_empty() {
            return Err(BudgetError::Validation(
                "client_name must not be empty".to_string(),
            ));
        }

        let budget = Self {
            project_name: project_name.to_string(),
            client_name: client_name.to_string(),
            items: draft.items.clone(),
            labor_cost: parse_money_or_zero(draft.labor_cost.as_str()),
            additional_services: parse_money_or_zero(draft.additional_services.as_str()),
            bdi_percentage: parse_percent_or_zero(draft.bdi_percentage.as_str()),
            notes: draft.notes.clone().filter(|n| !n.trim().is_empty()),
        };
        budget.totals()?;
        Ok(budget)
    }

    /// Totals of this budget, with costs at the stored scale.
    pub fn totals(&self) -> Result<BudgetTotals, BudgetError> {
        BudgetTotals::compute(
            &self.items,
            to_stored_scale(self.labor_cost),
            to_stored_scale(self.additional_services),
            to_stored_scale(self.bdi_percentage),
        )
    }
}

/// A persisted budget.
///
/// Totals are derived from the items and costs whenever the value is built;
/// they are never read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    /// Budget ID.
    pub id: Uuid,
    /// Project name.
    pub project_name: String,
    /// Client name.
    pub client_name: String,
    items: Vec<BudgetLineItem>,
    #[serde(flatten)]
    totals: BudgetTotals,
    /// Notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Assembles a stored budget and recomputes its totals.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the totals overflow.
    pub fn assemble(
        id: Uuid,
        created_at: DateTime<Utc>,
        budget: NewBudget,
    ) -> Result<Self, BudgetError> {
        let totals = budget.totals()?;
        Ok(Self {
            id,
            project_name: budget.project_name,
            client_name: budget.client_name,
            items: budget.items,
            totals,
            notes: budget.notes,
            created_at,
        })
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[BudgetLineItem] {
        &self.items
    }

    /// Derived totals.
    #[must_use]
    pub const fn totals(&self) -> &BudgetTotals {
        &self.totals
    }
}
