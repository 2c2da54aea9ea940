//! Draft editing and submission.

use uuid::Uuid;

use super::error::BudgetError;
use super::totals::{BudgetTotals, compute_totals};
use super::types::{Budget, BudgetDraft, BudgetLineItem, DraftPatch, NewBudget};
use crate::catalog::{CatalogItem, ItemType};
use crate::numeric::parse_quantity_or_zero;
use crate::store::{BudgetStore, CatalogStore, StoreError};

/// Builds one budget at a time from catalog selections.
///
/// Every mutation takes `&mut self`, so a draft is never edited while a
/// store call on it is outstanding.
#[derive(Debug, Clone, Default)]
pub struct BudgetComposer {
    draft: BudgetDraft,
}

impl BudgetComposer {
    /// Creates a composer with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes editing an existing draft.
    #[must_use]
    pub const fn from_draft(draft: BudgetDraft) -> Self {
        Self { draft }
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &BudgetDraft {
        &self.draft
    }

    /// Updates the draft's header fields.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the new costs make the totals overflow; the draft is
    /// left unchanged.
    pub fn update_details(&mut self, patch: DraftPatch) -> Result<(), BudgetError> {
        let before = self.draft.clone();
        self.draft.apply(patch);
        if let Err(e) = compute_totals(&self.draft) {
            self.draft = before;
            return Err(e);
        }
        Ok(())
    }

    /// Appends a line for `item` with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateItem` if the item is already in the draft and
    /// `OutOfRange` if its price or the new totals overflow. The draft is
    /// left unchanged on error.
    pub fn add_item(&mut self, item: &CatalogItem) -> Result<&BudgetLineItem, BudgetError> {
        let index = self.draft.push_line(BudgetLineItem::from_catalog(item)?)?;
        if let Err(e) = compute_totals(&self.draft) {
            self.draft.remove_line(index)?;
            return Err(e);
        }
        self.draft.line(index)
    }

    /// Looks an item up in the catalog and appends it.
    pub async fn add_from_catalog<C: CatalogStore + ?Sized>(
        &mut self,
        catalog: &C,
        kind: ItemType,
        item_id: Uuid,
    ) -> Result<&BudgetLineItem, BudgetError> {
        if self.draft.contains_item(item_id) {
            let code = self
                .draft
                .items()
                .iter()
                .find(|line| line.item_id() == item_id)
                .map(|line| line.code().to_string())
                .unwrap_or_default();
            return Err(BudgetError::DuplicateItem { item_id, code });
        }
        let item = catalog.find(kind, item_id).await.map_err(|e| match e {
            StoreError::NotFound(id) => BudgetError::ItemNotFound { kind, id },
            other => BudgetError::Store(other),
        })?;
        self.add_item(&item)
    }

    /// Sets a line's quantity from raw input.
    ///
    /// Unparseable or negative input sets the quantity to zero. A quantity
    /// whose line or draft totals overflow is rejected with `OutOfRange` and
    /// the previous quantity is kept.
    pub fn update_quantity(
        &mut self,
        index: usize,
        raw_quantity: &str,
    ) -> Result<&BudgetLineItem, BudgetError> {
        let line = self.draft.line_mut(index)?;
        let previous = line.quantity();
        line.set_quantity(parse_quantity_or_zero(raw_quantity))?;
        if let Err(e) = compute_totals(&self.draft) {
            self.draft.line_mut(index)?.set_quantity(previous)?;
            return Err(e);
        }
        self.draft.line(index)
    }

    /// Removes a line, keeping the order of the others.
    pub fn remove_item(&mut self, index: usize) -> Result<BudgetLineItem, BudgetError> {
        self.draft.remove_line(index)
    }

    /// Totals of the current draft.
    pub fn totals(&self) -> Result<BudgetTotals, BudgetError> {
        compute_totals(&self.draft)
    }

    /// Validates the draft and hands it to the store.
    ///
    /// On success the composer starts over with an empty draft. On any
    /// failure the draft is kept as it was so the operator can retry.
    ///
    /// # Errors
    ///
    /// `EmptyBudget` without items, `Validation` when a name is blank, and
    /// `Store` when persistence fails.
    pub async fn submit<S: BudgetStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<Budget, BudgetError> {
        let budget = NewBudget::from_draft(&self.draft)?;
        let created = store.create(budget).await.map_err(BudgetError::Store)?;
        self.draft = BudgetDraft::default();
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogItemInput, ConductorInput, Material, PoleInput, Structure, StructureInput,
    };
    use crate::numeric::MAX_INPUT;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn pole() -> CatalogItem {
        CatalogItemInput::Pole(PoleInput {
            code: "PC-10-500".to_string(),
            pole_type: "Concreto".to_string(),
            height: dec!(10),
            capacity: 500,
            unit_price: dec!(850.00),
        })
        .into_item(Uuid::new_v4(), Utc::now())
    }

    fn conductor() -> CatalogItem {
        CatalogItemInput::Conductor(ConductorInput {
            code: "CD-CU-4AWG".to_string(),
            conductor_type: "Cobre".to_string(),
            insulation: "XLPE".to_string(),
            section: "4 AWG".to_string(),
            configuration: "Simples".to_string(),
            unit_price: dec!(12.50),
        })
        .into_item(Uuid::new_v4(), Utc::now())
    }

    fn structure_input() -> CatalogItemInput {
        let material = |code: &str, quantity, unit_price| Material {
            code: code.to_string(),
            description: code.to_string(),
            unit: "pç".to_string(),
            quantity,
            unit_price,
        };
        CatalogItemInput::MediumVoltageStructure(StructureInput {
            code: "CE1".to_string(),
            description: "Estrutura CE1".to_string(),
            voltage_class: "13.8kV".to_string(),
            materials: vec![
                material("PAR", dec!(2), dec!(50.00)),
                material("BRACO", dec!(1), dec!(300.00)),
            ],
        })
    }

    fn named(composer: &mut BudgetComposer) {
        composer.update_details(DraftPatch {
            project_name: Some("Rede Rural".to_string()),
            client_name: Some("Prefeitura".to_string()),
            labor_cost: Some("200".into()),
            additional_services: Some("50".into()),
            bdi_percentage: Some("25".into()),
            notes: None,
        })
        .unwrap();
    }

    #[test]
    fn test_reference_scenario() {
        let mut composer = BudgetComposer::new();
        let line = composer.add_item(&pole()).unwrap();
        assert_eq!(line.quantity(), dec!(1));
        assert_eq!(line.total_price(), dec!(850.00));

        let line = composer.update_quantity(0, "3").unwrap();
        assert_eq!(line.total_price(), dec!(2550.00));

        composer.add_item(&conductor()).unwrap();
        named(&mut composer);

        let totals = composer.totals().unwrap();
        assert_eq!(totals.subtotal, dec!(2562.50));
        assert_eq!(totals.subtotal_with_services, dec!(2812.50));
        assert_eq!(totals.bdi_value, dec!(703.125));
        assert_eq!(totals.total, dec!(3515.625));
    }

    #[test]
    fn test_structure_line_uses_structure_total() {
        let structure = structure_input().into_item(Uuid::new_v4(), Utc::now());
        let mut composer = BudgetComposer::new();

        let line = composer.add_item(&structure).unwrap();
        assert_eq!(line.unit_price(), dec!(400.00));
        assert_eq!(line.total_price(), dec!(400.00));

        let line = composer.update_quantity(0, "2").unwrap();
        assert_eq!(line.total_price(), dec!(800.00));
    }

    #[test]
    fn test_duplicate_item_is_rejected() {
        let item = pole();
        let mut composer = BudgetComposer::new();
        composer.add_item(&item).unwrap();

        let result = composer.add_item(&item);
        assert!(matches!(result, Err(BudgetError::DuplicateItem { .. })));
        assert_eq!(composer.draft().items().len(), 1);
    }

    #[test]
    fn test_bad_quantity_becomes_zero() {
        let mut composer = BudgetComposer::new();
        composer.add_item(&pole()).unwrap();

        for raw in ["abc", ""] {
            let line = composer.update_quantity(0, raw).unwrap();
            assert_eq!(line.quantity(), dec!(0));
            assert_eq!(line.total_price(), dec!(0));
        }
    }

    #[test]
    fn test_update_out_of_range_line() {
        let mut composer = BudgetComposer::new();
        assert!(matches!(
            composer.update_quantity(0, "2"),
            Err(BudgetError::LineNotFound(0))
        ));
        assert!(matches!(
            composer.remove_item(3),
            Err(BudgetError::LineNotFound(3))
        ));
    }

    #[test]
    fn test_remove_keeps_order() {
        let (a, b, c) = (pole(), conductor(), structure_input().into_item(Uuid::new_v4(), Utc::now()));
        let mut composer = BudgetComposer::new();
        for item in [&a, &b, &c] {
            composer.add_item(item).unwrap();
        }

        let removed = composer.remove_item(1).unwrap();
        assert_eq!(removed.item_id(), b.id());

        let ids: Vec<_> = composer.draft().items().iter().map(BudgetLineItem::item_id).collect();
        assert_eq!(ids, vec![a.id(), c.id()]);
    }

    #[tokio::test]
    async fn test_submit_empty_budget_fails() {
        let store = MemoryStore::new();
        let mut composer = BudgetComposer::new();
        named(&mut composer);

        let result = composer.submit(&store).await;
        assert!(matches!(result, Err(BudgetError::EmptyBudget)));
    }

    #[tokio::test]
    async fn test_submit_requires_names() {
        let store = MemoryStore::new();
        let mut composer = BudgetComposer::new();
        composer.add_item(&pole()).unwrap();
        composer.update_details(DraftPatch {
            project_name: Some("   ".to_string()),
            client_name: Some("Cliente".to_string()),
            ..DraftPatch::default()
        })
        .unwrap();

        let result = composer.submit(&store).await;
        assert!(matches!(result, Err(BudgetError::Validation(_))));
        assert_eq!(composer.draft().items().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_persists_and_resets() {
        let store = MemoryStore::new();
        let mut composer = BudgetComposer::new();
        composer.add_item(&pole()).unwrap();
        composer.update_quantity(0, "3").unwrap();
        composer.add_item(&conductor()).unwrap();
        named(&mut composer);
        let expected_items = composer.draft().items().to_vec();
        let expected_totals = composer.totals().unwrap();

        let budget = composer.submit(&store).await.unwrap();
        assert_eq!(budget.items(), expected_items.as_slice());
        assert_eq!(budget.totals(), &expected_totals);
        assert!(composer.draft().items().is_empty());
        assert!(composer.draft().project_name.is_empty());

        let fetched = store.get(budget.id).await.unwrap();
        assert_eq!(fetched.items(), expected_items.as_slice());
        assert_eq!(fetched.totals().subtotal, dec!(2562.50));
        assert_eq!(fetched.totals().total, dec!(3515.625));
    }

    /// Budget store whose writes always fail.
    struct UnavailableStore;

    #[async_trait::async_trait]
    impl BudgetStore for UnavailableStore {
        async fn create(&self, _budget: NewBudget) -> Result<Budget, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn get(&self, id: Uuid) -> Result<Budget, StoreError> {
            Err(StoreError::NotFound(id))
        }

        async fn list(&self) -> Result<Vec<Budget>, StoreError> {
            Ok(Vec::new())
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
            Err(StoreError::NotFound(id))
        }
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let store = UnavailableStore;
        let mut composer = BudgetComposer::new();
        composer.add_item(&pole()).unwrap();
        named(&mut composer);
        let before = composer.draft().clone();

        let result = composer.submit(&store).await;
        assert!(matches!(result, Err(BudgetError::Store(_))));
        assert_eq!(composer.draft(), &before);
    }

    #[test]
    fn test_overpriced_structure_is_rejected() {
        let huge = Material {
            code: "CABO".to_string(),
            description: "Cabo".to_string(),
            unit: "m".to_string(),
            quantity: MAX_INPUT,
            unit_price: MAX_INPUT,
        };
        let structure = CatalogItem::MediumVoltageStructure(Structure::new(
            Uuid::new_v4(),
            "CE9".to_string(),
            String::new(),
            String::new(),
            vec![huge],
            Utc::now(),
        ));
        let mut composer = BudgetComposer::new();

        assert!(matches!(
            composer.add_item(&structure),
            Err(BudgetError::OutOfRange("unit_price"))
        ));
        assert!(composer.draft().items().is_empty());
    }

    #[test]
    fn test_largest_quantity_at_largest_price_stays_exact() {
        let pole = CatalogItemInput::Pole(PoleInput {
            code: "ESP".to_string(),
            pole_type: "Especial".to_string(),
            height: dec!(30),
            capacity: 5000,
            unit_price: MAX_INPUT,
        })
        .into_item(Uuid::new_v4(), Utc::now());
        let mut composer = BudgetComposer::new();
        composer.add_item(&pole).unwrap();

        let line = composer.update_quantity(0, "1000000000000").unwrap();
        assert_eq!(line.total_price(), MAX_INPUT * MAX_INPUT);

        let line = composer.update_quantity(0, "1e28").unwrap();
        assert_eq!(line.quantity(), dec!(0));
    }

    #[test]
    fn test_quantity_rounds_to_stored_scale() {
        let mut composer = BudgetComposer::new();
        composer.add_item(&pole()).unwrap();

        let line = composer.update_quantity(0, "1.23456").unwrap();
        assert_eq!(line.quantity(), dec!(1.2346));
        assert_eq!(line.total_price(), dec!(1049.41));
    }

    #[tokio::test]
    async fn test_add_from_catalog_snapshots_item() {
        let store = MemoryStore::new();
        let created = CatalogStore::create(&store, structure_input()).await.unwrap();
        let mut composer = BudgetComposer::new();

        let line = composer
            .add_from_catalog(&store, ItemType::MediumVoltageStructure, created.id())
            .await
            .unwrap();
        assert_eq!(line.code(), "CE1");
        assert_eq!(line.unit_price(), dec!(400.00));

        CatalogStore::delete(&store, ItemType::MediumVoltageStructure, created.id())
            .await
            .unwrap();
        assert_eq!(composer.draft().items()[0].unit_price(), dec!(400.00));
        assert_eq!(composer.totals().unwrap().subtotal, dec!(400.00));
    }

    #[tokio::test]
    async fn test_add_from_catalog_unknown_item() {
        let store = MemoryStore::new();
        let mut composer = BudgetComposer::new();

        let result = composer
            .add_from_catalog(&store, ItemType::Pole, Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(BudgetError::ItemNotFound { .. })));
    }
}
