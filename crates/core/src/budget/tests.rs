//! Property-based tests for budget module.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::composer::BudgetComposer;
use super::totals::BudgetTotals;
use super::types::{Budget, BudgetLineItem, DraftPatch, NewBudget};
use crate::catalog::{CatalogItemInput, EquipmentInput};

/// Amount in cents, up to one million.
fn money() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Quantity with up to three decimals.
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|thousandths| Decimal::new(thousandths, 3))
}

/// Percentage with up to two decimals, in [0, 100].
fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn lines() -> impl Strategy<Value = Vec<BudgetLineItem>> {
    prop::collection::vec((quantity(), money()), 0..20).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(q, p)| {
                BudgetLineItem::new(
                    Uuid::new_v4(),
                    crate::catalog::ItemType::Equipment,
                    "EQ".to_string(),
                    String::new(),
                    q,
                    p,
                )
                .unwrap()
            })
            .collect()
    })
}

fn equipment(unit_price: Decimal) -> crate::catalog::CatalogItem {
    CatalogItemInput::Equipment(EquipmentInput {
        code: "CH-FACA-15KV".to_string(),
        category: "Chave".to_string(),
        equipment_type: "Faca".to_string(),
        description: "Chave Faca 15kV".to_string(),
        unit_price,
    })
    .into_item(Uuid::new_v4(), Utc::now())
}

proptest! {
    /// Every line total is exactly quantity × unit price.
    #[test]
    fn test_line_total_is_exact_product(q in quantity(), p in money()) {
        let line = BudgetLineItem::new(
            Uuid::new_v4(),
            crate::catalog::ItemType::Pole,
            "P".to_string(),
            String::new(),
            q,
            p,
        )
        .unwrap();
        prop_assert_eq!(line.total_price(), q * p);
    }

    /// Subtotal is the sum of line totals and the total pipeline holds.
    #[test]
    fn test_totals_pipeline(
        items in lines(),
        labor in money(),
        services in money(),
        bdi in percent(),
    ) {
        let totals = BudgetTotals::compute(&items, labor, services, bdi).unwrap();
        let subtotal: Decimal = items.iter().map(BudgetLineItem::total_price).sum();

        prop_assert_eq!(totals.subtotal, subtotal);
        prop_assert_eq!(totals.subtotal_with_services, subtotal + labor + services);
        prop_assert_eq!(
            totals.bdi_value,
            (subtotal + labor + services) * (bdi / Decimal::ONE_HUNDRED)
        );
        prop_assert_eq!(totals.total, subtotal + labor + services + totals.bdi_value);
    }

    /// Quantity edits keep the line product invariant, whatever the input.
    #[test]
    fn test_quantity_edit_keeps_invariant(price in money(), raw in ".{0,12}") {
        let mut composer = BudgetComposer::new();
        composer.add_item(&equipment(price)).unwrap();

        let line = composer.update_quantity(0, &raw).unwrap();
        prop_assert!(line.quantity() >= Decimal::ZERO);
        prop_assert_eq!(line.total_price(), line.quantity() * line.unit_price());
    }

    /// Re-adding the same item never changes the line count.
    #[test]
    fn test_duplicate_add_leaves_draft_unchanged(count in 1usize..8) {
        let mut composer = BudgetComposer::new();
        let items: Vec<_> = (0..count).map(|_| equipment(Decimal::ONE)).collect();
        for item in &items {
            composer.add_item(item).unwrap();
        }
        for item in &items {
            prop_assert!(composer.add_item(item).is_err());
        }
        prop_assert_eq!(composer.draft().items().len(), count);
    }

    /// A stored budget reproduces the draft's items and totals.
    #[test]
    fn test_assembled_budget_matches_draft(
        prices in prop::collection::vec(money(), 1..10),
        labor in money(),
        bdi in percent(),
    ) {
        let mut composer = BudgetComposer::new();
        for price in &prices {
            composer.add_item(&equipment(*price)).unwrap();
        }
        composer.update_details(DraftPatch {
            project_name: Some("Projeto".to_string()),
            client_name: Some("Cliente".to_string()),
            labor_cost: Some(labor.into()),
            bdi_percentage: Some(bdi.into()),
            ..DraftPatch::default()
        })
        .unwrap();

        let expected = composer.totals().unwrap();
        let new_budget = NewBudget::from_draft(composer.draft()).unwrap();
        let budget = Budget::assemble(Uuid::new_v4(), Utc::now(), new_budget).unwrap();

        prop_assert_eq!(budget.items(), composer.draft().items());
        prop_assert_eq!(budget.totals(), &expected);
    }
}
