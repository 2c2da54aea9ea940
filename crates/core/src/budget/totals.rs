//! Budget total computation.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::BudgetError;
use super::types::{BudgetDraft, BudgetLineItem};
use crate::numeric::{parse_money_or_zero, parse_percent_or_zero};

/// Aggregate amounts of a budget.
///
/// Always derived from line items and costs; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetTotals {
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Labor cost.
    pub labor_cost: Decimal,
    /// Additional services.
    pub additional_services: Decimal,
    /// `subtotal + labor_cost + additional_services`.
    pub subtotal_with_services: Decimal,
    /// BDI percentage.
    pub bdi_percentage: Decimal,
    /// BDI applied to `subtotal_with_services`.
    pub bdi_value: Decimal,
    /// `subtotal_with_services + bdi_value`.
    pub total: Decimal,
}

impl BudgetTotals {
    /// Runs the pricing pipeline over normalized inputs.
    ///
    /// BDI applies to labor and services as well as materials.
    ///
    /// # Errors
    ///
    /// `OutOfRange` naming the first amount that overflows.
    pub fn compute(
        items: &[BudgetLineItem],
        labor_cost: Decimal,
        additional_services: Decimal,
        bdi_percentage: Decimal,
    ) -> Result<Self, BudgetError> {
        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.total_price()))
            .ok_or(BudgetError::OutOfRange("subtotal"))?;
        let subtotal_with_services = subtotal
            .checked_add(labor_cost)
            .and_then(|sum| sum.checked_add(additional_services))
            .ok_or(BudgetError::OutOfRange("subtotal_with_services"))?;
        let bdi_value = bdi_percentage
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|rate| subtotal_with_services.checked_mul(rate))
            .ok_or(BudgetError::OutOfRange("bdi_value"))?;
        let total = subtotal_with_services
            .checked_add(bdi_value)
            .ok_or(BudgetError::OutOfRange("total"))?;

        Ok(Self {
            subtotal,
            labor_cost,
            additional_services,
            subtotal_with_services,
            bdi_percentage,
            bdi_value,
            total,
        })
    }
}

/// Totals of a draft, parsing its raw cost fields with the zero fallback.
///
/// # Errors
///
/// `OutOfRange` when an amount overflows.
pub fn compute_totals(draft: &BudgetDraft) -> Result<BudgetTotals, BudgetError> {
    BudgetTotals::compute(
        draft.items(),
        parse_money_or_zero(draft.labor_cost.as_str()),
        parse_money_or_zero(draft.additional_services.as_str()),
        parse_percent_or_zero(draft.bdi_percentage.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::BudgetSubmission;
    use crate::catalog::ItemType;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn line(quantity: Decimal, unit_price: Decimal) -> BudgetLineItem {
        BudgetLineItem::new(
            Uuid::new_v4(),
            ItemType::Equipment,
            "EQ".to_string(),
            String::new(),
            quantity,
            unit_price,
        )
        .unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let items = [line(dec!(3), dec!(850.00)), line(dec!(1), dec!(12.50))];
        let totals = BudgetTotals::compute(&items, dec!(200), dec!(50), dec!(25)).unwrap();

        assert_eq!(totals.subtotal, dec!(2562.50));
        assert_eq!(totals.subtotal_with_services, dec!(2812.50));
        assert_eq!(totals.bdi_value, dec!(703.125));
        assert_eq!(totals.total, dec!(3515.625));
    }

    #[test]
    fn test_empty_items_with_costs() {
        let totals = BudgetTotals::compute(&[], dec!(100), dec!(0), dec!(10)).unwrap();
        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.bdi_value, dec!(10));
        assert_eq!(totals.total, dec!(110));
    }

    #[test]
    fn test_draft_with_garbage_costs_falls_back_to_zero() {
        let draft = BudgetSubmission {
            labor_cost: "abc".into(),
            additional_services: "".into(),
            bdi_percentage: "-5".into(),
            ..BudgetSubmission::default()
        }
        .into_draft()
        .unwrap();

        let totals = compute_totals(&draft).unwrap();
        assert_eq!(totals.labor_cost, dec!(0));
        assert_eq!(totals.additional_services, dec!(0));
        assert_eq!(totals.bdi_percentage, dec!(0));
        assert_eq!(totals.total, dec!(0));
    }

    #[test]
    fn test_bdi_above_hundred_is_clamped() {
        let draft = BudgetSubmission {
            labor_cost: "100".into(),
            bdi_percentage: "250".into(),
            ..BudgetSubmission::default()
        }
        .into_draft()
        .unwrap();

        let totals = compute_totals(&draft).unwrap();
        assert_eq!(totals.bdi_percentage, dec!(100));
        assert_eq!(totals.total, dec!(200));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let items = [line(dec!(2), dec!(400.00))];
        let first = BudgetTotals::compute(&items, dec!(10), dec!(20), dec!(5)).unwrap();
        let second = BudgetTotals::compute(&items, dec!(10), dec!(20), dec!(5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflowing_subtotal_is_out_of_range() {
        let items: Vec<_> = (0..80_000)
            .map(|_| line(dec!(1000000000000), dec!(1000000000000)))
            .collect();
        let result = BudgetTotals::compute(&items, dec!(0), dec!(0), dec!(0));
        assert!(matches!(result, Err(BudgetError::OutOfRange("subtotal"))));
    }
}
