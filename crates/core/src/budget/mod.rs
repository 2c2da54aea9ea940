//! Budget composition and pricing.
//!
//! A [`BudgetComposer`] edits one [`BudgetDraft`] at a time. Totals are never
//! stored: [`compute_totals`] derives them from the current lines and costs
//! every time they are needed, and a persisted [`Budget`] recomputes them when
//! it is assembled.

pub mod composer;
pub mod error;
pub mod totals;
pub mod types;

#[cfg(test)]
mod tests;

pub use composer::BudgetComposer;
pub use error::BudgetError;
pub use totals::{BudgetTotals, compute_totals};
pub use types::{
    Budget, BudgetDraft, BudgetLineItem, BudgetSubmission, DraftPatch, LineItemInput, NewBudget,
};
