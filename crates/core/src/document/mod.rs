//! Budget documents for download.
//!
//! Rendering is behind [`DocumentRenderer`] so a PDF engine can be plugged in
//! without touching the API. [`TextRenderer`] ships as the default.

use std::fmt::Write as _;

use thiserror::Error;

use crate::budget::Budget;
use crate::numeric::format_money;

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer failed to produce a document.
    #[error("Failed to render budget document: {0}")]
    Failed(String),
}

impl From<RenderError> for gridbudget_shared::AppError {
    fn from(err: RenderError) -> Self {
        Self::ExternalService(err.to_string())
    }
}

/// Turns a persisted budget into a downloadable document.
pub trait DocumentRenderer: Send + Sync {
    /// MIME type of the output.
    fn content_type(&self) -> &'static str;

    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Renders the budget.
    fn render(&self, budget: &Budget) -> Result<Vec<u8>, RenderError>;
}

/// Download name: `orcamento_<project>_<first 8 chars of id>.<ext>`.
///
/// Whitespace runs in the project name become a single underscore.
#[must_use]
pub fn export_file_name(budget: &Budget, extension: &str) -> String {
    let project = budget.project_name.split_whitespace().collect::<Vec<_>>().join("_");
    let id = budget.id.to_string();
    let short_id = id.get(..8).unwrap_or(&id);
    format!("orcamento_{project}_{short_id}.{extension}")
}

/// Plain-text quotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn write(budget: &Budget) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let totals = budget.totals();

        writeln!(out, "ORÇAMENTO")?;
        writeln!(out, "Projeto: {}", budget.project_name)?;
        writeln!(out, "Cliente: {}", budget.client_name)?;
        writeln!(out, "Data: {}", budget.created_at.format("%d/%m/%Y"))?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<20} {:<40} {:>10} {:>14} {:>14}",
            "Código", "Descrição", "Qtd", "Unitário", "Total"
        )?;
        for line in budget.items() {
            writeln!(
                out,
                "{:<20} {:<40} {:>10} {:>14} {:>14}",
                line.code(),
                line.description(),
                line.quantity().normalize(),
                format!("R$ {}", format_money(line.unit_price())),
                format!("R$ {}", format_money(line.total_price())),
            )?;
        }
        writeln!(out)?;
        writeln!(out, "Subtotal: R$ {}", format_money(totals.subtotal))?;
        writeln!(out, "Mão de obra: R$ {}", format_money(totals.labor_cost))?;
        writeln!(
            out,
            "Serviços adicionais: R$ {}",
            format_money(totals.additional_services)
        )?;
        writeln!(
            out,
            "BDI ({}%): R$ {}",
            format_money(totals.bdi_percentage),
            format_money(totals.bdi_value)
        )?;
        writeln!(out, "TOTAL: R$ {}", format_money(totals.total))?;
        if let Some(notes) = &budget.notes {
            writeln!(out)?;
            writeln!(out, "Observações: {notes}")?;
        }
        Ok(out)
    }
}

impl DocumentRenderer for TextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, budget: &Budget) -> Result<Vec<u8>, RenderError> {
        Self::write(budget)
            .map(String::into_bytes)
            .map_err(|e| RenderError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetLineItem, NewBudget};
    use crate::catalog::ItemType;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn budget(project_name: &str) -> Budget {
        Budget::assemble(
            Uuid::parse_str("1b4e28ba-2fa1-11d2-883f-0016d3cca427").unwrap(),
            Utc::now(),
            NewBudget {
                project_name: project_name.to_string(),
                client_name: "Prefeitura".to_string(),
                items: vec![BudgetLineItem::new(
                    Uuid::new_v4(),
                    ItemType::Pole,
                    "PC-10-500".to_string(),
                    "Concreto 10m 500daN".to_string(),
                    dec!(3),
                    dec!(850.00),
                )
                .unwrap()],
                labor_cost: dec!(200),
                additional_services: dec!(50),
                bdi_percentage: dec!(25),
                notes: Some("Entrega em 30 dias".to_string()),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(&budget("Rede  Rural Norte"), "pdf"),
            "orcamento_Rede_Rural_Norte_1b4e28ba.pdf"
        );
    }

    #[test]
    fn test_text_renderer_prints_two_decimal_amounts() {
        let rendered = TextRenderer.render(&budget("Rede Rural")).unwrap();
        let text = String::from_utf8(rendered).unwrap();

        assert!(text.contains("Projeto: Rede Rural"));
        assert!(text.contains("PC-10-500"));
        assert!(text.contains("R$ 2550.00"));
        assert!(text.contains("Subtotal: R$ 2550.00"));
        assert!(text.contains("BDI (25.00%): R$ 700.00"));
        assert!(text.contains("TOTAL: R$ 3500.00"));
        assert!(text.contains("Observações: Entrega em 30 dias"));
    }

    #[test]
    fn test_text_renderer_metadata() {
        assert_eq!(TextRenderer.extension(), "txt");
        assert!(TextRenderer.content_type().starts_with("text/plain"));
    }
}
