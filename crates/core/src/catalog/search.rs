//! Free-text filtering of catalog listings.

use std::slice;

use super::types::{CatalogItem, Hardware, ItemType};

/// Fields a catalog record exposes to free-text search.
pub trait Searchable {
    /// Code, description and type, when present.
    fn search_fields(&self) -> [Option<&str>; 3];
}

impl Searchable for CatalogItem {
    /// Only stored fields; the descriptions built for poles and conductors
    /// are not searched.
    fn search_fields(&self) -> [Option<&str>; 3] {
        [Some(self.display_code()), self.description(), self.type_label()]
    }
}

impl Searchable for Hardware {
    fn search_fields(&self) -> [Option<&str>; 3] {
        [
            Some(self.code.as_str()),
            Some(self.description.as_str()),
            Some(self.category.as_str()),
        ]
    }
}

/// Lazy iterator over the records matching a query.
///
/// Call [`filter`] again on the same slice to restart from the beginning.
#[derive(Debug, Clone)]
pub struct Filter<'a, T> {
    items: slice::Iter<'a, T>,
    needle: Option<String>,
}

impl<'a, T: Searchable> Iterator for Filter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(needle) = &self.needle else {
            return self.items.next();
        };
        self.items.by_ref().find(|item| {
            item.search_fields()
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(needle.as_str()))
        })
    }
}

/// Records whose code, description or type contains `query`, ignoring case.
///
/// An empty query yields every record in its original order. Whitespace is
/// part of the query.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Filter<'a, T> {
    Filter {
        items: items.iter(),
        needle: (!query.is_empty()).then(|| query.to_lowercase()),
    }
}

/// All items of one kind, as listed by the catalog store.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    kind: ItemType,
    items: Vec<CatalogItem>,
}

impl CatalogSnapshot {
    /// Wraps a listing, dropping items that belong to another kind.
    #[must_use]
    pub fn new(kind: ItemType, items: Vec<CatalogItem>) -> Self {
        let items = items
            .into_iter()
            .filter(|item| item.item_type() == kind)
            .collect();
        Self { kind, items }
    }

    /// Kind of this listing.
    #[must_use]
    pub const fn kind(&self) -> ItemType {
        self.kind
    }

    /// Every item in the listing.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items matching `query`.
    pub fn search(&self, query: &str) -> Filter<'_, CatalogItem> {
        filter(&self.items, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Conductor, Material, Pole, Structure};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn pole(code: &str, pole_type: &str) -> CatalogItem {
        CatalogItem::Pole(Pole {
            id: Uuid::new_v4(),
            code: code.to_string(),
            pole_type: pole_type.to_string(),
            height: dec!(11),
            capacity: 1000,
            unit_price: dec!(3200.00),
            created_at: Utc::now(),
        })
    }

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(
            ItemType::Pole,
            vec![
                pole("DT-11-1000", "Duplo T"),
                pole("CIRC-11-600", "Concreto"),
                pole("PC-10-500", "Fibra"),
            ],
        )
    }

    fn codes<'a>(items: impl Iterator<Item = &'a CatalogItem>) -> Vec<&'a str> {
        items.map(CatalogItem::display_code).collect()
    }

    #[test]
    fn test_empty_query_yields_everything_in_order() {
        let snapshot = snapshot();
        assert_eq!(
            codes(snapshot.search("")),
            vec!["DT-11-1000", "CIRC-11-600", "PC-10-500"]
        );
    }

    #[test]
    fn test_whitespace_query_is_not_trimmed() {
        let snapshot = snapshot();
        assert_eq!(codes(snapshot.search("duplo t")), vec!["DT-11-1000"]);
        assert_eq!(snapshot.search("   ").count(), 0);
        assert_eq!(snapshot.search(" circ").count(), 0);
    }

    #[test]
    fn test_matches_code_case_insensitively() {
        let snapshot = snapshot();
        assert_eq!(codes(snapshot.search("circ")), vec!["CIRC-11-600"]);
    }

    #[test]
    fn test_matches_type() {
        let snapshot = snapshot();
        assert_eq!(codes(snapshot.search("duplo")), vec!["DT-11-1000"]);
    }

    #[test]
    fn test_built_description_is_not_searched() {
        let snapshot = snapshot();
        assert_eq!(snapshot.search("daN").count(), 0);
        assert_eq!(snapshot.search("11m").count(), 0);
    }

    #[test]
    fn test_no_match_is_empty() {
        let snapshot = snapshot();
        assert_eq!(snapshot.search("transformador").count(), 0);
    }

    #[test]
    fn test_search_is_restartable() {
        let snapshot = snapshot();
        let first: Vec<_> = codes(snapshot.search("1"));
        let second: Vec<_> = codes(snapshot.search("1"));
        assert_eq!(first, second);
        assert_eq!(snapshot.items().len(), 3);
    }

    #[test]
    fn test_snapshot_drops_other_kinds() {
        let conductor = CatalogItem::Conductor(Conductor {
            id: Uuid::new_v4(),
            code: "CD-CU-4AWG".to_string(),
            conductor_type: "Cobre".to_string(),
            insulation: "XLPE".to_string(),
            section: "4 AWG".to_string(),
            configuration: "Simples".to_string(),
            unit_price: dec!(12.50),
            created_at: Utc::now(),
        });
        let snapshot = CatalogSnapshot::new(ItemType::Pole, vec![pole("P1", "Fibra"), conductor]);
        assert_eq!(snapshot.kind(), ItemType::Pole);
        assert_eq!(snapshot.items().len(), 1);
    }

    #[test]
    fn test_structure_matches_description() {
        let structure = CatalogItem::MediumVoltageStructure(Structure::new(
            Uuid::new_v4(),
            "CE1".to_string(),
            "Estrutura CE1 - Rede Compacta 1 Fase".to_string(),
            "13.8kV".to_string(),
            vec![Material {
                code: "CINTA-190".to_string(),
                description: "Cinta circular 190mm".to_string(),
                unit: "pç".to_string(),
                quantity: dec!(1),
                unit_price: dec!(7.50),
            }],
            Utc::now(),
        ));
        let items = [structure];
        assert_eq!(filter(&items, "compacta").count(), 1);
        assert_eq!(filter(&items, "cinta").count(), 0);
    }
}
