//! Priced catalog of distribution components.
//!
//! Five kinds can be budgeted (poles, medium- and low-voltage structures,
//! conductors, equipment). Hardware is registered alongside them but never
//! enters a budget.

pub mod error;
pub mod search;
pub mod types;

pub use error::CatalogError;
pub use search::{CatalogSnapshot, Filter, Searchable, filter};
pub use types::{
    CatalogItem, CatalogItemInput, Conductor, ConductorInput, Equipment, EquipmentInput, Hardware,
    HardwareInput, ItemType, Material, Pole, PoleInput, Structure, StructureInput,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use uuid::Uuid;

    fn material(quantity: rust_decimal::Decimal, unit_price: rust_decimal::Decimal) -> Material {
        Material {
            code: "MAT".to_string(),
            description: "Material".to_string(),
            unit: "pç".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_structure_total_is_sum_of_extended_prices() {
        let structure = Structure::new(
            Uuid::new_v4(),
            "CE2".to_string(),
            "Estrutura CE2".to_string(),
            "13.8kV".to_string(),
            vec![material(dec!(2), dec!(50.00)), material(dec!(1), dec!(300.00))],
            Utc::now(),
        );
        assert_eq!(structure.total_price(), dec!(400.00));

        let item = CatalogItem::MediumVoltageStructure(structure);
        assert_eq!(item.effective_price(), dec!(400.00));
        assert_eq!(item.item_type(), ItemType::MediumVoltageStructure);
    }

    #[test]
    fn test_structure_without_materials_costs_nothing() {
        let structure = Structure::new(
            Uuid::new_v4(),
            "M1".to_string(),
            String::new(),
            String::new(),
            Vec::new(),
            Utc::now(),
        );
        assert_eq!(structure.total_price(), dec!(0));
    }

    #[test]
    fn test_pole_display() {
        let item = CatalogItemInput::Pole(PoleInput {
            code: "DT-11-1000".to_string(),
            pole_type: "Duplo T".to_string(),
            height: dec!(11.0),
            capacity: 1000,
            unit_price: dec!(3200.00),
        })
        .into_item(Uuid::new_v4(), Utc::now());

        assert_eq!(item.display_code(), "DT-11-1000");
        assert_eq!(item.display_description(), "Duplo T 11m 1000daN");
        assert_eq!(item.type_label(), Some("Duplo T"));
        assert_eq!(item.effective_price(), dec!(3200.00));
    }

    #[test]
    fn test_item_type_parsing() {
        assert_eq!("poles".parse::<ItemType>().unwrap(), ItemType::Pole);
        assert_eq!(
            "medium-voltage-structures".parse::<ItemType>().unwrap(),
            ItemType::MediumVoltageStructure
        );
        assert_eq!(
            "low_voltage_structure".parse::<ItemType>().unwrap(),
            ItemType::LowVoltageStructure
        );
        assert!(matches!(
            "hardware".parse::<ItemType>(),
            Err(CatalogError::UnknownKind(_))
        ));
        for kind in ItemType::ALL {
            assert_eq!(kind.route_segment().parse::<ItemType>().unwrap(), kind);
            assert_eq!(kind.as_str().parse::<ItemType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_input_from_json_and_validate() {
        let input = CatalogItemInput::from_json(
            ItemType::Conductor,
            json!({
                "code": "CD-CU-4AWG",
                "type": "Cobre",
                "insulation": "XLPE",
                "section": "4 AWG",
                "configuration": "Simples",
                "unit_price": 12.5
            }),
        )
        .unwrap();
        assert_eq!(input.item_type(), ItemType::Conductor);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_input_rejects_missing_fields() {
        let result = CatalogItemInput::from_json(ItemType::Pole, json!({"code": "P1"}));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_validation_failures() {
        let blank_code = CatalogItemInput::Equipment(EquipmentInput {
            code: "  ".to_string(),
            category: "Chave".to_string(),
            equipment_type: "Faca".to_string(),
            description: "Chave Faca 15kV".to_string(),
            unit_price: dec!(800.00),
        });
        assert!(blank_code.validate().is_err());

        let negative_material = CatalogItemInput::LowVoltageStructure(StructureInput {
            code: "M1".to_string(),
            description: "Estrutura M1".to_string(),
            voltage_class: String::new(),
            materials: vec![material(dec!(-1), dec!(10))],
        });
        assert!(negative_material.validate().is_err());

        let negative_hardware = HardwareInput {
            code: "PAR-QUAD-M16-200".to_string(),
            category: "Parafuso".to_string(),
            description: "Parafuso".to_string(),
            unit_price: dec!(-16.11),
        };
        assert!(negative_hardware.validate().is_err());
    }

    #[test]
    fn test_catalog_error_maps_to_app_error() {
        use gridbudget_shared::AppError;

        let not_found: AppError = CatalogError::NotFound {
            kind: "Pole",
            id: Uuid::nil(),
        }
        .into();
        assert_eq!(not_found.status_code(), 404);

        let invalid: AppError = CatalogError::Validation("bad".into()).into();
        assert_eq!(invalid.status_code(), 400);
    }

    #[test]
    fn test_structure_total_above_cap_is_rejected() {
        let cap = crate::numeric::MAX_INPUT;
        let oversized = CatalogItemInput::MediumVoltageStructure(StructureInput {
            code: "CE9".to_string(),
            description: "Estrutura".to_string(),
            voltage_class: "13.8kV".to_string(),
            materials: vec![material(cap, cap)],
        });
        assert!(matches!(
            oversized.validate(),
            Err(CatalogError::Validation(msg)) if msg.contains("total_price")
        ));

        let at_cap = CatalogItemInput::MediumVoltageStructure(StructureInput {
            code: "CE9".to_string(),
            description: "Estrutura".to_string(),
            voltage_class: "13.8kV".to_string(),
            materials: vec![material(dec!(1), cap)],
        });
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_json_amounts_are_rounded_to_stored_scale() {
        let input = CatalogItemInput::from_json(
            ItemType::LowVoltageStructure,
            json!({
                "code": "S1L",
                "description": "Estrutura S1L",
                "materials": [{
                    "code": "ISO",
                    "description": "Isolador",
                    "unit": "pç",
                    "quantity": "1.23456",
                    "unit_price": "10.000049"
                }]
            }),
        )
        .unwrap();
        let item = input.into_item(Uuid::new_v4(), Utc::now());
        let CatalogItem::LowVoltageStructure(structure) = &item else {
            panic!("expected a low-voltage structure");
        };
        assert_eq!(structure.materials()[0].quantity, dec!(1.2346));
        assert_eq!(structure.materials()[0].unit_price, dec!(10.0000));
        assert_eq!(structure.total_price(), dec!(12.346));

        let pole = CatalogItemInput::from_json(
            ItemType::Pole,
            json!({"code": "P", "type": "Fibra", "height": "10.555", "capacity": 300, "unit_price": 1}),
        )
        .unwrap();
        let CatalogItemInput::Pole(pole) = pole else {
            panic!("expected a pole");
        };
        assert_eq!(pole.height, dec!(10.56));
    }

    #[test]
    fn test_pole_taller_than_limit_is_rejected() {
        let pole = CatalogItemInput::Pole(PoleInput {
            code: "P".to_string(),
            pole_type: "Especial".to_string(),
            height: dec!(1000.01),
            capacity: 300,
            unit_price: dec!(1),
        });
        assert!(pole.validate().is_err());
    }
}
