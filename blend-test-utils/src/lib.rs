//! Blend Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for property schemas, field values and snapshots
//! - Fixtures for documents and controllers
//! - Assertions for the component row naming contract

pub use blend_core::{
    default_template, ComponentColumn, FormSnapshot, FormTemplate, PropertyClass, COST_ANCHOR,
};
pub use blend_form::{
    ControllerOptions, FormController, FormDocument, MemoryStore, PersistenceStore,
};

/// Storage key used by fixtures.
pub const TEST_SNAPSHOT_KEY: &str = "blendFormData";

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for form engine inputs.

    use super::*;
    use proptest::collection::{btree_map, vec};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Property labels with a bias toward the classes that carry rules.
    pub fn arb_property_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("SUL".to_string()),
            Just("ARO".to_string()),
            Just("BEN".to_string()),
            Just("OXY".to_string()),
            Just("OLEFIN".to_string()),
            Just("RON".to_string()),
            Just("MON".to_string()),
            Just("RVP".to_string()),
            Just("SPG".to_string()),
            "[A-Z][A-Z0-9]{1,6}",
        ]
    }

    /// Ordered, duplicate-free property labels (possibly empty).
    pub fn arb_schema_labels() -> impl Strategy<Value = Vec<String>> {
        vec(arb_property_name(), 0..12).prop_map(|labels| {
            let mut seen = HashSet::new();
            labels
                .into_iter()
                .filter(|l| seen.insert(l.clone()))
                .collect()
        })
    }

    /// Values a user might type into a numeric field, blanks included.
    pub fn arb_field_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("   ".to_string()),
            Just("inf".to_string()),
            (0u32..100_000).prop_map(|n| n.to_string()),
            (0u32..10_000).prop_map(|n| format!("{:.2}", n as f64 / 100.0)),
            "[ -~]{0,12}",
        ]
    }

    /// Arbitrary flat snapshot keyed by plausible field names.
    pub fn arb_snapshot() -> impl Strategy<Value = FormSnapshot> {
        btree_map("(component|spec|grade)_[A-Za-z0-9_]{1,16}", arb_field_value(), 0..24)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built documents and controllers.

    use super::*;
    use blend_form::{ComponentTable, Field, FieldKind};

    /// Header last row: fixed columns, then `properties`.
    pub fn header_with_properties(properties: &[String]) -> Vec<String> {
        ComponentColumn::all()
            .iter()
            .map(|c| c.header_label().to_string())
            .chain(properties.iter().cloned())
            .collect()
    }

    /// Empty component table whose header declares `properties`.
    pub fn document_with_schema(properties: &[String]) -> FormDocument {
        let mut doc = FormDocument::new(blend_core::FORM_ACTION);
        doc.components = ComponentTable {
            header: vec![
                vec!["Components".to_string()],
                header_with_properties(properties),
            ],
            rows: Vec::new(),
        };
        doc
    }

    /// Document with one loose numeric field per name, all holding `value`.
    pub fn document_with_fields(names: &[String], value: &str) -> FormDocument {
        let mut doc = FormDocument::new(blend_core::FORM_ACTION);
        for name in names {
            let id = doc.insert_field(Field::new(name.clone(), value, FieldKind::Numeric));
            doc.extras.push(id);
        }
        doc
    }

    pub fn memory_store() -> PersistenceStore<MemoryStore> {
        PersistenceStore::new(MemoryStore::new(), TEST_SNAPSHOT_KEY)
    }

    /// Controller over `doc` with an empty in-memory store, initialized.
    pub fn controller_for(doc: FormDocument) -> FormController<MemoryStore> {
        let mut controller = FormController::new(doc, memory_store(), ControllerOptions::default());
        controller.initialize();
        controller
    }

    /// Controller over the stock page, initialized.
    pub fn default_controller() -> FormController<MemoryStore> {
        controller_for(blend_form::render_document(&default_template()))
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for the component row naming contract.

    use super::*;
    use std::collections::BTreeSet;

    /// Expected field names of the row tagged `tag` under `properties`.
    pub fn expected_row_fields(tag: &str, properties: &[String]) -> BTreeSet<String> {
        ComponentColumn::all()
            .iter()
            .map(|c| c.field_name(tag))
            .chain(
                properties
                    .iter()
                    .map(|p| blend_core::naming::property_field_name(tag, p)),
            )
            .collect()
    }

    /// Assert that the row tagged `tag` carries exactly the expected fields.
    #[track_caller]
    pub fn assert_row_matches_schema(doc: &FormDocument, tag: &str, properties: &[String]) {
        let row = doc
            .components
            .row(tag)
            .unwrap_or_else(|| panic!("no component row tagged {tag}"));
        let actual: BTreeSet<String> = row
            .cells
            .iter()
            .filter_map(|id| doc.field(*id))
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(
            actual.len(),
            row.cells.len(),
            "row {tag} has duplicate or dangling cells"
        );
        assert_eq!(actual, expected_row_fields(tag, properties), "row {tag} field set");
    }
}
