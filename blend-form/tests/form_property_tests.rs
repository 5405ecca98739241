use blend_core::naming::property_field_name;
use blend_core::{PropertyClass, MIN_RESIZE_WIDTH};
use blend_form::guard::{self, GuardOutcome};
use blend_form::resize::make_resizable;
use blend_form::{
    FieldKind, KeyValueStore, MemoryStore, PersistenceStore, ResizeSessionManager, RestoreOutcome,
    SaveOutcome,
};
use blend_test_utils::assertions::assert_row_matches_schema;
use blend_test_utils::fixtures::{controller_for, document_with_fields, document_with_schema};
use blend_test_utils::generators::{arb_field_value, arb_schema_labels, arb_snapshot};
use blend_test_utils::TEST_SNAPSHOT_KEY;
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

proptest! {
    // ========================================================================
    // Row factory: every row carries exactly the fixed columns plus the schema
    // ========================================================================

    #[test]
    fn added_rows_follow_schema(labels in arb_schema_labels(), rows in 1usize..5) {
        let mut controller = controller_for(document_with_schema(&labels));
        for i in 1..=rows {
            let added = controller.add_row();
            prop_assert!(added.is_ok(), "row {} rejected: {:?}", i, added);
        }
        for i in 1..=rows {
            assert_row_matches_schema(controller.document(), &format!("NC{}", i), &labels);
        }
        prop_assert_eq!(controller.document().components.rows.len(), rows);
    }

    #[test]
    fn new_row_property_defaults_follow_class(labels in arb_schema_labels()) {
        let mut controller = controller_for(document_with_schema(&labels));
        let added = controller.add_row();
        prop_assert!(added.is_ok());
        let doc = controller.document();
        for label in &labels {
            let id = doc.find_by_name(&property_field_name("NC1", label));
            prop_assert!(id.is_some());
            let expected = PropertyClass::of(label).new_row_default();
            prop_assert_eq!(id.and_then(|id| doc.value(id)), Some(expected));
        }
    }

    #[test]
    fn new_row_numeric_fields_get_one_container(labels in arb_schema_labels()) {
        let mut controller = controller_for(document_with_schema(&labels));
        let added = controller.add_row();
        prop_assert!(added.is_ok());
        let added = added.unwrap();
        let doc = controller.document();
        for id in &added.fields {
            let field = doc.field(*id).unwrap();
            match field.kind {
                FieldKind::Numeric => {
                    prop_assert_eq!(doc.containers_for(*id), 1);
                    prop_assert!(field.guard.is_some());
                }
                FieldKind::Text => {
                    prop_assert_eq!(doc.containers_for(*id), 0);
                    prop_assert!(field.persist_on_blur);
                }
            }
        }
    }

    // ========================================================================
    // Resize controller
    // ========================================================================

    #[test]
    fn make_resizable_is_idempotent(calls in 1usize..6, width in 60.0f64..400.0) {
        let names = vec!["component_NC1_cost".to_string()];
        let mut doc = document_with_fields(&names, "25.00");
        let id = doc.find_by_name(&names[0]).unwrap();
        let first = make_resizable(&mut doc, id, width).unwrap();
        for _ in 1..calls {
            prop_assert_eq!(make_resizable(&mut doc, id, width + 10.0).unwrap(), first);
        }
        prop_assert_eq!(doc.containers_for(id), 1);
        prop_assert_eq!(doc.container_width(first), Some(width));
    }

    #[test]
    fn drag_never_goes_below_floor(
        start in 60.0f64..300.0,
        press_x in 0.0f64..500.0,
        moves in vec(-400.0f64..400.0, 1..20),
    ) {
        let names = vec!["component_NC1_factor".to_string()];
        let mut doc = document_with_fields(&names, "1");
        let id = doc.find_by_name(&names[0]).unwrap();
        let container = make_resizable(&mut doc, id, start).unwrap();

        let mut session = ResizeSessionManager::new();
        prop_assert!(session.press(&doc, container, press_x));
        let mut expected = start;
        for offset in moves {
            let x = press_x + offset;
            let proposed = start + (x - press_x);
            let applied = session.drag(&mut doc, x);
            if proposed >= MIN_RESIZE_WIDTH {
                prop_assert_eq!(applied, Some(proposed));
                expected = proposed;
            } else {
                prop_assert_eq!(applied, None);
            }
            let width = doc.container_width(container).unwrap();
            prop_assert!(width >= MIN_RESIZE_WIDTH);
            prop_assert_eq!(width, expected);
        }
        prop_assert!(session.end().is_some());
        prop_assert_eq!(session.drag(&mut doc, press_x + 1000.0), None);
    }

    // ========================================================================
    // Value-restore guard
    // ========================================================================

    #[test]
    fn guarded_field_never_left_blank(edits in vec(arb_field_value(), 1..30)) {
        let names = vec!["component_NC1_availability".to_string()];
        let mut doc = document_with_fields(&names, "0");
        let id = doc.find_by_name(&names[0]).unwrap();
        guard::guard(&mut doc, id).unwrap();

        let mut last_known = "0".to_string();
        for edit in edits {
            doc.set_value(id, edit.clone()).unwrap();
            let outcome = guard::blur(&mut doc, id);
            let value = doc.value(id).unwrap().to_string();
            prop_assert!(!value.trim().is_empty());
            if edit.trim().is_empty() {
                prop_assert_eq!(outcome, Some(GuardOutcome::Restored { value: last_known.clone() }));
                prop_assert_eq!(&value, &last_known);
            } else {
                prop_assert_eq!(outcome, Some(GuardOutcome::Committed));
                last_known = edit.trim().to_string();
            }
        }
    }

    // ========================================================================
    // Persistence store
    // ========================================================================

    #[test]
    fn save_then_restore_reproduces_values(snapshot in arb_snapshot()) {
        let names: Vec<String> = snapshot.keys().cloned().collect();
        let mut source = document_with_fields(&names, "0");
        for (name, value) in &snapshot {
            let id = source.find_by_name(name).unwrap();
            source.set_value(id, value.clone()).unwrap();
        }
        let store = PersistenceStore::new(MemoryStore::new(), TEST_SNAPSHOT_KEY);
        prop_assert_eq!(store.save(&source), SaveOutcome::Saved { fields: names.len() });

        let mut target = document_with_fields(&names, "0");
        let outcome = store.restore(&mut target);
        prop_assert_eq!(outcome, RestoreOutcome::Restored { applied: names.len(), skipped: Vec::new() });
        prop_assert_eq!(target.snapshot(), snapshot);
    }

    #[test]
    fn restore_into_subset_skips_missing(snapshot in arb_snapshot(), keep_every in 1usize..4) {
        let store = PersistenceStore::new(MemoryStore::new(), TEST_SNAPSHOT_KEY);
        let raw = serde_json::to_string(&snapshot).unwrap();
        store.backend().set(TEST_SNAPSHOT_KEY, &raw).unwrap();

        let kept: Vec<String> = snapshot.keys().step_by(keep_every).cloned().collect();
        let mut target = document_with_fields(&kept, "untouched");
        let outcome = store.restore(&mut target);

        let kept_set: BTreeSet<&String> = kept.iter().collect();
        let expected_skipped: Vec<String> = snapshot
            .keys()
            .filter(|k| !kept_set.contains(k))
            .cloned()
            .collect();
        prop_assert_eq!(outcome, RestoreOutcome::Restored { applied: kept.len(), skipped: expected_skipped });
        for name in &kept {
            let id = target.find_by_name(name).unwrap();
            prop_assert_eq!(target.value(id), snapshot.get(name).map(String::as_str));
        }
        prop_assert_eq!(target.field_count(), kept.len());
    }
}

#[test]
fn corrupt_snapshot_is_purged_and_startup_continues() {
    let labels = vec!["SUL".to_string(), "RON".to_string()];
    let backend = MemoryStore::new();
    backend.set(TEST_SNAPSHOT_KEY, "{\"component_NC1_name\": [1, 2]").unwrap();

    let mut controller = blend_form::FormController::new(
        document_with_schema(&labels),
        PersistenceStore::new(backend, TEST_SNAPSHOT_KEY),
        blend_form::ControllerOptions::default(),
    );
    let report = controller.initialize();
    assert!(matches!(report.restore, RestoreOutcome::DiscardedCorrupt { .. }));
    assert_eq!(controller.store().backend().get(TEST_SNAPSHOT_KEY).unwrap(), None);
    assert_eq!(report.schema, Ok(2));
    assert!(controller.add_row().is_ok());
}

#[test]
fn orphaned_snapshot_entries_are_ignored() {
    let labels = vec!["SUL".to_string()];
    let backend = MemoryStore::new();
    backend
        .set(
            TEST_SNAPSHOT_KEY,
            r#"{"component_NC1_name":"NC1","component_NC1_tag":"NewComponent1"}"#,
        )
        .unwrap();
    let mut controller = blend_form::FormController::new(
        document_with_schema(&labels),
        PersistenceStore::new(backend, TEST_SNAPSHOT_KEY),
        blend_form::ControllerOptions::default(),
    );
    let report = controller.initialize();
    assert_eq!(
        report.restore,
        RestoreOutcome::Restored {
            applied: 0,
            skipped: vec![
                "component_NC1_name".to_string(),
                "component_NC1_tag".to_string()
            ],
        }
    );
    assert_eq!(controller.document().field_count(), 0);
}
