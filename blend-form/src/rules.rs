//! Load-time field rules for the specification table and marked fields.

use crate::document::{FieldId, FormDocument};
use blend_core::{Bound, FieldMarkers, PropertyClass, INF_SENTINEL};
use tracing::debug;

/// Effect a property class forces on one side of its specification bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub bound: Bound,
    pub value: &'static str,
    pub read_only: bool,
}

/// The bound rule for a property class, if it has one.
pub fn rule_for(class: PropertyClass) -> Option<FieldRule> {
    match class {
        PropertyClass::Contaminant => Some(FieldRule {
            bound: Bound::Min,
            value: "",
            read_only: true,
        }),
        PropertyClass::VaporPressure => Some(FieldRule {
            bound: Bound::Min,
            value: "0",
            read_only: false,
        }),
        PropertyClass::Octane => Some(FieldRule {
            bound: Bound::Max,
            value: INF_SENTINEL,
            read_only: true,
        }),
        PropertyClass::Standard => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleReport {
    /// Specification bound fields changed by the rule table.
    pub spec_fields: usize,
    /// Fields blanked by the empty-field marker.
    pub emptied: usize,
    /// Fields locked by the readonly-field marker.
    pub locked: usize,
}

/// Apply the rule table to every specification row.
pub fn apply_spec_rules(doc: &mut FormDocument) -> usize {
    let targets: Vec<(FieldId, FieldRule)> = doc
        .specs
        .iter()
        .filter_map(|row| rule_for(PropertyClass::of(&row.property)).map(|rule| (row, rule)))
        .flat_map(|(row, rule)| {
            row.bounds.iter().map(move |cells| {
                let id = match rule.bound {
                    Bound::Min => cells.min,
                    Bound::Max => cells.max,
                };
                (id, rule)
            })
        })
        .collect();

    let mut touched = 0;
    for (id, rule) in targets {
        if let Some(field) = doc.field_mut(id) {
            field.value = rule.value.to_string();
            if rule.read_only {
                field.read_only = true;
            }
            touched += 1;
        }
    }
    debug!(fields = touched, "specification rules applied");
    touched
}

/// Blank and lock `EMPTY_FIELD` fields; lock `READONLY_FIELD` fields.
pub fn apply_marker_rules(doc: &mut FormDocument) -> (usize, usize) {
    let marked: Vec<(FieldId, FieldMarkers)> = doc
        .fields()
        .filter(|(_, f)| !f.markers.is_empty())
        .map(|(id, f)| (id, f.markers))
        .collect();

    let (mut emptied, mut locked) = (0, 0);
    for (id, markers) in marked {
        let Some(field) = doc.field_mut(id) else {
            continue;
        };
        if markers.contains(FieldMarkers::EMPTY_FIELD) {
            field.value.clear();
            field.read_only = true;
            emptied += 1;
        }
        if markers.contains(FieldMarkers::READONLY_FIELD) {
            field.read_only = true;
            locked += 1;
        }
    }
    (emptied, locked)
}

pub fn apply_all(doc: &mut FormDocument) -> RuleReport {
    let spec_fields = apply_spec_rules(doc);
    let (emptied, locked) = apply_marker_rules(doc);
    RuleReport {
        spec_fields,
        emptied,
        locked,
    }
}
