//! In-memory form document.
//!
//! Fields live in an arena addressed by [`FieldId`]; removed fields leave a
//! tombstone so ids held by tables and containers never shift. Tables refer
//! to fields by id, and document order (grades, components, specifications,
//! extras) is the order fields are collected for saving and submission.

use crate::guard::ValueGuard;
use blend_core::{FieldError, FieldMarkers, FormSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Numeric,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub read_only: bool,
    pub markers: FieldMarkers,
    /// Resizable wrapper, if the field has been made resizable.
    pub container: Option<ContainerId>,
    pub guard: Option<ValueGuard>,
    /// Losing focus saves the form (identity fields).
    pub persist_on_blur: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            read_only: false,
            markers: FieldMarkers::empty(),
            container: None,
            guard: None,
            persist_on_blur: false,
        }
    }

    pub fn with_markers(mut self, markers: FieldMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_persist_on_blur(mut self) -> Self {
        self.persist_on_blur = true;
        self
    }
}

/// Resizable wrapper around one field, with its trailing drag handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeContainer {
    pub field: FieldId,
    pub width: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRow {
    pub tag: String,
    /// One cell per header column, left to right.
    pub cells: Vec<FieldId>,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    /// Header rows; the last one carries the column labels.
    pub header: Vec<Vec<String>>,
    pub rows: Vec<ComponentRow>,
}

impl ComponentTable {
    pub fn column_labels(&self) -> &[String] {
        self.header.last().map(|row| row.as_slice()).unwrap_or(&[])
    }

    pub fn row(&self, tag: &str) -> Option<&ComponentRow> {
        self.rows.iter().find(|r| r.tag == tag)
    }
}

#[derive(Debug, Clone)]
pub struct SpecBoundCells {
    pub grade: String,
    pub min: FieldId,
    pub max: FieldId,
}

#[derive(Debug, Clone)]
pub struct SpecRow {
    pub property: String,
    pub bounds: Vec<SpecBoundCells>,
}

#[derive(Debug, Clone)]
pub struct GradeRow {
    pub grade: String,
    pub cells: Vec<FieldId>,
}

#[derive(Debug, Clone)]
pub struct FormDocument {
    action: String,
    fields: Vec<Option<Field>>,
    containers: Vec<ResizeContainer>,
    pub grades: Vec<GradeRow>,
    pub components: ComponentTable,
    pub specs: Vec<SpecRow>,
    pub extras: Vec<FieldId>,
}

impl FormDocument {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
            containers: Vec::new(),
            grades: Vec::new(),
            components: ComponentTable::default(),
            specs: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn insert_field(&mut self, field: Field) -> FieldId {
        self.fields.push(Some(field));
        FieldId(self.fields.len() - 1)
    }

    /// Drop a field. Its container, if any, stops resolving.
    pub fn remove_field(&mut self, id: FieldId) -> Option<Field> {
        self.fields.get_mut(id.0)?.take()
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0).and_then(|f| f.as_ref())
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.0).and_then(|f| f.as_mut())
    }

    pub fn value(&self, id: FieldId) -> Option<&str> {
        self.field(id).map(|f| f.value.as_str())
    }

    /// Live fields in arena order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.as_ref().map(|f| (FieldId(i), f)))
    }

    pub fn field_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_some()).count()
    }

    /// First field carrying `name`, in document order.
    pub fn find_by_name(&self, name: &str) -> Option<FieldId> {
        self.document_order()
            .into_iter()
            .find(|id| self.field(*id).is_some_and(|f| f.name == name))
    }

    /// User edit: refused on read-only fields.
    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) -> Result<(), FieldError> {
        let field = self
            .field_mut(id)
            .ok_or(FieldError::UnknownField { id: id.0 })?;
        if field.read_only {
            return Err(FieldError::ReadOnly {
                name: field.name.clone(),
            });
        }
        field.value = value.into();
        Ok(())
    }

    /// Programmatic write that ignores the read-only flag.
    pub fn force_value(&mut self, id: FieldId, value: impl Into<String>) -> Result<(), FieldError> {
        let field = self
            .field_mut(id)
            .ok_or(FieldError::UnknownField { id: id.0 })?;
        field.value = value.into();
        Ok(())
    }

    pub fn set_read_only(&mut self, id: FieldId, read_only: bool) -> Result<(), FieldError> {
        let field = self
            .field_mut(id)
            .ok_or(FieldError::UnknownField { id: id.0 })?;
        field.read_only = read_only;
        Ok(())
    }

    pub(crate) fn push_container(&mut self, container: ResizeContainer) -> ContainerId {
        self.containers.push(container);
        ContainerId(self.containers.len() - 1)
    }

    pub fn container(&self, id: ContainerId) -> Option<&ResizeContainer> {
        self.containers
            .get(id.0)
            .filter(|c| self.field(c.field).is_some())
    }

    pub fn container_width(&self, id: ContainerId) -> Option<f64> {
        self.container(id).map(|c| c.width)
    }

    pub(crate) fn set_container_width(&mut self, id: ContainerId, width: f64) -> bool {
        let live = self
            .containers
            .get(id.0)
            .is_some_and(|c| self.field(c.field).is_some());
        match self.containers.get_mut(id.0) {
            Some(c) if live => {
                c.width = width;
                true
            }
            _ => false,
        }
    }

    /// Number of live containers wrapping `field`.
    pub fn containers_for(&self, field: FieldId) -> usize {
        self.containers
            .iter()
            .filter(|c| c.field == field && self.field(field).is_some())
            .count()
    }

    /// Field ids in document order: grades, components, specifications, extras.
    pub fn document_order(&self) -> Vec<FieldId> {
        let mut ids = Vec::with_capacity(self.fields.len());
        for grade in &self.grades {
            ids.extend(grade.cells.iter().copied());
        }
        for row in &self.components.rows {
            ids.extend(row.cells.iter().copied());
        }
        for spec in &self.specs {
            for bound in &spec.bounds {
                ids.push(bound.min);
                ids.push(bound.max);
            }
        }
        ids.extend(self.extras.iter().copied());
        ids.retain(|id| self.field(*id).is_some());
        ids
    }

    /// Every named field and its value, in document order.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.document_order()
            .into_iter()
            .filter_map(|id| self.field(id))
            .filter(|f| !f.name.is_empty())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Flat name to value mapping. A later duplicate name wins.
    pub fn snapshot(&self) -> FormSnapshot {
        self.form_pairs().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_row() -> (FormDocument, FieldId, FieldId) {
        let mut doc = FormDocument::new("/run_lp");
        let name = doc.insert_field(Field::new("component_A_name", "A", FieldKind::Text));
        let cost = doc.insert_field(Field::new("component_A_cost", "10.00", FieldKind::Numeric));
        doc.components.rows.push(ComponentRow {
            tag: "A".to_string(),
            cells: vec![name, cost],
        });
        (doc, name, cost)
    }

    #[test]
    fn test_find_by_name() {
        let (doc, _, cost) = doc_with_row();
        assert_eq!(doc.find_by_name("component_A_cost"), Some(cost));
        assert_eq!(doc.find_by_name("component_B_cost"), None);
    }

    #[test]
    fn test_set_value_refuses_read_only() {
        let (mut doc, _, cost) = doc_with_row();
        doc.set_read_only(cost, true).unwrap();
        let err = doc.set_value(cost, "12").unwrap_err();
        assert!(matches!(err, FieldError::ReadOnly { .. }));
        doc.force_value(cost, "12").unwrap();
        assert_eq!(doc.value(cost), Some("12"));
    }

    #[test]
    fn test_removed_field_leaves_tombstone() {
        let (mut doc, name, cost) = doc_with_row();
        assert!(doc.remove_field(name).is_some());
        assert!(doc.field(name).is_none());
        assert_eq!(doc.value(cost), Some("10.00"));
        assert_eq!(doc.field_count(), 1);
        assert_eq!(doc.form_pairs(), vec![("component_A_cost".to_string(), "10.00".to_string())]);
    }

    #[test]
    fn test_snapshot_collects_named_fields() {
        let (mut doc, _, _) = doc_with_row();
        let unnamed = doc.insert_field(Field::new("", "x", FieldKind::Text));
        doc.extras.push(unnamed);
        let snapshot = doc.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("component_A_name").map(String::as_str), Some("A"));
    }
}
