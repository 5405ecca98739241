//! Row factory for the component table.
//!
//! A new row is first planned as a pure list of named fields, then inserted
//! into the document in one step. Planning never fails; insertion only fails
//! before anything is written.

use crate::document::{ComponentRow, Field, FieldId, FieldKind, FormDocument};
use crate::guard::guard;
use crate::resize::make_resizable;
use crate::schema::PropertySchema;
use blend_core::naming::property_field_name;
use blend_core::{ComponentColumn, FieldError, RowError};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlan {
    pub tag: String,
    pub display_name: String,
    pub fields: Vec<PlannedField>,
}

/// Result of inserting a planned row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedRow {
    pub tag: String,
    pub display_name: String,
    pub fields: Vec<FieldId>,
}

/// Tag and display name for the row that would follow `row_count` rows.
pub fn next_identity(row_count: usize) -> (String, String) {
    let n = row_count + 1;
    (format!("NC{}", n), format!("NewComponent{}", n))
}

/// Fields of a new row in column order: identity, display name, the four
/// numeric columns, then one field per schema property.
pub fn plan_row(tag: &str, display_name: &str, schema: &PropertySchema) -> RowPlan {
    let mut fields = Vec::with_capacity(ComponentColumn::all().len() + schema.len());
    for column in ComponentColumn::all() {
        let value = match column {
            ComponentColumn::Name => tag,
            ComponentColumn::Tag => display_name,
            other => other.new_row_default().unwrap_or("0"),
        };
        let kind = if column.is_numeric() {
            FieldKind::Numeric
        } else {
            FieldKind::Text
        };
        fields.push(PlannedField {
            name: column.field_name(tag),
            value: value.to_string(),
            kind,
        });
    }
    for property in schema.properties() {
        fields.push(PlannedField {
            name: property_field_name(tag, &property.name),
            value: property.class.new_row_default().to_string(),
            kind: FieldKind::Numeric,
        });
    }
    RowPlan {
        tag: tag.to_string(),
        display_name: display_name.to_string(),
        fields,
    }
}

/// Append a new row derived from the current row count.
///
/// Numeric fields are made resizable at `field_width` and guarded; identity
/// fields save the form when they lose focus. The schema is only read.
pub fn add_row(
    doc: &mut FormDocument,
    schema: &PropertySchema,
    field_width: f64,
) -> Result<AddedRow, RowError> {
    let (tag, display_name) = next_identity(doc.components.rows.len());
    if doc.components.row(&tag).is_some() {
        return Err(RowError::DuplicateTag { tag });
    }
    let plan = plan_row(&tag, &display_name, schema);
    let fields = insert_plan(doc, plan.fields, field_width)?;
    doc.components.rows.push(ComponentRow {
        tag: tag.clone(),
        cells: fields.clone(),
    });
    info!(tag = %tag, properties = schema.len(), "component row added");
    Ok(AddedRow {
        tag,
        display_name,
        fields,
    })
}

fn insert_plan(
    doc: &mut FormDocument,
    planned: Vec<PlannedField>,
    field_width: f64,
) -> Result<Vec<FieldId>, FieldError> {
    let mut ids = Vec::with_capacity(planned.len());
    for p in planned {
        let field = Field::new(p.name, p.value, p.kind);
        let field = match p.kind {
            FieldKind::Text => field.with_persist_on_blur(),
            FieldKind::Numeric => field,
        };
        let id = doc.insert_field(field);
        if p.kind == FieldKind::Numeric {
            make_resizable(doc, id, field_width)?;
            guard(doc, id)?;
        }
        ids.push(id);
    }
    Ok(ids)
}

/// Remove the row tagged `tag` and all of its fields.
pub fn remove_row(doc: &mut FormDocument, tag: &str) -> Result<usize, RowError> {
    let index = doc
        .components
        .rows
        .iter()
        .position(|r| r.tag == tag)
        .ok_or_else(|| RowError::UnknownTag {
            tag: tag.to_string(),
        })?;
    let row = doc.components.rows.remove(index);
    let removed = row
        .cells
        .iter()
        .filter(|id| doc.remove_field(**id).is_some())
        .count();
    info!(tag = %tag, fields = removed, "component row removed");
    Ok(removed)
}
