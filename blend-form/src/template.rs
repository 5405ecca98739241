//! Build the initial form document from a [`FormTemplate`].
//!
//! This is the page as first served: grade limits, the static component rows
//! (one cell per header column) and the specification bounds per grade.

use crate::document::{
    ComponentRow, Field, FieldKind, FormDocument, GradeRow, SpecBoundCells, SpecRow,
};
use blend_core::naming::{grade_field_name, property_field_name, spec_field_name, SOLVER_CHOICE_FIELD};
use blend_core::{
    format_bound, format_number, Bound, ComponentColumn, FieldMarkers, FormTemplate, GradeColumn,
    FORM_ACTION,
};

pub fn header_labels(template: &FormTemplate) -> Vec<String> {
    ComponentColumn::all()
        .iter()
        .map(|c| c.header_label().to_string())
        .chain(template.properties.iter().cloned())
        .collect()
}

pub fn render_document(template: &FormTemplate) -> FormDocument {
    let mut doc = FormDocument::new(FORM_ACTION);

    for grade in &template.grades {
        let cells = GradeColumn::all()
            .iter()
            .map(|column| {
                let value = match column {
                    GradeColumn::Min => format_number(grade.min),
                    GradeColumn::Max => format_bound(grade.max),
                    GradeColumn::Price => format!("{:.2}", grade.price),
                };
                doc.insert_field(Field::new(
                    grade_field_name(&grade.name, *column),
                    value,
                    FieldKind::Numeric,
                ))
            })
            .collect();
        doc.grades.push(GradeRow {
            grade: grade.name.clone(),
            cells,
        });
    }

    doc.components.header = vec![vec!["Components".to_string()], header_labels(template)];
    for component in &template.components {
        let mut cells = Vec::new();
        for column in ComponentColumn::all() {
            let (value, kind, markers) = match column {
                ComponentColumn::Name => (component.name.clone(), FieldKind::Text, FieldMarkers::empty()),
                ComponentColumn::Tag => (component.tag.clone(), FieldKind::Text, FieldMarkers::empty()),
                ComponentColumn::MinComp => (
                    format_number(component.min_comp),
                    FieldKind::Numeric,
                    FieldMarkers::empty(),
                ),
                ComponentColumn::Availability => (
                    format_number(component.availability),
                    FieldKind::Numeric,
                    FieldMarkers::empty(),
                ),
                ComponentColumn::Factor => (
                    format_number(component.factor),
                    FieldKind::Numeric,
                    FieldMarkers::empty(),
                ),
                // Cost is derived from factor and the reference grade price.
                ComponentColumn::Cost => (
                    template.component_cost(component),
                    FieldKind::Numeric,
                    FieldMarkers::READONLY_FIELD,
                ),
            };
            let field = Field::new(column.field_name(&component.name), value, kind).with_markers(markers);
            let field = if kind == FieldKind::Text {
                field.with_persist_on_blur()
            } else {
                field
            };
            cells.push(doc.insert_field(field));
        }
        for property in &template.properties {
            cells.push(doc.insert_field(Field::new(
                property_field_name(&component.name, property),
                FormTemplate::property_value(component, property),
                FieldKind::Numeric,
            )));
        }
        doc.components.rows.push(ComponentRow {
            tag: component.name.clone(),
            cells,
        });
    }

    for spec in &template.specs {
        let bounds = spec
            .bounds
            .iter()
            .map(|b| SpecBoundCells {
                grade: b.grade.clone(),
                min: doc.insert_field(Field::new(
                    spec_field_name(&spec.property, &b.grade, Bound::Min),
                    format_bound(b.min),
                    FieldKind::Numeric,
                )),
                max: doc.insert_field(Field::new(
                    spec_field_name(&spec.property, &b.grade, Bound::Max),
                    format_bound(b.max),
                    FieldKind::Numeric,
                )),
            })
            .collect();
        doc.specs.push(SpecRow {
            property: spec.property.clone(),
            bounds,
        });
    }

    let solver = doc.insert_field(
        Field::new(SOLVER_CHOICE_FIELD, template.solver_choice.clone(), FieldKind::Text)
            .with_persist_on_blur(),
    );
    doc.extras.push(solver);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::read_property_schema;
    use blend_core::default_template;

    #[test]
    fn test_default_document_shape() {
        let template = default_template();
        let doc = render_document(&template);
        assert_eq!(doc.action(), "/run_lp");
        assert_eq!(doc.grades.len(), 3);
        assert_eq!(doc.components.rows.len(), 10);
        assert_eq!(doc.specs.len(), 13);
        let columns = doc.components.column_labels().len();
        assert!(doc.components.rows.iter().all(|r| r.cells.len() == columns));
        // 3 grades x 3 + 10 rows x 19 + 13 specs x 3 grades x 2 + solver
        assert_eq!(doc.field_count(), 9 + 190 + 78 + 1);
    }

    #[test]
    fn test_schema_matches_template_properties() {
        let template = default_template();
        let doc = render_document(&template);
        let schema = read_property_schema(&doc.components).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), template.properties);
    }

    #[test]
    fn test_static_values() {
        let doc = render_document(&default_template());
        let value = |name: &str| doc.value(doc.find_by_name(name).unwrap()).unwrap().to_string();
        assert_eq!(value("component_C4B_tag"), "Alkyl Butane");
        assert_eq!(value("component_C4B_cost"), "130.00");
        assert_eq!(value("component_C4B_property_SPG"), "0.5844");
        assert_eq!(value("spec_RON_Premium_max"), "inf");
        assert_eq!(value("grade_Regular_price"), "100.00");
        assert_eq!(value("solver_choice"), "CBC");
        let cost = doc.find_by_name("component_C4B_cost").unwrap();
        assert!(doc.field(cost).unwrap().markers.contains(FieldMarkers::READONLY_FIELD));
    }
}
