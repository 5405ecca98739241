//! Cell grid shared by the form views: what is drawn where, and what a
//! pointer position lands on.
//!
//! Field widths are kept in logical units; one terminal column spans
//! [`UNITS_PER_CELL`] units. A resizable field draws its handle in the last
//! column of its span.

use crate::nav::View;
use blend_core::GradeColumn;
use blend_form::{ContainerId, FieldId, FormDocument};
use ratatui::layout::Rect;

pub const UNITS_PER_CELL: f64 = 8.0;
pub const ROW_LABEL_WIDTH: u16 = 16;
const MIN_COLUMN_CELLS: u16 = 4;

/// Rows of field ids with their labels, for one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    pub rows: Vec<Vec<FieldId>>,
}

impl Grid {
    pub fn for_view(doc: &FormDocument, view: View) -> Self {
        match view {
            View::Components => components(doc),
            View::Specifications => specifications(doc),
            View::Grades => grades(doc),
            View::Market => Self::default(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.column_labels.len())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<FieldId> {
        self.rows.get(row)?.get(col).copied()
    }
}

fn components(doc: &FormDocument) -> Grid {
    let labels = doc.components.column_labels();
    Grid {
        column_labels: labels.to_vec(),
        row_labels: doc.components.rows.iter().map(|r| r.tag.clone()).collect(),
        rows: doc.components.rows.iter().map(|r| r.cells.clone()).collect(),
    }
}

fn specifications(doc: &FormDocument) -> Grid {
    let column_labels = doc
        .specs
        .first()
        .map(|spec| {
            spec.bounds
                .iter()
                .flat_map(|b| [format!("{} min", b.grade), format!("{} max", b.grade)])
                .collect()
        })
        .unwrap_or_default();
    Grid {
        column_labels,
        row_labels: doc.specs.iter().map(|s| s.property.clone()).collect(),
        rows: doc
            .specs
            .iter()
            .map(|s| s.bounds.iter().flat_map(|b| [b.min, b.max]).collect())
            .collect(),
    }
}

fn grades(doc: &FormDocument) -> Grid {
    let mut grid = Grid {
        column_labels: GradeColumn::all()
            .iter()
            .map(|c| c.header_label().to_string())
            .collect(),
        row_labels: doc.grades.iter().map(|g| g.grade.clone()).collect(),
        rows: doc.grades.iter().map(|g| g.cells.clone()).collect(),
    };
    for id in &doc.extras {
        if let Some(field) = doc.field(*id) {
            grid.row_labels.push(field.name.clone());
            grid.rows.push(vec![*id]);
        }
    }
    grid
}

/// Terminal columns a field occupies.
pub fn field_cells(doc: &FormDocument, id: FieldId, default_width: f64) -> u16 {
    let width = doc
        .field(id)
        .and_then(|f| f.container)
        .and_then(|c| doc.container_width(c))
        .unwrap_or(default_width);
    let cells = (width / UNITS_PER_CELL).round();
    if cells.is_finite() && cells >= f64::from(MIN_COLUMN_CELLS) {
        cells.min(f64::from(u16::MAX)) as u16
    } else {
        MIN_COLUMN_CELLS
    }
}

/// Columns taken by grid column `col`: the width of its widest cell.
pub fn column_cells(doc: &FormDocument, grid: &Grid, col: usize, default_width: f64) -> u16 {
    grid.rows
        .iter()
        .filter_map(|row| row.get(col))
        .map(|id| field_cells(doc, *id, default_width))
        .max()
        .unwrap_or(MIN_COLUMN_CELLS)
}

/// Logical pointer position for a terminal column.
pub fn pointer_units(column: u16) -> f64 {
    f64::from(column) * UNITS_PER_CELL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub col: usize,
    pub x: u16,
    pub width: u16,
}

/// Visible columns from `col_offset`, laid out left to right inside `area`.
/// The last one may be clipped.
pub fn column_spans(
    doc: &FormDocument,
    grid: &Grid,
    col_offset: usize,
    area: Rect,
    default_width: f64,
) -> Vec<ColumnSpan> {
    let mut spans = Vec::new();
    let right = area.x.saturating_add(area.width);
    let mut x = area.x.saturating_add(ROW_LABEL_WIDTH);
    for col in col_offset..grid.column_count() {
        let width = column_cells(doc, grid, col, default_width);
        if x >= right {
            break;
        }
        let width = width.min(right - x);
        spans.push(ColumnSpan { col, x, width });
        x = x.saturating_add(width).saturating_add(1);
    }
    spans
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Cell { row: usize, col: usize },
    Handle { row: usize, col: usize, container: ContainerId },
}

/// Resolve a pointer position inside `area` (header line first, then one
/// line per row starting at `row_offset`).
pub fn hit_test(
    doc: &FormDocument,
    grid: &Grid,
    spans: &[ColumnSpan],
    area: Rect,
    row_offset: usize,
    x: u16,
    y: u16,
) -> Option<Hit> {
    if y <= area.y || y >= area.y.saturating_add(area.height) {
        return None;
    }
    let row = row_offset + usize::from(y - area.y - 1);
    let span = spans.iter().find(|s| x >= s.x && x < s.x + s.width)?;
    let id = grid.cell(row, span.col)?;
    let container = doc.field(id)?.container;
    match container {
        Some(container) if x == span.x + span.width - 1 => Some(Hit::Handle {
            row,
            col: span.col,
            container,
        }),
        _ => Some(Hit::Cell { row, col: span.col }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blend_core::default_template;
    use blend_form::{make_resizable, render_document, Field, FieldKind};

    fn area() -> Rect {
        Rect::new(0, 0, 120, 20)
    }

    #[test]
    fn test_component_grid_follows_rows() {
        let doc = render_document(&default_template());
        let grid = Grid::for_view(&doc, View::Components);
        assert_eq!(grid.rows.len(), 10);
        assert_eq!(grid.row_labels[0], "C4B");
        assert_eq!(grid.column_count(), 6 + 13);
    }

    #[test]
    fn test_spec_grid_pairs_bounds() {
        let doc = render_document(&default_template());
        let grid = Grid::for_view(&doc, View::Specifications);
        assert_eq!(grid.column_labels[0], "Regular min");
        assert_eq!(grid.column_labels[1], "Regular max");
        assert_eq!(grid.rows[0].len(), 6);
    }

    #[test]
    fn test_grade_grid_appends_extras() {
        let doc = render_document(&default_template());
        let grid = Grid::for_view(&doc, View::Grades);
        assert_eq!(grid.rows.len(), 4);
        assert_eq!(grid.row_labels.last().map(String::as_str), Some("solver_choice"));
    }

    #[test]
    fn test_field_cells_follows_container() {
        let mut doc = FormDocument::new("/run_lp");
        let id = doc.insert_field(Field::new("x", "1", FieldKind::Numeric));
        assert_eq!(field_cells(&doc, id, 80.0), 10);
        make_resizable(&mut doc, id, 160.0).unwrap();
        assert_eq!(field_cells(&doc, id, 80.0), 20);
    }

    #[test]
    fn test_handle_hit_on_last_column_of_resizable_cell() {
        let mut doc = FormDocument::new("/run_lp");
        let a = doc.insert_field(Field::new("a", "1", FieldKind::Numeric));
        let b = doc.insert_field(Field::new("b", "2", FieldKind::Numeric));
        let container = make_resizable(&mut doc, b, 80.0).unwrap();
        let grid = Grid {
            column_labels: vec!["A".into(), "B".into()],
            row_labels: vec!["r".into()],
            rows: vec![vec![a, b]],
        };
        let spans = column_spans(&doc, &grid, 0, area(), 80.0);
        assert_eq!(spans[0], ColumnSpan { col: 0, x: 16, width: 10 });
        assert_eq!(spans[1], ColumnSpan { col: 1, x: 27, width: 10 });

        assert_eq!(
            hit_test(&doc, &grid, &spans, area(), 0, 36, 1),
            Some(Hit::Handle { row: 0, col: 1, container })
        );
        assert_eq!(hit_test(&doc, &grid, &spans, area(), 0, 30, 1), Some(Hit::Cell { row: 0, col: 1 }));
        // Non-resizable cell has no handle.
        assert_eq!(hit_test(&doc, &grid, &spans, area(), 0, 25, 1), Some(Hit::Cell { row: 0, col: 0 }));
        // Header line and gaps hit nothing.
        assert_eq!(hit_test(&doc, &grid, &spans, area(), 0, 30, 0), None);
        assert_eq!(hit_test(&doc, &grid, &spans, area(), 0, 26, 1), None);
    }
}
