//! Form grid views: components, specifications and grades.
//!
//! Cells are laid out by [`crate::grid`], the same layout mouse hit-testing
//! uses, so what is drawn is what is clicked.

use crate::grid::{self, ColumnSpan, Grid, ROW_LABEL_WIDTH};
use crate::nav::View;
use crate::state::App;
use crate::theme::field_color;
use blend_form::{FieldId, KeyValueStore};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HANDLE: char = '┃';

pub fn render<S: KeyValueStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let block = Block::default()
        .title(title(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.controller.resize_session().is_resizing() {
            app.theme.border_focus
        } else {
            app.theme.border
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grid = app.grid();
    let doc = app.controller.document();
    let spans = grid::column_spans(
        doc,
        &grid,
        app.col_offset,
        inner,
        app.config.default_field_width,
    );

    let mut lines = Vec::with_capacity(usize::from(inner.height));
    lines.push(header_line(app, &grid, &spans));
    let visible = usize::from(inner.height.saturating_sub(1));
    for row in (app.row_offset..grid.rows.len()).take(visible) {
        lines.push(row_line(app, &grid, &spans, row));
    }
    if grid.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no rows)",
            Style::default().fg(app.theme.text_dim),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn title<S: KeyValueStore>(app: &App<S>) -> String {
    let mut title = app.active_view.title().to_string();
    if app.active_view == View::Components {
        if let Some(schema) = app.controller.schema() {
            title.push_str(&format!(" | {} properties", schema.len()));
        }
    }
    if app.controller.resize_session().is_resizing() {
        title.push_str(" | resizing");
    }
    title
}

/// Pad or cut `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

fn header_line<'a, S: KeyValueStore>(app: &App<S>, grid: &Grid, spans: &[ColumnSpan]) -> Line<'a> {
    let style = Style::default()
        .fg(app.theme.secondary)
        .add_modifier(Modifier::BOLD);
    let mut out = vec![Span::styled(fit("", usize::from(ROW_LABEL_WIDTH)), style)];
    for span in spans {
        let label = grid.column_labels.get(span.col).map(String::as_str).unwrap_or("");
        out.push(Span::styled(fit(label, usize::from(span.width)), style));
        out.push(Span::raw(" "));
    }
    Line::from(out)
}

fn row_line<'a, S: KeyValueStore>(
    app: &App<S>,
    grid: &Grid,
    spans: &[ColumnSpan],
    row: usize,
) -> Line<'a> {
    let label = grid.row_labels.get(row).map(String::as_str).unwrap_or("");
    let mut out = vec![Span::styled(
        fit(label, usize::from(ROW_LABEL_WIDTH)),
        Style::default().fg(app.theme.primary_dim),
    )];
    for span in spans {
        match grid.cell(row, span.col) {
            Some(id) => out.extend(cell_spans(app, id, row, span)),
            None => out.push(Span::raw(fit("", usize::from(span.width)))),
        }
        out.push(Span::raw(" "));
    }
    Line::from(out)
}

fn cell_spans<'a, S: KeyValueStore>(
    app: &App<S>,
    id: FieldId,
    row: usize,
    span: &ColumnSpan,
) -> Vec<Span<'a>> {
    let doc = app.controller.document();
    let Some(field) = doc.field(id) else {
        return vec![Span::raw(fit("", usize::from(span.width)))];
    };
    let focused = app.focus.row == row && app.focus.col == span.col;
    let editing = app.editing.as_ref().filter(|e| e.field == id);
    let text = match editing {
        Some(edit) => format!("{}_", edit.buffer),
        None => field.value.clone(),
    };
    let content_width = usize::from(span.width.saturating_sub(1));

    let mut style = Style::default().fg(field_color(field.read_only, focused, &app.theme));
    if focused {
        style = style.bg(app.theme.bg_highlight);
    }
    if editing.is_some() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    let handle = match field.container {
        Some(_) => Span::styled(HANDLE.to_string(), Style::default().fg(app.theme.border_focus)),
        None => Span::raw(" "),
    };
    vec![Span::styled(fit(&text, content_width), style), handle]
}
