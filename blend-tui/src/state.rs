//! Application state and the handlers that mutate it.
//!
//! Everything here runs on the event-loop task. Network work is done by the
//! caller; results come back through [`App::set_price`], [`App::set_chart`]
//! and [`App::finish_submit`].

use crate::config::TuiConfig;
use crate::grid::{self, Grid, Hit};
use crate::keys::EditAction;
use crate::market::ChartSeries;
use crate::nav::View;
use crate::theme::SynthBruteTheme;
use crate::views;
use blend_form::{
    FieldId, FormController, GuardOutcome, KeyValueStore, NotificationLevel, SaveOutcome,
};
use chrono::{DateTime, Local, Utc};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, warn};

/// Width change applied by the keyboard resize keys, in logical units.
pub const KEYBOARD_RESIZE_STEP: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub field: FieldId,
    pub buffer: String,
}

pub struct App<S: KeyValueStore> {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub controller: FormController<S>,
    pub active_view: View,
    pub focus: Focus,
    pub editing: Option<EditBuffer>,
    pub row_offset: usize,
    pub col_offset: usize,
    pub price_text: String,
    pub chart: Option<ChartSeries>,
    pub clock: DateTime<Local>,
    /// Last known terminal size; drives hit-testing.
    pub viewport: Rect,
    pub submitting: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(config: TuiConfig, controller: FormController<S>) -> Self {
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            controller,
            active_view: View::Components,
            focus: Focus::default(),
            editing: None,
            row_offset: 0,
            col_offset: 0,
            price_text: "Loading price...".to_string(),
            chart: None,
            clock: Local::now(),
            viewport: Rect::default(),
            submitting: false,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.controller.notify(level, message);
    }

    pub fn grid(&self) -> Grid {
        Grid::for_view(self.controller.document(), self.active_view)
    }

    pub fn focused_field(&self) -> Option<FieldId> {
        self.grid().cell(self.focus.row, self.focus.col)
    }

    /// Area holding the header line and the cell rows of a form view.
    pub fn table_area(&self) -> Rect {
        views::table_area(self.viewport)
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn switch_view(&mut self, view: View) {
        self.cancel_edit();
        self.active_view = view;
        self.focus = Focus::default();
        self.row_offset = 0;
        self.col_offset = 0;
    }

    pub fn move_focus(&mut self, rows: isize, cols: isize) {
        if self.editing.is_some() {
            return;
        }
        let grid = self.grid();
        if grid.rows.is_empty() {
            self.focus = Focus::default();
            return;
        }
        let row = self.focus.row.saturating_add_signed(rows).min(grid.rows.len() - 1);
        let row_len = grid.rows[row].len().max(1);
        let col = self.focus.col.saturating_add_signed(cols).min(row_len - 1);
        self.focus = Focus { row, col };
        self.scroll_to_focus(&grid);
    }

    fn clamp_focus(&mut self) {
        self.move_focus(0, 0);
    }

    fn scroll_to_focus(&mut self, grid: &Grid) {
        let area = self.table_area();
        let visible_rows = usize::from(area.height.saturating_sub(1)).max(1);
        if self.focus.row < self.row_offset {
            self.row_offset = self.focus.row;
        } else if self.focus.row >= self.row_offset + visible_rows {
            self.row_offset = self.focus.row + 1 - visible_rows;
        }

        if self.focus.col < self.col_offset {
            self.col_offset = self.focus.col;
            return;
        }
        let doc = self.controller.document();
        let default_width = self.config.default_field_width;
        while self.col_offset < self.focus.col {
            let spans = grid::column_spans(doc, grid, self.col_offset, area, default_width);
            let full = grid::column_cells(doc, grid, self.focus.col, default_width);
            let shown = spans
                .iter()
                .any(|s| s.col == self.focus.col && s.width == full);
            if shown {
                break;
            }
            self.col_offset += 1;
        }
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    pub fn begin_edit(&mut self) {
        if !self.active_view.is_form() || self.editing.is_some() {
            return;
        }
        let Some(id) = self.focused_field() else {
            return;
        };
        let Some(field) = self.controller.document().field(id) else {
            return;
        };
        if field.read_only {
            let message = format!("{} is read-only", field.name);
            self.notify(NotificationLevel::Warning, message);
            return;
        }
        self.editing = Some(EditBuffer {
            field: id,
            buffer: field.value.clone(),
        });
    }

    pub fn edit(&mut self, action: EditAction) {
        match action {
            EditAction::Commit => self.commit_edit(),
            EditAction::Cancel => self.cancel_edit(),
            EditAction::Insert(c) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.buffer.push(c);
                }
            }
            EditAction::Backspace => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.buffer.pop();
                }
            }
            EditAction::Clear => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.buffer.clear();
                }
            }
        }
    }

    /// Write the buffer into the field, then let the field lose focus.
    fn commit_edit(&mut self) {
        let Some(EditBuffer { field, buffer }) = self.editing.take() else {
            return;
        };
        match self.controller.input(field, buffer) {
            Ok(outcome) => self.report_save(outcome),
            Err(err) => {
                warn!(error = %err, "edit rejected");
                self.notify(NotificationLevel::Warning, err.to_string());
            }
        }
        self.blur(field);
    }

    pub fn cancel_edit(&mut self) {
        if let Some(EditBuffer { field, .. }) = self.editing.take() {
            self.blur(field);
        }
    }

    fn blur(&mut self, field: FieldId) {
        let result = self.controller.blur(field);
        if let Some(GuardOutcome::Restored { value }) = result.guard {
            self.notify(NotificationLevel::Info, format!("Blank value restored to {}", value));
        }
        if let Some(outcome) = result.saved {
            self.report_save(outcome);
        }
    }

    fn report_save(&self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Saved { fields } => debug!(fields, "form saved"),
            // Logged by the store.
            SaveOutcome::Failed { .. } => {}
        }
    }

    // ------------------------------------------------------------------------
    // Rows and resizing
    // ------------------------------------------------------------------------

    pub fn add_row(&mut self) {
        self.cancel_edit();
        if self.controller.add_row().is_ok() {
            if self.active_view != View::Components {
                self.switch_view(View::Components);
            }
            let last = self.controller.document().components.rows.len().saturating_sub(1);
            self.focus = Focus { row: last, col: 0 };
            let grid = self.grid();
            self.scroll_to_focus(&grid);
        }
    }

    pub fn delete_row(&mut self) {
        if self.active_view != View::Components {
            return;
        }
        self.cancel_edit();
        let Some(tag) = self
            .controller
            .document()
            .components
            .rows
            .get(self.focus.row)
            .map(|r| r.tag.clone())
        else {
            return;
        };
        if self.controller.remove_row(&tag).is_ok() {
            let outcome = self.controller.save();
            self.report_save(outcome);
            self.clamp_focus();
        }
    }

    /// Keyboard resize of the focused field by `delta` logical units.
    pub fn resize_focused(&mut self, delta: f64) {
        let Some(id) = self.focused_field() else {
            return;
        };
        let container = self
            .controller
            .document()
            .field(id)
            .and_then(|f| f.container);
        match container {
            Some(container) => {
                if self.controller.resize_by(container, delta).is_none() {
                    debug!(container = container.0, delta, "resize below minimum ignored");
                }
            }
            None => self.notify(NotificationLevel::Info, "Field is not resizable"),
        }
    }

    pub fn mouse(&mut self, event: MouseEvent) {
        if !self.active_view.is_form() {
            return;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let grid = self.grid();
                let area = self.table_area();
                let doc = self.controller.document();
                let spans = grid::column_spans(
                    doc,
                    &grid,
                    self.col_offset,
                    area,
                    self.config.default_field_width,
                );
                let hit = grid::hit_test(doc, &grid, &spans, area, self.row_offset, event.column, event.row);
                match hit {
                    Some(Hit::Handle { row, col, container }) => {
                        self.cancel_edit();
                        self.focus = Focus { row, col };
                        self.controller
                            .press_handle(container, grid::pointer_units(event.column));
                    }
                    Some(Hit::Cell { row, col }) => {
                        self.cancel_edit();
                        self.focus = Focus { row, col };
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.controller.pointer_move(grid::pointer_units(event.column));
            }
            // Release anywhere ends the session.
            MouseEventKind::Up(_) => self.controller.pointer_release(),
            MouseEventKind::ScrollDown => self.move_focus(1, 0),
            MouseEventKind::ScrollUp => self.move_focus(-1, 0),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Save and collect the payload. `None` while a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<Vec<(String, String)>> {
        if self.submitting {
            self.notify(NotificationLevel::Info, "Submission already in progress");
            return None;
        }
        self.cancel_edit();
        self.submitting = true;
        Some(self.controller.submit())
    }

    pub fn finish_submit(&mut self, result: Result<u16, String>) {
        self.submitting = false;
        match result {
            Ok(status) => self.notify(
                NotificationLevel::Success,
                format!("Optimization request accepted (HTTP {})", status),
            ),
            Err(message) => self.notify(
                NotificationLevel::Error,
                format!("Optimization request failed: {}", message),
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Timers and market data
    // ------------------------------------------------------------------------

    pub fn tick_clock(&mut self, now: DateTime<Utc>) {
        self.clock = now.with_timezone(&Local);
        self.controller.notifications_mut().prune(now);
    }

    pub fn set_price(&mut self, text: String) {
        self.price_text = text;
    }

    /// A missing series leaves the previous chart in place.
    pub fn set_chart(&mut self, series: Option<ChartSeries>) {
        if let Some(series) = series {
            self.chart = Some(series);
        }
    }
}
