//! View rendering dispatch.

pub mod form;
pub mod market;

use crate::nav::View;
use crate::state::App;
use crate::theme::{notification_color, notification_label};
use crate::widgets::{Clock, PriceReadout};
use blend_form::KeyValueStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

fn split(area: Rect) -> [Rect; 3] {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
    [layout[0], layout[1], layout[2]]
}

/// Main body region for a terminal of size `viewport`.
pub fn body_area(viewport: Rect) -> Rect {
    split(viewport)[1]
}

/// Inside of the bordered form block: header line plus cell rows.
pub fn table_area(viewport: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(body_area(viewport))
}

pub fn render_view<S: KeyValueStore>(f: &mut Frame<'_>, app: &App<S>) {
    let [header, body, footer] = split(f.size());

    render_header(f, app, header);

    match app.active_view {
        View::Components | View::Specifications | View::Grades => form::render(f, app, body),
        View::Market => market::render(f, app, body),
    }

    render_footer(f, app, footer);
}

fn render_header<S: KeyValueStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(24),
            Constraint::Length(23),
        ])
        .split(area);

    let mut tabs = vec![Span::styled("BLEND | ", Style::default().fg(app.theme.primary))];
    for (i, view) in View::all().iter().enumerate() {
        let style = if *view == app.active_view {
            Style::default().fg(app.theme.bg).bg(app.theme.primary)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        tabs.push(Span::styled(format!(" {} {} ", i + 1, view.title()), style));
    }
    let title = Paragraph::new(Line::from(tabs)).block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    PriceReadout {
        text: &app.price_text,
        style: Style::default().fg(app.theme.tertiary),
        fallback_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, chunks[1]);

    Clock {
        time: &app.clock,
        style: Style::default().fg(app.theme.text),
    }
    .render(f, chunks[2]);
}

fn render_footer<S: KeyValueStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let help = if app.editing.is_some() {
        "Enter commit • Esc cancel • Ctrl+U clear"
    } else {
        "arrows move • Enter edit • n new row • d delete row • [ ] resize • s submit • Tab view • q quit"
    };
    let (text, style) = if let Some(note) = app.controller.notifications().latest() {
        (
            format!("{}: {}", notification_label(note.level), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}
