//! Market view: price readout and history chart.

use crate::state::App;
use crate::widgets::{PriceChart, PriceReadout};
use blend_form::KeyValueStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

pub fn render<S: KeyValueStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    PriceReadout {
        text: &app.price_text,
        style: Style::default().fg(app.theme.tertiary),
        fallback_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, chunks[0]);

    PriceChart {
        series: app.chart.as_ref(),
        line_style: Style::default().fg(app.theme.primary),
        axis_style: Style::default().fg(app.theme.text_dim),
    }
    .render(f, chunks[1]);
}
