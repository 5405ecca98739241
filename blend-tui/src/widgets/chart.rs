//! Price history line chart.

use crate::market::ChartSeries;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

pub struct PriceChart<'a> {
    pub series: Option<&'a ChartSeries>,
    pub line_style: Style,
    pub axis_style: Style,
}

impl<'a> PriceChart<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Brent (1 month)").borders(Borders::ALL);
        let Some((series, (lo, hi))) = self
            .series
            .filter(|s| !s.is_empty())
            .and_then(|s| s.bounds().map(|b| (s, b)))
        else {
            let empty = Paragraph::new("No chart data")
                .style(self.axis_style)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, area);
            return;
        };

        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i as f64, *v))
            .collect();
        // Flat series still need a non-empty y range.
        let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 1.0, hi + 1.0) };
        let x_max = (points.len().saturating_sub(1)).max(1) as f64;

        let dataset = Dataset::default()
            .name("Close")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.line_style)
            .data(&points);
        let x_labels = vec![
            Span::styled(series.first_label().unwrap_or_default().to_string(), self.axis_style),
            Span::styled(series.last_label().unwrap_or_default().to_string(), self.axis_style),
        ];
        let y_labels = vec![
            Span::styled(format!("{:.2}", lo), self.axis_style),
            Span::styled(format!("{:.2}", hi), self.axis_style),
        ];
        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(self.axis_style)
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(self.axis_style)
                    .bounds([lo, hi])
                    .labels(y_labels),
            );
        f.render_widget(chart, area);
    }
}
