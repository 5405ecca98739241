//! Wall clock, refreshed by the clock timer.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn clock_text(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub struct Clock<'a> {
    pub time: &'a DateTime<Local>,
    pub style: Style,
}

impl<'a> Clock<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let widget = Paragraph::new(clock_text(self.time))
            .style(self.style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}
