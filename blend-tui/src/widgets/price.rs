//! Commodity price readout.

use crate::market::PRICE_UNAVAILABLE;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct PriceReadout<'a> {
    pub text: &'a str,
    pub style: Style,
    pub fallback_style: Style,
}

impl<'a> PriceReadout<'a> {
    pub fn is_fallback(&self) -> bool {
        self.text == PRICE_UNAVAILABLE
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let style = if self.is_fallback() {
            self.fallback_style
        } else {
            self.style.add_modifier(Modifier::BOLD)
        };
        let widget = Paragraph::new(self.text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().title("Price").borders(Borders::ALL));
        f.render_widget(widget, area);
    }
}
