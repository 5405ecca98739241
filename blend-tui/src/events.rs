//! Event types for the TUI event loop.

use crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// Price readout text, already reduced to its fallback on failure.
    PriceLoaded(String),
    ChartLoaded(Option<crate::market::ChartSeries>),
    SubmitDone(Result<u16, String>),
}
