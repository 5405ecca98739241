//! Reusable widget components.

pub mod chart;
pub mod clock;
pub mod price;

pub use chart::PriceChart;
pub use clock::{clock_text, Clock};
pub use price::PriceReadout;
