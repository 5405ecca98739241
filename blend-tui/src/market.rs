//! Interpretation of the price and chart payloads.
//!
//! Both functions are total: any malformed payload maps to the fallback
//! readout or to "no chart".

use serde_json::Value;

/// Readout shown whenever the price cannot be determined.
pub const PRICE_UNAVAILABLE: &str = "Price unavailable";

/// Text for the price readout. Accepts the price as a number or a string.
pub fn price_text(payload: &Value) -> String {
    match payload.get("price") {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(price) if price.is_finite() => format!("Brent: ${:.2}", price),
            _ => PRICE_UNAVAILABLE.to_string(),
        },
        Some(Value::String(s)) if !s.trim().is_empty() => format!("Brent: ${}", s.trim()),
        _ => PRICE_UNAVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<(String, f64)>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|(_, v)| *v);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn first_label(&self) -> Option<&str> {
        self.points.first().map(|(l, _)| l.as_str())
    }

    pub fn last_label(&self) -> Option<&str> {
        self.points.last().map(|(l, _)| l.as_str())
    }
}

/// Pair labels with values. `None` when either list is missing.
///
/// Pairs beyond the shorter list are ignored; values that are not finite
/// numbers drop their pair.
pub fn chart_series(payload: &Value) -> Option<ChartSeries> {
    let labels = payload.get("labels")?.as_array()?;
    let values = payload.get("values")?.as_array()?;
    let points = labels
        .iter()
        .zip(values)
        .filter_map(|(label, value)| {
            let value = value.as_f64().filter(|v| v.is_finite())?;
            let label = match label {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((label, value))
        })
        .collect();
    Some(ChartSeries { points })
}
