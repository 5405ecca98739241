//! Blend Core - Form Data Types
//!
//! Plain data shared by the form engine and the terminal client: property
//! classification, field naming, form records and the error taxonomy.
//! No document mutation lives here.

pub mod defaults;
pub mod error;
pub mod naming;
pub mod property;

pub use defaults::{default_template, ComponentRecord, FormTemplate, GradeRecord, SpecRecord};
pub use error::{FieldError, RowError, SchemaError, StoreError};
pub use naming::{Bound, ComponentColumn, GradeColumn};
pub use property::{PropertyClass, PropertyDescriptor};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Header label of the last fixed component column. Property columns follow it.
pub const COST_ANCHOR: &str = "Cost";

/// Literal stored in a field to mean "no effective upper bound".
pub const INF_SENTINEL: &str = "inf";

/// Submission target that identifies the blending form.
pub const FORM_ACTION: &str = "/run_lp";

/// Smallest container width a resize drag may apply, in logical units.
pub const MIN_RESIZE_WIDTH: f64 = 60.0;

/// Flat field name to value mapping persisted between sessions.
pub type FormSnapshot = std::collections::BTreeMap<String, String>;

// ============================================================================
// FIELD MARKERS
// ============================================================================

bitflags! {
    /// Template-provided marker classes on individual fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldMarkers: u8 {
        /// Field is forced blank and read-only at load.
        const EMPTY_FIELD = 0b0000_0001;
        /// Field is made read-only at load, value untouched.
        const READONLY_FIELD = 0b0000_0010;
    }
}

impl Default for FieldMarkers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for FieldMarkers {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldMarkers {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Self::from_bits(bits).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid FieldMarkers bits: {:#04x}", bits))
        })
    }
}

/// Format a numeric bound the way the form displays it (`inf` for unbounded).
pub fn format_bound(value: f64) -> String {
    if value.is_infinite() {
        INF_SENTINEL.to_string()
    } else {
        format_number(value)
    }
}

/// Format a plain number without trailing zeros (`0.5844`, `100`, `1.3`).
pub fn format_number(value: f64) -> String {
    let text = format!("{:.6}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bound_infinite() {
        assert_eq!(format_bound(f64::INFINITY), "inf");
        assert_eq!(format_bound(0.7), "0.7");
    }

    #[test]
    fn test_format_number_trims_zeros() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.5844), "0.5844");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_field_markers_serde_roundtrip() {
        let markers = FieldMarkers::EMPTY_FIELD | FieldMarkers::READONLY_FIELD;
        let json = serde_json::to_string(&markers).unwrap();
        assert_eq!(json, "3");
        let back: FieldMarkers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, markers);
        assert!(serde_json::from_str::<FieldMarkers>("128").is_err());
    }
}
