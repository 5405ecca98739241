//! Quality property classification.

use crate::INF_SENTINEL;
use serde::{Deserialize, Serialize};

/// Behavioural class of a quality property column.
///
/// The class decides both the default a new component row receives and the
/// bound rule applied to the matching specification row. No property belongs
/// to more than one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyClass {
    /// Sulfur, aromatics, benzene, oxygenates and olefins.
    Contaminant,
    /// Research and motor octane numbers.
    Octane,
    /// Reid vapor pressure.
    VaporPressure,
    /// Everything else.
    Standard,
}

impl PropertyClass {
    pub fn of(property: &str) -> Self {
        match property.trim().to_ascii_uppercase().as_str() {
            "SUL" | "ARO" | "BEN" | "OXY" | "OLEFIN" => PropertyClass::Contaminant,
            "RON" | "MON" => PropertyClass::Octane,
            "RVP" => PropertyClass::VaporPressure,
            _ => PropertyClass::Standard,
        }
    }

    /// Value a freshly added component row carries for a property of this class.
    ///
    /// Empty means unmeasured, not zero.
    pub fn new_row_default(&self) -> &'static str {
        match self {
            PropertyClass::Contaminant => "",
            PropertyClass::Octane => INF_SENTINEL,
            PropertyClass::VaporPressure | PropertyClass::Standard => "0",
        }
    }
}

/// One validated property column of the component table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub class: PropertyClass,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let class = PropertyClass::of(&name);
        Self { name, class }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_properties() {
        for p in ["SUL", "ARO", "BEN", "OXY", "OLEFIN"] {
            assert_eq!(PropertyClass::of(p), PropertyClass::Contaminant, "{p}");
        }
        assert_eq!(PropertyClass::of("RON"), PropertyClass::Octane);
        assert_eq!(PropertyClass::of("MON"), PropertyClass::Octane);
        assert_eq!(PropertyClass::of("RVP"), PropertyClass::VaporPressure);
        assert_eq!(PropertyClass::of("OCT"), PropertyClass::Standard);
        assert_eq!(PropertyClass::of("SPG"), PropertyClass::Standard);
    }

    #[test]
    fn test_classify_ignores_case_and_padding() {
        assert_eq!(PropertyClass::of(" sul "), PropertyClass::Contaminant);
        assert_eq!(PropertyClass::of("Ron"), PropertyClass::Octane);
    }

    #[test]
    fn test_new_row_defaults() {
        assert_eq!(PropertyClass::Contaminant.new_row_default(), "");
        assert_eq!(PropertyClass::Octane.new_row_default(), "inf");
        assert_eq!(PropertyClass::VaporPressure.new_row_default(), "0");
        assert_eq!(PropertyClass::Standard.new_row_default(), "0");
    }

    #[test]
    fn test_descriptor_carries_class() {
        let d = PropertyDescriptor::new("BEN");
        assert_eq!(d.name, "BEN");
        assert_eq!(d.class, PropertyClass::Contaminant);
    }
}
