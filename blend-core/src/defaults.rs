//! Initial form content served with the blending page.
//!
//! The template is what the server renders before any user edit: grades,
//! components with their measured properties, and the specification bounds
//! per grade. It can also be loaded from JSON to describe another refinery.

use crate::format_number;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Short key used in every field name (`C4B`).
    pub name: String,
    /// Human label (`Alkyl Butane`).
    pub tag: String,
    pub min_comp: f64,
    pub availability: f64,
    pub factor: f64,
    /// Property name and measured value, in schema order.
    pub properties: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBound {
    pub grade: String,
    pub min: f64,
    #[serde(with = "infinite_as_string")]
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    pub property: String,
    pub bounds: Vec<GradeBound>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub grades: Vec<GradeRecord>,
    pub properties: Vec<String>,
    pub components: Vec<ComponentRecord>,
    pub specs: Vec<SpecRecord>,
    pub solver_choice: String,
}

impl FormTemplate {
    /// Price of the reference grade used to derive static component costs.
    ///
    /// Falls back to 100 when no grade is named `Regular`.
    pub fn reference_price(&self) -> f64 {
        self.grades
            .iter()
            .find(|g| g.name == "Regular")
            .map(|g| g.price)
            .unwrap_or(100.0)
    }

    /// Displayed cost of a static component: factor times the reference price.
    pub fn component_cost(&self, component: &ComponentRecord) -> String {
        format!("{:.2}", component.factor * self.reference_price())
    }

    pub fn property_value(component: &ComponentRecord, property: &str) -> String {
        component
            .properties
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| format_number(*value))
            .unwrap_or_else(|| "0".to_string())
    }
}

mod infinite_as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() {
            serializer.serialize_str(crate::INF_SENTINEL)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) if s.trim().eq_ignore_ascii_case(crate::INF_SENTINEL) => Ok(f64::INFINITY),
            Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        }
    }
}

const PROPERTIES: [&str; 13] = [
    "SPG", "SUL", "RON", "MON", "RVP", "E70", "E10", "E15", "ARO", "BEN", "OXY", "OLEFIN", "ETH",
];

const GRADES: [(&str, f64, f64, f64); 3] = [
    ("Regular", 4000.0, 400000.0, 100.0),
    ("Premium", 0.0, 400000.0, 110.0),
    ("Super Premium", 0.0, 4000.0, 200.0),
];

#[rustfmt::skip]
const COMPONENTS: [(&str, &str, f64, [f64; 13]); 10] = [
    ("C4B", "Alkyl Butane", 1.30, [0.5844, 0.0001, 93.8, 89.6, 3.191, 100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("IS1", "Isomerate", 1.25, [0.661, 0.5, 88.56, 86.15, 0.839, 92.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("RFL", "Reformate", 1.05, [0.819, 0.0, 97.0, 86.15, 0.139, 0.001, 4.0, 67.3, 61.8, 0.4384, 0.0, 0.7756, 0.0]),
    ("F5X", "Mixed RFC", 0.70, [0.6447, 10.0, 94.6, 89.65, 1.31, 100.0, 100.0, 100.0, 0.0, 1.16, 0.0, 57.7, 0.0]),
    ("RCG", "FCC Gasoline", 0.90, [0.7856, 20.0, 94.43, 82.44, 0.21, 8.8548, 36.4, 67.3, 50.4, 1.7183, 0.0, 19.67, 0.0]),
    ("IC4", "DIB IC4", 0.90, [0.5633, 10.0, 100.05, 97.54, 4.347, 100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("HBY", "SHIP C4", 0.75, [0.5936, 10.0, 98.2, 89.0, 3.674, 100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 60.8, 0.0]),
    ("AKK", "Alkylate", 0.70, [0.7032, 0.0001, 76.13, 92.0, 0.403, 10.0, 35.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("ETH", "Ethanol", 0.75, [0.791, 1.0, 128.0, 100.0, 1.329, 50.0, 100.0, 100.0, 0.0, 0.0, 34.78, 0.0, 100.0]),
    ("LTN", "Light Naptha", 0.75, [0.791, 1.0, 128.0, 100.0, 1.329, 50.0, 100.0, 100.0, 0.0, 0.0, 34.78, 0.0, 0.0]),
];

/// Per property: (min, max) for Regular, Premium, Super Premium.
#[rustfmt::skip]
const SPECS: [(&str, [(f64, f64); 3]); 13] = [
    ("SPG", [(0.72, 0.78), (0.72, 0.78), (0.72, 0.78)]),
    ("SUL", [(0.0, 10.0), (0.0, 10.0), (0.0, 10.0)]),
    ("RON", [(91.0, f64::INFINITY), (95.0, f64::INFINITY), (98.0, f64::INFINITY)]),
    ("MON", [(82.0, f64::INFINITY), (86.0, f64::INFINITY), (89.0, f64::INFINITY)]),
    ("RVP", [(0.0, 0.7), (0.0, 0.7), (0.0, 0.7)]),
    ("E70", [(22.0, 48.0), (22.0, 48.0), (22.0, 48.0)]),
    ("E10", [(44.0, 70.0), (44.0, 70.0), (44.0, 70.0)]),
    ("E15", [(76.0, f64::INFINITY), (76.0, f64::INFINITY), (76.0, f64::INFINITY)]),
    ("ARO", [(0.0, 35.0), (0.0, 35.0), (0.0, 35.0)]),
    ("BEN", [(0.0, 1.0), (0.0, 1.0), (0.0, 1.0)]),
    ("OXY", [(0.0, 2.7), (0.0, 2.7), (0.0, 2.7)]),
    ("OLEFIN", [(0.0, 15.0), (0.0, 15.0), (0.0, 15.0)]),
    ("ETH", [(0.0, 10.0), (0.0, 10.0), (0.0, 10.0)]),
];

/// The stock blending page: three gasoline grades and ten components.
pub fn default_template() -> FormTemplate {
    let grades = GRADES
        .iter()
        .map(|(name, min, max, price)| GradeRecord {
            name: name.to_string(),
            min: *min,
            max: *max,
            price: *price,
        })
        .collect();

    let components = COMPONENTS
        .iter()
        .map(|(name, tag, factor, values)| ComponentRecord {
            name: name.to_string(),
            tag: tag.to_string(),
            min_comp: 0.0,
            availability: 1_000_000.0,
            factor: *factor,
            properties: PROPERTIES
                .iter()
                .zip(values.iter())
                .map(|(p, v)| (p.to_string(), *v))
                .collect(),
        })
        .collect();

    let specs = SPECS
        .iter()
        .map(|(property, bounds)| SpecRecord {
            property: property.to_string(),
            bounds: GRADES
                .iter()
                .zip(bounds.iter())
                .map(|((grade, ..), (min, max))| GradeBound {
                    grade: grade.to_string(),
                    min: *min,
                    max: *max,
                })
                .collect(),
        })
        .collect();

    FormTemplate {
        grades,
        properties: PROPERTIES.iter().map(|p| p.to_string()).collect(),
        components,
        specs,
        solver_choice: "CBC".to_string(),
    }
}
