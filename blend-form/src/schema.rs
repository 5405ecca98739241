//! Property schema derived from the component table header.

use crate::document::ComponentTable;
use blend_core::{PropertyDescriptor, SchemaError, COST_ANCHOR};
use std::collections::HashSet;

/// Ordered, validated property columns that every component row must carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertySchema {
    properties: Vec<PropertyDescriptor>,
}

impl PropertySchema {
    /// Validate the labels found after the anchor column.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut properties = Vec::new();
        for (column, label) in labels.into_iter().enumerate() {
            let name = label.as_ref().trim();
            if name.is_empty() {
                return Err(SchemaError::BlankLabel { column });
            }
            if !seen.insert(name.to_string()) {
                return Err(SchemaError::DuplicateProperty {
                    name: name.to_string(),
                });
            }
            properties.push(PropertyDescriptor::new(name));
        }
        Ok(Self { properties })
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Anything that can produce the live property schema.
pub trait SchemaSource {
    fn load_schema(&self) -> Result<PropertySchema, SchemaError>;
}

impl SchemaSource for ComponentTable {
    fn load_schema(&self) -> Result<PropertySchema, SchemaError> {
        read_property_schema(self)
    }
}

/// Every label strictly after the `Cost` column of the header's last row.
pub fn read_property_schema(table: &ComponentTable) -> Result<PropertySchema, SchemaError> {
    let labels = table.header.last().ok_or(SchemaError::MissingHeader)?;
    let anchor = labels
        .iter()
        .position(|label| label.trim() == COST_ANCHOR)
        .ok_or_else(|| SchemaError::AnchorNotFound {
            anchor: COST_ANCHOR.to_string(),
        })?;
    PropertySchema::from_labels(&labels[anchor + 1..])
}
