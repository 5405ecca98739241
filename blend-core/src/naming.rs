//! Field naming patterns shared by the form and the submission target.
//!
//! Every component field is `component_<tag>_<suffix>`; property fields use
//! the suffix `property_<property>`. The server parses the submission by these
//! exact names, so every row (static or added) must follow them.

use serde::{Deserialize, Serialize};

/// Name of the solver selection field.
pub const SOLVER_CHOICE_FIELD: &str = "solver_choice";

/// Fixed columns of the component table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentColumn {
    Name,
    Tag,
    MinComp,
    Availability,
    Factor,
    Cost,
}

impl ComponentColumn {
    pub fn all() -> &'static [ComponentColumn] {
        &[
            ComponentColumn::Name,
            ComponentColumn::Tag,
            ComponentColumn::MinComp,
            ComponentColumn::Availability,
            ComponentColumn::Factor,
            ComponentColumn::Cost,
        ]
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ComponentColumn::Name => "name",
            ComponentColumn::Tag => "tag",
            ComponentColumn::MinComp => "min_comp",
            ComponentColumn::Availability => "availability",
            ComponentColumn::Factor => "factor",
            ComponentColumn::Cost => "cost",
        }
    }

    pub fn header_label(&self) -> &'static str {
        match self {
            ComponentColumn::Name => "Name",
            ComponentColumn::Tag => "Tag",
            ComponentColumn::MinComp => "Min Comp",
            ComponentColumn::Availability => "Availability",
            ComponentColumn::Factor => "Factor",
            ComponentColumn::Cost => crate::COST_ANCHOR,
        }
    }

    /// Identity columns hold text; the rest are numeric entry fields.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ComponentColumn::Name | ComponentColumn::Tag)
    }

    /// Default value of this column on a newly added row.
    ///
    /// Identity columns have none; they are derived from the row tag.
    pub fn new_row_default(&self) -> Option<&'static str> {
        match self {
            ComponentColumn::Name | ComponentColumn::Tag => None,
            ComponentColumn::MinComp => Some("0"),
            ComponentColumn::Availability => Some("0"),
            ComponentColumn::Factor => Some("1"),
            ComponentColumn::Cost => Some("25.00"),
        }
    }

    pub fn field_name(&self, tag: &str) -> String {
        format!("component_{}_{}", tag, self.suffix())
    }
}

pub fn property_field_name(tag: &str, property: &str) -> String {
    format!("component_{}_property_{}", tag, property)
}

/// Lower or upper side of a specification constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub fn suffix(&self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Max => "max",
        }
    }
}

pub fn spec_field_name(property: &str, grade: &str, bound: Bound) -> String {
    format!("spec_{}_{}_{}", property, grade, bound.suffix())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeColumn {
    Min,
    Max,
    Price,
}

impl GradeColumn {
    pub fn all() -> &'static [GradeColumn] {
        &[GradeColumn::Min, GradeColumn::Max, GradeColumn::Price]
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            GradeColumn::Min => "min",
            GradeColumn::Max => "max",
            GradeColumn::Price => "price",
        }
    }

    pub fn header_label(&self) -> &'static str {
        match self {
            GradeColumn::Min => "Min",
            GradeColumn::Max => "Max",
            GradeColumn::Price => "Price",
        }
    }
}

pub fn grade_field_name(grade: &str, column: GradeColumn) -> String {
    format!("grade_{}_{}", grade, column.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_field_names() {
        assert_eq!(ComponentColumn::Name.field_name("NC1"), "component_NC1_name");
        assert_eq!(ComponentColumn::MinComp.field_name("C4B"), "component_C4B_min_comp");
        assert_eq!(property_field_name("NC1", "SUL"), "component_NC1_property_SUL");
    }

    #[test]
    fn test_cost_is_anchor_label() {
        assert_eq!(ComponentColumn::Cost.header_label(), crate::COST_ANCHOR);
        assert_eq!(ComponentColumn::all().last(), Some(&ComponentColumn::Cost));
    }

    #[test]
    fn test_numeric_defaults() {
        let defaults: Vec<_> = ComponentColumn::all()
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.new_row_default())
            .collect();
        assert_eq!(defaults, vec![Some("0"), Some("0"), Some("1"), Some("25.00")]);
        assert_eq!(ComponentColumn::Name.new_row_default(), None);
    }

    #[test]
    fn test_spec_and_grade_names() {
        assert_eq!(
            spec_field_name("RON", "Super Premium", Bound::Max),
            "spec_RON_Super Premium_max"
        );
        assert_eq!(grade_field_name("Regular", GradeColumn::Price), "grade_Regular_price");
    }
}
