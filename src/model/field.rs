// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Field definitions for reporting formats

use serde::{Deserialize, Serialize};

use super::coding::Coding;

/// Data type of a field
///
/// The set is closed: builders match on it exhaustively so that a new
/// variant must be handled everywhere before the crate compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Non-interactive text
    Display,
    /// Calendar date
    Date,
    /// Non-negative integer count
    Count,
    /// Ratio of two counts
    Percentage,
    /// Yes/no answer
    Boolean,
    /// One of a list of options
    Choice,
    /// Free text
    Text,
    /// Single-line text
    ShortString,
}

/// Measure type category of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasureCategory {
    /// Not a measure
    #[default]
    None,
    /// Structure measure
    Structure,
    /// Outcome measure
    Outcome,
    /// Composite measure
    Composite,
}

impl MeasureCategory {
    /// The measure-type coding, if the category has one
    pub fn coding(&self) -> Option<Coding> {
        match self {
            Self::None => None,
            Self::Structure => Some(Coding::measure_type_structure()),
            Self::Outcome => Some(Coding::measure_type_outcome()),
            Self::Composite => Some(Coding::measure_type_composite()),
        }
    }
}

/// An answer option for a choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Option text
    pub text: String,
    /// Whether selecting this option excludes the others
    pub exclusive: bool,
}

impl FieldOption {
    /// Exclusive option
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exclusive: true,
        }
    }

    /// Option with explicit exclusivity
    pub fn with_exclusive(text: impl Into<String>, exclusive: bool) -> Self {
        Self {
            text: text.into(),
            exclusive,
        }
    }
}

/// A single field of a reporting format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Unique key within a format
    pub name: String,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Data type
    pub field_type: FieldType,
    /// Measure category
    pub measure_category: MeasureCategory,
    /// Whether an answer is required
    pub required: bool,
    /// Inclusive lower bound for counts
    pub count_min: Option<i64>,
    /// Inclusive upper bound for counts
    pub count_max: Option<i64>,
    /// Ordered answer options for choice fields
    pub options: Vec<FieldOption>,
}

impl Field {
    /// Create a field with no description, bounds or options
    pub fn new(name: impl Into<String>, title: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: None,
            field_type,
            measure_category: MeasureCategory::None,
            required: false,
            count_min: None,
            count_max: None,
            options: Vec::new(),
        }
    }

    /// Set the description; empty text leaves it unset
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Set the measure category
    pub fn with_category(mut self, category: MeasureCategory) -> Self {
        self.measure_category = category;
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set inclusive count bounds
    pub fn with_bounds(mut self, min: i64, max: i64) -> Self {
        self.count_min = Some(min);
        self.count_max = Some(max);
        self
    }

    /// Set the answer options
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Description text, or an empty string
    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Description, falling back to the title and then the name
    pub fn measure_text(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| Some(self.title.as_str()).filter(|t| !t.is_empty()))
            .unwrap_or(&self.name)
    }

    /// Whether a count lies within the field's bounds; bounds are inclusive
    pub fn accepts_count(&self, value: i64) -> bool {
        self.count_min.is_none_or(|min| value >= min) && self.count_max.is_none_or(|max| value <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_text_fallback_chain() {
        let field = Field::new("numBeds", "Beds", FieldType::Count).with_description("All beds");
        assert_eq!(field.measure_text(), "All beds");

        let field = Field::new("numBeds", "Beds", FieldType::Count);
        assert_eq!(field.measure_text(), "Beds");

        let field = Field::new("numBeds", "", FieldType::Count).with_description("");
        assert_eq!(field.measure_text(), "numBeds");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let field = Field::new("died", "Deaths", FieldType::Count).with_bounds(0, 1500);
        assert!(field.accepts_count(0));
        assert!(field.accepts_count(1500));
        assert!(!field.accepts_count(-1));
        assert!(!field.accepts_count(1501));

        let unbounded = Field::new("beds", "Beds", FieldType::Count);
        assert!(unbounded.accepts_count(i64::MAX));
    }

    #[test]
    fn test_option_defaults_to_exclusive() {
        assert!(FieldOption::new("Zero days").exclusive);
        assert!(!FieldOption::with_exclusive("Other", false).exclusive);
    }

    #[test]
    fn test_measure_category_coding() {
        assert_eq!(MeasureCategory::None.coding(), None);
        assert_eq!(
            MeasureCategory::Outcome.coding().unwrap().code.as_deref(),
            Some("outcome")
        );
    }
}
