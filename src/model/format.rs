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

//! Reporting format (schema) definitions
//!
//! A [`Format`] describes a reporting form: its fields keyed by name, the
//! section layout used to render a Questionnaire, the ordered subset of
//! fields that are measured, and optional coded groupings. Formats are
//! assembled once and shared read-only behind an `Arc`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::coding::{Coding, PopulationKind};
use super::field::Field;
use crate::resource::{ContactDetail, RelatedArtifact};

/// A question placed in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Field whose value the question collects
    pub value_field: String,
    /// Field whose title/description label the question
    pub display_field: Option<String>,
    /// Render only the title, without the description
    pub use_title_only: bool,
}

impl Question {
    /// Question labelled by its own field's title and description
    pub fn new(value_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            display_field: None,
            use_title_only: false,
        }
    }

    /// Question labelled by its own field's title only
    pub fn title_only(value_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            display_field: None,
            use_title_only: true,
        }
    }

    /// Question labelled by another field's title only
    pub fn with_display(value_field: impl Into<String>, display_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            display_field: Some(display_field.into()),
            use_title_only: true,
        }
    }
}

/// A titled, ordered list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title, or the name of a field whose label titles the section
    pub title: String,
    /// Questions in display order
    pub questions: Vec<Question>,
}

impl Section {
    /// Create a section
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }
}

/// A named population inside a grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingPopulation {
    /// Field name supplying the population
    pub name: String,
    /// Population kind, when one is assigned
    pub kind: Option<PopulationKind>,
}

impl GroupingPopulation {
    /// Create a population
    pub fn new(name: impl Into<String>, kind: Option<PopulationKind>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A coded grouping of related fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    /// Coded identity
    pub coding: Coding,
    /// Descriptive text
    pub text: String,
    /// Member populations
    pub populations: Vec<GroupingPopulation>,
}

impl Grouping {
    /// Create a grouping
    pub fn new(
        coding: Coding,
        text: impl Into<String>,
        populations: Vec<GroupingPopulation>,
    ) -> Self {
        Self {
            coding,
            text: text.into(),
            populations,
        }
    }
}

/// A reporting format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    /// Global identifier
    pub name: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Fields by name, in definition order
    pub fields: IndexMap<String, Field>,
    /// Questionnaire layout
    pub sections: Vec<Section>,
    /// Fields that become measure groups, in order
    pub measure_fields: Vec<String>,
    /// Coded groupings
    pub groupings: Vec<Grouping>,
    /// Whether multi-format report bundles include this format
    pub measure_report_enabled: bool,
    /// Documentation references
    pub artifacts: Vec<RelatedArtifact>,
    /// Authoring contacts
    pub authors: Vec<ContactDetail>,
}

impl Format {
    /// Create an empty format
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            fields: IndexMap::new(),
            sections: Vec::new(),
            measure_fields: Vec::new(),
            groupings: Vec::new(),
            measure_report_enabled: false,
            artifacts: Vec::new(),
            authors: Vec::new(),
        }
    }

    /// Add a field, replacing any field with the same name
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Add several fields
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        for field in fields {
            self.fields.insert(field.name.clone(), field);
        }
        self
    }

    /// Append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Set the measured fields
    pub fn with_measure_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measure_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Append a grouping
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.groupings.push(grouping);
        self
    }

    /// Append a documentation reference
    pub fn with_artifact(mut self, artifact: RelatedArtifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Append an author
    pub fn with_author(mut self, author: ContactDetail) -> Self {
        self.authors.push(author);
        self
    }

    /// Include this format in multi-format report bundles
    pub fn enable_measure_report(mut self) -> Self {
        self.measure_report_enabled = true;
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Measured fields that resolve to a field definition
    pub fn resolved_measure_fields(&self) -> impl Iterator<Item = &Field> {
        self.measure_fields.iter().filter_map(|name| self.fields.get(name))
    }
}
