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

//! Measure resource

use serde::{Deserialize, Serialize};

use super::datatypes::{
    CodeableConcept, Coding, ContactDetail, Expression, Meta, RelatedArtifact, UsageContext,
};
use super::{PublicationStatus, Resource};

/// Profile claimed by generated measures
pub const MEASURE_PROFILE: &str = "http://hl7.org/fhir/R4/StructureDefinition/Measure";

/// A population component of a measure group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurePopulation {
    /// Population kind
    pub code: CodeableConcept,
    /// Criteria defining the population
    pub criteria: Expression,
}

impl MeasurePopulation {
    /// Population kind code, if any
    pub fn kind_code(&self) -> Option<&str> {
        self.code.first_code()
    }
}

/// A scored group of a measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureGroup {
    /// Group identity
    pub code: CodeableConcept,
    /// Summary description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Population components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub population: Vec<MeasurePopulation>,
}

impl MeasureGroup {
    /// Code of the group's first coding
    pub fn code_str(&self) -> Option<&str> {
        self.code.first_code()
    }
}

/// A quality measure definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Always `Measure`
    pub resource_type: String,
    /// Logical id
    pub id: String,
    /// Metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Canonical URL
    pub url: String,
    /// Business version
    pub version: String,
    /// Computer friendly name
    pub name: String,
    /// Human friendly name
    pub title: String,
    /// Publication status
    pub status: PublicationStatus,
    /// Subject type
    pub subject_codeable_concept: CodeableConcept,
    /// Publication date
    pub date: String,
    /// Publisher
    pub publisher: String,
    /// Description (markdown)
    pub description: String,
    /// Usage contexts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_context: Vec<UsageContext>,
    /// Jurisdictions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jurisdiction: Vec<CodeableConcept>,
    /// Authors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<ContactDetail>,
    /// Supporting documentation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_artifact: Vec<RelatedArtifact>,
    /// Measure type
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub measure_type: Vec<CodeableConcept>,
    /// Scored groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<MeasureGroup>,
}

impl Measure {
    /// Find a group by code
    pub fn group(&self, code: &str) -> Option<&MeasureGroup> {
        self.group.iter().find(|g| g.code_str() == Some(code))
    }

    /// Group codes in order
    pub fn group_codes(&self) -> impl Iterator<Item = &str> {
        self.group.iter().filter_map(MeasureGroup::code_str)
    }

    /// Whether the measure is typed as composite
    pub fn is_composite(&self) -> bool {
        self.measure_type
            .iter()
            .flat_map(|c| c.coding.iter())
            .any(|c| *c == Coding::measure_type_composite())
    }
}

impl Resource for Measure {
    fn resource_type(&self) -> &str {
        "Measure"
    }

    fn id(&self) -> &str {
        &self.id
    }
}
