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

//! Coded identities shared by formats and generated resources
//!
//! A [`Coding`] is the (system, code, display) triple used everywhere a
//! concept from a controlled vocabulary is referenced: field codes,
//! population kinds, measure types, jurisdictions and security labels.
//! Well-known codings are produced by factory functions rather than
//! re-declared per builder.

use serde::{Deserialize, Serialize};

/// Code system URIs
pub mod systems {
    /// HL7 v3 ActReason (security labels)
    pub const ACT_REASON: &str = "http://terminology.hl7.org/CodeSystem/v3-ActReason";
    /// ISO 3166 country codes
    pub const ISO_COUNTRY: &str = "urn:iso:std:iso:3166";
    /// Measure population kinds
    pub const MEASURE_POPULATION: &str = "http://terminology.hl7.org/CodeSystem/measure-population";
    /// Measure types
    pub const MEASURE_TYPE: &str = "http://terminology.hl7.org/CodeSystem/measure-type";
    /// FHIR resource types
    pub const RESOURCE_TYPE: &str = "http://hl7.org/fhir/resource-types";
    /// SANER measure group codes
    pub const SANER_GROUP: &str = "http://hl7.org/fhir/us/saner/CodeSystem/GroupSystem";
    /// SNOMED CT
    pub const SNOMED_SCT: &str = "http://snomed.info/sct";
    /// Usage context types
    pub const USAGE_CONTEXT_TYPE: &str = "http://terminology.hl7.org/CodeSystem/usage-context-type";
}

/// A (system, code, display) triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coding {
    /// Code system URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Code within the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human readable display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// Empty strings are treated as absent
fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() { None } else { Some(value) }
}

impl Coding {
    /// Create a coding with a display
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            system: non_empty(system),
            code: non_empty(code),
            display: non_empty(display),
        }
    }

    /// Create a coding without a display
    pub fn code(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: non_empty(system),
            code: non_empty(code),
            display: None,
        }
    }

    /// The code, or an empty string
    pub fn code_str(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    /// The system, or an empty string
    pub fn system_str(&self) -> &str {
        self.system.as_deref().unwrap_or_default()
    }

    /// Wrap this coding in a concept
    pub fn concept(&self) -> CodeableConcept {
        CodeableConcept::from_coding(self.clone())
    }

    /// United States jurisdiction
    pub fn united_states() -> Self {
        Self::new(systems::ISO_COUNTRY, "US", "United States of America")
    }

    /// SNOMED CT COVID-19
    pub fn sct_covid() -> Self {
        Self::new(systems::SNOMED_SCT, "840539006", "COVID-19")
    }

    /// Usage context type `focus`
    pub fn usage_context_focus() -> Self {
        Self::code(systems::USAGE_CONTEXT_TYPE, "focus")
    }

    /// Security label marking test data
    pub fn security_test() -> Self {
        Self::new(systems::ACT_REASON, "HTEST", "test health data")
    }

    /// Measure type `composite`
    pub fn measure_type_composite() -> Self {
        Self::new(systems::MEASURE_TYPE, "composite", "Composite")
    }

    /// Measure type `structure`
    pub fn measure_type_structure() -> Self {
        Self::new(systems::MEASURE_TYPE, "structure", "Structure")
    }

    /// Measure type `outcome`
    pub fn measure_type_outcome() -> Self {
        Self::new(systems::MEASURE_TYPE, "outcome", "Outcome")
    }

    /// Resource type `Location`, the subject of SANER measures
    pub fn resource_location() -> Self {
        Self::new(systems::RESOURCE_TYPE, "Location", "Location")
    }
}

/// A concept expressed by one or more codings plus optional text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeableConcept {
    /// Codings for the concept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    /// Plain text representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Concept with a single coding
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }

    /// Concept with text only
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            coding: Vec::new(),
            text: non_empty(text),
        }
    }

    /// First coding, if any
    pub fn first_coding(&self) -> Option<&Coding> {
        self.coding.first()
    }

    /// Code of the first coding that has one
    pub fn first_code(&self) -> Option<&str> {
        self.coding.iter().find_map(|c| c.code.as_deref())
    }
}

/// Kinds of measure population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationKind {
    /// `initial-population`
    InitialPopulation,
    /// `numerator`
    Numerator,
    /// `denominator`
    Denominator,
    /// `measure-population`
    MeasurePopulation,
    /// `measure-observation`
    MeasureObservation,
}

impl PopulationKind {
    /// All kinds, in declaration order
    pub const ALL: [PopulationKind; 5] = [
        Self::InitialPopulation,
        Self::Numerator,
        Self::Denominator,
        Self::MeasurePopulation,
        Self::MeasureObservation,
    ];

    /// The measure-population code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InitialPopulation => "initial-population",
            Self::Numerator => "numerator",
            Self::Denominator => "denominator",
            Self::MeasurePopulation => "measure-population",
            Self::MeasureObservation => "measure-observation",
        }
    }

    /// Display text
    pub fn display(&self) -> &'static str {
        match self {
            Self::InitialPopulation => "Initial Population",
            Self::Numerator => "Numerator",
            Self::Denominator => "Denominator",
            Self::MeasurePopulation => "Measure Population",
            Self::MeasureObservation => "Measure Observation",
        }
    }

    /// Parse a measure-population code; unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Coding for this kind
    pub fn coding(&self) -> Coding {
        Coding::new(systems::MEASURE_POPULATION, self.code(), self.display())
    }

    /// Concept for this kind
    pub fn concept(&self) -> CodeableConcept {
        self.coding().concept()
    }
}
