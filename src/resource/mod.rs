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

//! FHIR R4 output documents
//!
//! Resources are plain serde structs. Serialization follows FHIR JSON
//! conventions: camelCase keys, a `resourceType` tag, and no empty values.

mod bundle;
pub mod datatypes;
mod measure;
mod measure_report;
mod questionnaire;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use bundle::{Bundle, BundleEntry, BundleResource};
pub use datatypes::{
    Attachment, CodeableConcept, Coding, ContactDetail, ContactPoint, Expression, Extension,
    Identifier, Meta, Period, Quantity, Reference, RelatedArtifact, RelatedArtifactType,
    UsageContext,
};
pub use measure::{MEASURE_PROFILE, Measure, MeasureGroup, MeasurePopulation};
pub use measure_report::{
    MEASURE_REPORT_PROFILE, MeasureReport, MeasureReportStatus, MeasureReportType, ReportGroup,
    ReportPopulation,
};
pub use questionnaire::{
    AnswerOption, ElementExtensions, ItemType, QUESTIONNAIRE_PROFILE, Questionnaire,
    QuestionnaireItem,
};

/// Publication status of a definitional resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    /// Under development
    #[default]
    Draft,
    /// Ready for use
    Active,
    /// Withdrawn
    Retired,
}

/// Common behaviour of generated resources
pub trait Resource: Serialize {
    /// FHIR resource type name
    fn resource_type(&self) -> &str;

    /// Logical id
    fn id(&self) -> &str;

    /// Compact JSON rendering
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON rendering
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON value rendering
    fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
