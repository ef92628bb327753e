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

//! MeasureReport resource

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Resource;
use super::datatypes::{CodeableConcept, Meta, Period, Quantity, Reference};

/// Profile claimed by generated reports
pub const MEASURE_REPORT_PROFILE: &str = "http://hl7.org/fhir/R4/StructureDefinition/MeasureReport";

/// Report status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureReportStatus {
    /// All data collected
    #[default]
    Complete,
    /// Still collecting
    Pending,
    /// Entered in error
    Error,
}

/// Report type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasureReportType {
    /// Single subject
    Individual,
    /// List of subjects
    SubjectList,
    /// Aggregate counts
    #[default]
    Summary,
    /// Data collection
    DataCollection,
}

/// A population count in a report group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPopulation {
    /// Population kind
    pub code: CodeableConcept,
    /// Size of the population
    pub count: i64,
}

impl ReportPopulation {
    /// Population kind code, if any
    pub fn kind_code(&self) -> Option<&str> {
        self.code.first_code()
    }
}

/// A populated group of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGroup {
    /// Measure group identity
    pub code: CodeableConcept,
    /// Population counts, absent when nothing was scored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Vec<ReportPopulation>>,
    /// Group score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_score: Option<Quantity>,
}

impl ReportGroup {
    /// Code of the group's first coding
    pub fn code_str(&self) -> Option<&str> {
        self.code.first_code()
    }

    /// Score value, if scored
    pub fn score(&self) -> Option<Decimal> {
        self.measure_score.and_then(|q| q.value)
    }

    /// Count of the population with the given kind code
    pub fn count(&self, kind: &str) -> Option<i64> {
        self.population
            .as_deref()?
            .iter()
            .find(|p| p.kind_code() == Some(kind))
            .map(|p| p.count)
    }
}

/// Results of a measure for one reporting period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureReport {
    /// Always `MeasureReport`
    pub resource_type: String,
    /// Logical id
    pub id: String,
    /// Metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Report status
    pub status: MeasureReportStatus,
    /// Report type
    #[serde(rename = "type")]
    pub report_type: MeasureReportType,
    /// Measure URL
    pub measure: String,
    /// Reported location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,
    /// Report date
    pub date: String,
    /// Reporter organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reference>,
    /// Collection period
    pub period: Period,
    /// Groups parallel to the measure
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<ReportGroup>,
}

impl MeasureReport {
    /// Find a group by code
    pub fn group(&self, code: &str) -> Option<&ReportGroup> {
        self.group.iter().find(|g| g.code_str() == Some(code))
    }
}

impl Resource for MeasureReport {
    fn resource_type(&self) -> &str {
        "MeasureReport"
    }

    fn id(&self) -> &str {
        &self.id
    }
}
