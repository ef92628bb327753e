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

//! Publication settings shared by all generated resources

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Canonical base for SANER resources
pub const DEFAULT_CANONICAL_URL: &str = "http://build.fhir.org/ig/AudaciousInquiry/saner-ig";

/// Base used for bundle entry `fullUrl`s
pub const DEFAULT_INTERNAL_URL: &str = "https://github.com/microsoft-healthcare-madison/learning-spike-erp/";

/// Settings stamped onto generated Questionnaire, Measure and MeasureReport resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicationSettings {
    /// Canonical URL base; resource URLs are `{canonical_url}/{format name}`
    pub canonical_url: String,

    /// Version written to Questionnaire resources
    pub questionnaire_version: String,

    /// Version written to Measure resources
    pub measure_version: String,

    /// Publication date (FHIR dateTime)
    pub publication_date: String,

    /// Publisher name
    pub publisher: String,

    /// Base URL for bundle entries
    pub internal_url: String,

    /// Whether reports carry the HTEST security label
    pub tag_reports_as_test: bool,
}

impl PublicationSettings {
    /// Parse settings from JSON; missing keys take their default values
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Use a different canonical URL base
    pub fn with_canonical_url(mut self, canonical_url: impl Into<String>) -> Self {
        self.canonical_url = canonical_url.into();
        self
    }

    /// Use a different publisher
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    /// Use a different internal bundle base URL
    pub fn with_internal_url(mut self, internal_url: impl Into<String>) -> Self {
        self.internal_url = internal_url.into();
        self
    }

    /// Toggle the HTEST security label on reports
    pub fn with_test_tag(mut self, tag_reports_as_test: bool) -> Self {
        self.tag_reports_as_test = tag_reports_as_test;
        self
    }

    /// Canonical URL for a format
    pub fn format_url(&self, format_name: &str) -> String {
        format!("{}/{}", self.canonical_url, format_name)
    }

    /// Bundle `fullUrl` for a resource
    pub fn full_url(&self, resource_type: &str, id: &str) -> String {
        format!("{}{}/{}", self.internal_url, resource_type, id)
    }
}

impl Default for PublicationSettings {
    fn default() -> Self {
        Self {
            canonical_url: DEFAULT_CANONICAL_URL.to_string(),
            questionnaire_version: "20200422.01".to_string(),
            measure_version: "20200421.01".to_string(),
            publication_date: "2020-04-21T00:00:00Z".to_string(),
            publisher: "HL7 SANER-IG".to_string(),
            internal_url: DEFAULT_INTERNAL_URL.to_string(),
            tag_reports_as_test: true,
        }
    }
}
