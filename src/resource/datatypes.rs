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

//! FHIR R4 datatypes used by the generated resources

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use crate::model::coding::{CodeableConcept, Coding};

/// Argonaut item-order extension
pub const ITEM_ORDER_EXTENSION: &str =
    "http://fhir.org/guides/argonaut/questionnaire/StructureDefinition/extension-itemOrder";

/// Exclusive answer option extension
pub const OPTION_EXCLUSIVE_EXTENSION: &str =
    "http://hl7.org/fhir/StructureDefinition/questionnaire-optionExclusive";

/// An extension carrying a decimal or boolean value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Extension definition URL
    pub url: String,

    /// Decimal value
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_decimal: Option<Decimal>,

    /// Boolean value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
}

impl Extension {
    /// Decimal-valued extension
    pub fn decimal(url: impl Into<String>, value: Decimal) -> Self {
        Self {
            url: url.into(),
            value_decimal: Some(value),
            value_boolean: None,
        }
    }

    /// Boolean-valued extension
    pub fn boolean(url: impl Into<String>, value: bool) -> Self {
        Self {
            url: url.into(),
            value_decimal: None,
            value_boolean: Some(value),
        }
    }

    /// Item-order extension for a zero-based position
    pub fn item_order(order: usize) -> Self {
        Self::decimal(ITEM_ORDER_EXTENSION, Decimal::from(order as u64))
    }

    /// Exclusive-option extension
    pub fn option_exclusive(exclusive: bool) -> Self {
        Self::boolean(OPTION_EXCLUSIVE_EXTENSION, exclusive)
    }
}

/// Find the item-order value among extensions
pub fn item_order_of(extensions: &[Extension]) -> Option<Decimal> {
    extensions
        .iter()
        .find(|e| e.url == ITEM_ORDER_EXTENSION)
        .and_then(|e| e.value_decimal)
}

/// Resource metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Profiles the resource claims to conform to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile: Vec<String>,

    /// Security labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Coding>,
}

impl Meta {
    /// Metadata with a single profile
    pub fn with_profile(profile: impl Into<String>) -> Self {
        Self {
            profile: vec![profile.into()],
            security: Vec::new(),
        }
    }
}

/// Reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    /// Relative reference, e.g. `Location/123`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Display text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Reference to `{resource_type}/{id}`
    pub fn to(resource_type: &str, id: &str, display: Option<&str>) -> Self {
        Self {
            reference: Some(format!("{resource_type}/{id}")),
            display: display.map(str::to_string),
        }
    }
}

/// Time period bounded by dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Period {
    /// Start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    /// End date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl Period {
    /// Period from start to end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// A measured amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quantity {
    /// Numerical value
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
}

impl Quantity {
    /// Quantity with a value
    pub fn new(value: Decimal) -> Self {
        Self { value: Some(value) }
    }
}

/// A textual expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Expression {
    /// Natural language description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expression language media type
    pub language: String,

    /// Expression body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl Expression {
    /// Plain-text expression
    pub fn plain_text(description: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            language: "text/plain".to_string(),
            expression: Some(expression.into()),
        }
    }
}

/// Usage context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageContext {
    /// Context type
    pub code: Coding,
    /// Context value
    pub value_codeable_concept: CodeableConcept,
}

impl UsageContext {
    /// Focus on COVID-19
    pub fn covid_focus() -> Self {
        Self {
            code: Coding::usage_context_focus(),
            value_codeable_concept: Coding::sct_covid().concept(),
        }
    }
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identifier {
    /// Namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Value
    pub value: String,
}

/// Related artifact type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelatedArtifactType {
    /// Additional documentation
    Documentation,
    /// Supporting citation
    Citation,
}

/// Attached document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attachment {
    /// Location of the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<String>,
}

/// A documentation reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedArtifact {
    /// Artifact type
    #[serde(rename = "type")]
    pub artifact_type: RelatedArtifactType,
    /// Short label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Display text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Bibliographic citation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    /// Location of the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Attached document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Attachment>,
}

impl RelatedArtifact {
    /// Documentation artifact with a label
    pub fn documentation(label: impl Into<String>) -> Self {
        Self {
            artifact_type: RelatedArtifactType::Documentation,
            label: Some(label.into()),
            display: None,
            citation: None,
            url: None,
            document: None,
        }
    }

    /// Set the display text
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Set the citation
    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach a document
    pub fn with_document(mut self, url: impl Into<String>, creation: impl Into<String>) -> Self {
        self.document = Some(Attachment {
            url: Some(url.into()),
            creation: Some(creation.into()),
        });
        self
    }
}

/// Contact point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPoint {
    /// Contact system, e.g. `email`
    pub system: String,
    /// Contact value
    pub value: String,
}

/// Contact details of an author or publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    /// Contact name
    pub name: String,
    /// Contact points
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,
}

impl ContactDetail {
    /// Named contact
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            telecom: Vec::new(),
        }
    }

    /// Add an email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.telecom.push(ContactPoint {
            system: "email".to_string(),
            value: email.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_order_renders_as_number() {
        let json = serde_json::to_value(Extension::item_order(3)).unwrap();
        assert_eq!(json, json!({"url": ITEM_ORDER_EXTENSION, "valueDecimal": 3.0}));
    }

    #[test]
    fn test_item_order_lookup() {
        let extensions = vec![Extension::option_exclusive(true), Extension::item_order(2)];
        assert_eq!(item_order_of(&extensions), Some(Decimal::from(2)));
        assert_eq!(item_order_of(&[]), None);
    }

    #[test]
    fn test_period_renders_dates() {
        let period = Period::new(
            NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 4, 2).unwrap(),
        );
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json, json!({"start": "2020-04-01", "end": "2020-04-02"}));
    }

    #[test]
    fn test_reference_to() {
        let reference = Reference::to("Location", "loc-1", Some("General Hospital"));
        assert_eq!(reference.reference.as_deref(), Some("Location/loc-1"));
        assert_eq!(reference.display.as_deref(), Some("General Hospital"));
    }

    #[test]
    fn test_related_artifact_type_code() {
        let json = serde_json::to_value(RelatedArtifact::documentation("Module")).unwrap();
        assert_eq!(json, json!({"type": "documentation", "label": "Module"}));
    }
}
