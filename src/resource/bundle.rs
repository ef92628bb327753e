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

//! Bundle resource

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::datatypes::Identifier;
use super::{Measure, MeasureReport, Questionnaire, Resource};
use crate::config::PublicationSettings;

/// A resource carried in a bundle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BundleResource {
    /// Questionnaire entry
    Questionnaire(Box<Questionnaire>),
    /// Measure entry
    Measure(Box<Measure>),
    /// MeasureReport entry
    MeasureReport(Box<MeasureReport>),
}

impl BundleResource {
    fn inner(&self) -> &dyn ResourceRef {
        match self {
            Self::Questionnaire(r) => &**r,
            Self::Measure(r) => &**r,
            Self::MeasureReport(r) => &**r,
        }
    }

    /// Resource type of the entry
    pub fn resource_type(&self) -> &str {
        self.inner().type_name()
    }

    /// Logical id of the entry
    pub fn id(&self) -> &str {
        self.inner().logical_id()
    }

    /// The questionnaire, if this entry holds one
    pub fn as_questionnaire(&self) -> Option<&Questionnaire> {
        match self {
            Self::Questionnaire(r) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// The measure, if this entry holds one
    pub fn as_measure(&self) -> Option<&Measure> {
        match self {
            Self::Measure(r) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// The report, if this entry holds one
    pub fn as_measure_report(&self) -> Option<&MeasureReport> {
        match self {
            Self::MeasureReport(r) => Some(r.as_ref()),
            _ => None,
        }
    }
}

// Object-safe view over `Resource`, which is not dyn compatible because of `Serialize`.
trait ResourceRef {
    fn type_name(&self) -> &str;
    fn logical_id(&self) -> &str;
}

impl<T: Resource> ResourceRef for T {
    fn type_name(&self) -> &str {
        self.resource_type()
    }

    fn logical_id(&self) -> &str {
        self.id()
    }
}

impl From<Questionnaire> for BundleResource {
    fn from(value: Questionnaire) -> Self {
        Self::Questionnaire(Box::new(value))
    }
}

impl From<Measure> for BundleResource {
    fn from(value: Measure) -> Self {
        Self::Measure(Box::new(value))
    }
}

impl From<MeasureReport> for BundleResource {
    fn from(value: MeasureReport) -> Self {
        Self::MeasureReport(Box::new(value))
    }
}

/// A bundle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Absolute URL of the resource
    pub full_url: String,
    /// The resource
    pub resource: BundleResource,
}

/// A collection bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    /// Always `Bundle`
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    /// Logical id
    pub id: String,
    /// Persistent identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,
    /// Always `collection`
    #[serde(rename = "type")]
    pub bundle_type: String,
    /// Assembly time
    pub timestamp: String,
    /// Entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Empty collection bundle with a fresh id
    pub fn collection() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        Self {
            resource_type: "Bundle".to_string(),
            identifier: Some(Identifier {
                system: Some("urn:ietf:rfc:3986".to_string()),
                value: format!("urn:uuid:{id}"),
            }),
            id,
            bundle_type: "collection".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            entry: Vec::new(),
        }
    }

    /// Add a resource with a `fullUrl` under the internal base
    pub fn push(&mut self, settings: &PublicationSettings, resource: impl Into<BundleResource>) {
        let resource = resource.into();
        let full_url = settings.full_url(resource.resource_type(), resource.id());
        self.entry.push(BundleEntry { full_url, resource });
    }

    /// Builder-style `push`
    pub fn with(mut self, settings: &PublicationSettings, resource: impl Into<BundleResource>) -> Self {
        self.push(settings, resource);
        self
    }

    /// Resources in entry order
    pub fn resources(&self) -> impl Iterator<Item = &BundleResource> {
        self.entry.iter().map(|e| &e.resource)
    }
}

impl Resource for Bundle {
    fn resource_type(&self) -> &str {
        "Bundle"
    }

    fn id(&self) -> &str {
        &self.id
    }
}
