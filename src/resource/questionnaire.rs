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

//! Questionnaire resource

use serde::{Deserialize, Serialize};

use super::datatypes::{CodeableConcept, Coding, Extension, Meta, UsageContext, item_order_of};
use super::{PublicationStatus, Resource};

/// Profile claimed by generated questionnaires
pub const QUESTIONNAIRE_PROFILE: &str = "http://hl7.org/fhir/R4/StructureDefinition/Questionnaire";

/// Questionnaire item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Container of other items
    Group,
    /// Text only, no answer
    Display,
    /// Yes/no answer
    Boolean,
    /// Decimal answer
    Decimal,
    /// Integer answer
    Integer,
    /// Date answer
    Date,
    /// Short free text
    String,
    /// Multi-line free text
    Text,
    /// Answer picked from a list
    Choice,
}

/// A primitive element's extensions (`_valueString` in JSON)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementExtensions {
    /// Extensions on the primitive value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

/// A permitted answer for a choice item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Answer text
    #[serde(rename = "valueString")]
    pub value_string: String,

    /// Extensions on the answer text
    #[serde(rename = "_valueString", skip_serializing_if = "Option::is_none")]
    pub value_string_element: Option<ElementExtensions>,
}

impl AnswerOption {
    /// Whether this option is marked exclusive
    pub fn is_exclusive(&self) -> bool {
        self.extensions()
            .iter()
            .find(|e| e.url == super::datatypes::OPTION_EXCLUSIVE_EXTENSION)
            .and_then(|e| e.value_boolean)
            .unwrap_or(false)
    }

    /// Item-order of this option
    pub fn order(&self) -> Option<rust_decimal::Decimal> {
        item_order_of(self.extensions())
    }

    fn extensions(&self) -> &[Extension] {
        self.value_string_element
            .as_ref()
            .map(|e| e.extension.as_slice())
            .unwrap_or_default()
    }
}

/// A questionnaire item: a section group or a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireItem {
    /// Extensions (item order)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    /// Unique id within the questionnaire
    pub link_id: String,

    /// Codes for the item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<Coding>,

    /// Label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Item type
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Whether an answer is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Whether the item may repeat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<bool>,

    /// Permitted answers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_option: Vec<AnswerOption>,

    /// Nested items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireItem>,
}

impl QuestionnaireItem {
    /// Item-order of this item
    pub fn order(&self) -> Option<rust_decimal::Decimal> {
        item_order_of(&self.extension)
    }

    /// Whether an answer is required
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }
}

/// A structured set of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    /// Always `Questionnaire`
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
    /// Publication date
    pub date: String,
    /// Publisher
    pub publisher: String,
    /// Description (markdown)
    pub description: String,
    /// Jurisdictions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jurisdiction: Vec<CodeableConcept>,
    /// Usage contexts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_context: Vec<UsageContext>,
    /// Top-level items (sections)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireItem>,
}

impl Questionnaire {
    /// Find a question anywhere in the tree by link id
    pub fn find_item(&self, link_id: &str) -> Option<&QuestionnaireItem> {
        fn walk<'a>(items: &'a [QuestionnaireItem], link_id: &str) -> Option<&'a QuestionnaireItem> {
            items.iter().find_map(|item| {
                if item.link_id == link_id {
                    Some(item)
                } else {
                    walk(&item.item, link_id)
                }
            })
        }
        walk(&self.item, link_id)
    }

    /// All question items, in section order
    pub fn questions(&self) -> impl Iterator<Item = &QuestionnaireItem> {
        self.item.iter().flat_map(|section| section.item.iter())
    }
}

impl Resource for Questionnaire {
    fn resource_type(&self) -> &str {
        "Questionnaire"
    }

    fn id(&self) -> &str {
        &self.id
    }
}
