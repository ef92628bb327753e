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

//! Questionnaire (form) builder

use crate::config::PublicationSettings;
use crate::error::{Result, SanerError};
use crate::model::{Coding, Field, FieldType, Format, Question, Section};
use crate::resource::{
    AnswerOption, ElementExtensions, Extension, ItemType, Meta, PublicationStatus,
    QUESTIONNAIRE_PROFILE, Questionnaire, QuestionnaireItem, UsageContext,
};

/// Compiles formats into questionnaires
#[derive(Debug, Clone, Copy)]
pub struct QuestionnaireBuilder<'a> {
    settings: &'a PublicationSettings,
}

impl<'a> QuestionnaireBuilder<'a> {
    /// Builder using the given publication settings
    pub fn new(settings: &'a PublicationSettings) -> Self {
        Self { settings }
    }

    /// Build the questionnaire for a format
    ///
    /// Fails when the format has no name, no fields or no sections. Questions
    /// naming unknown fields are left out.
    pub fn build(&self, format: &Format) -> Result<Questionnaire> {
        validate(format)?;

        let item = format
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| self.section_item(format, index, section))
            .collect();

        Ok(Questionnaire {
            resource_type: "Questionnaire".to_string(),
            id: format.name.clone(),
            meta: Some(Meta::with_profile(QUESTIONNAIRE_PROFILE)),
            url: self.settings.format_url(&format.name),
            version: self.settings.questionnaire_version.clone(),
            name: format.name.clone(),
            title: format.title.clone(),
            status: PublicationStatus::Draft,
            date: self.settings.publication_date.clone(),
            publisher: self.settings.publisher.clone(),
            description: format.description.clone(),
            jurisdiction: vec![Coding::united_states().concept()],
            use_context: vec![UsageContext::covid_focus()],
            item,
        })
    }

    fn section_item(&self, format: &Format, index: usize, section: &Section) -> QuestionnaireItem {
        let item = section
            .questions
            .iter()
            .filter_map(|question| {
                let resolved = resolve(format, question);
                if resolved.is_none() {
                    log::debug!(
                        "Format '{}': question '{}' omitted, no such field",
                        format.name,
                        question.value_field
                    );
                }
                resolved
            })
            .enumerate()
            .map(|(order, (field, display, question))| {
                self.question_item(format, order, field, display, question.use_title_only)
            })
            .collect();

        QuestionnaireItem {
            extension: vec![Extension::item_order(index)],
            link_id: format!("section_{index}"),
            code: Vec::new(),
            text: Some(section_text(format, section)),
            item_type: ItemType::Group,
            required: None,
            repeats: Some(false),
            answer_option: Vec::new(),
            item,
        }
    }

    fn question_item(
        &self,
        format: &Format,
        order: usize,
        field: &Field,
        display: &Field,
        title_only: bool,
    ) -> QuestionnaireItem {
        let text = if title_only {
            display.title.clone()
        } else {
            label(display)
        };

        let (item_type, answer_option) = match field.field_type {
            FieldType::Display => (ItemType::Display, Vec::new()),
            FieldType::Date => (ItemType::Date, Vec::new()),
            FieldType::Count => (ItemType::Integer, Vec::new()),
            FieldType::Percentage => (ItemType::Decimal, Vec::new()),
            FieldType::Boolean => (ItemType::Boolean, Vec::new()),
            FieldType::Choice => (ItemType::Choice, answer_options(field)),
            FieldType::Text => (ItemType::Text, Vec::new()),
            FieldType::ShortString => (ItemType::String, Vec::new()),
        };

        QuestionnaireItem {
            extension: vec![Extension::item_order(order)],
            link_id: field.name.clone(),
            code: vec![Coding::code(self.settings.format_url(&format.name), &field.name)],
            text: Some(text),
            item_type,
            required: Some(field.required),
            repeats: Some(false),
            answer_option,
            item: Vec::new(),
        }
    }
}

fn validate(format: &Format) -> Result<()> {
    if format.name.is_empty() {
        return Err(SanerError::invalid_format(&format.name, "name", "must not be empty"));
    }
    if format.fields.is_empty() {
        return Err(SanerError::invalid_format(&format.name, "fields", "must not be empty"));
    }
    if format.sections.is_empty() {
        return Err(SanerError::invalid_format(&format.name, "sections", "must not be empty"));
    }
    Ok(())
}

/// Resolve a question's value field and label field
fn resolve<'f, 'q>(format: &'f Format, question: &'q Question) -> Option<(&'f Field, &'f Field, &'q Question)> {
    let field = format.field(&question.value_field)?;
    let display = question
        .display_field
        .as_deref()
        .and_then(|name| format.field(name))
        .unwrap_or(field);
    Some((field, display, question))
}

fn label(field: &Field) -> String {
    format!("{}: {}", field.title, field.description_str())
}

fn section_text(format: &Format, section: &Section) -> String {
    match format.field(&section.title) {
        Some(field) => label(field),
        None => section.title.clone(),
    }
}

fn answer_options(field: &Field) -> Vec<AnswerOption> {
    field
        .options
        .iter()
        .enumerate()
        .map(|(order, option)| AnswerOption {
            value_string: option.text.clone(),
            value_string_element: Some(ElementExtensions {
                extension: vec![
                    Extension::option_exclusive(option.exclusive),
                    Extension::item_order(order),
                ],
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldOption;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn format() -> Format {
        Format::new("test", "Test", "Test format")
            .with_field(Field::new("date", "Date", FieldType::Date).required())
            .with_field(
                Field::new("beds", "Beds", FieldType::Count).with_description("Total beds"),
            )
            .with_field(Field::new("note", "Note", FieldType::Display).with_description("Read me"))
            .with_field(Field::new("supply", "Supply", FieldType::Choice).with_options(vec![
                FieldOption::new("None"),
                FieldOption::with_exclusive("Some", false),
            ]))
            .with_section(Section::new(
                "First",
                vec![
                    Question::new("date"),
                    Question::new("missing"),
                    Question::new("beds"),
                ],
            ))
            .with_section(Section::new(
                "note",
                vec![Question::with_display("supply", "note"), Question::title_only("beds")],
            ))
    }

    fn build(format: &Format) -> Result<Questionnaire> {
        QuestionnaireBuilder::new(&PublicationSettings::default()).build(format)
    }

    #[test]
    fn test_sections_are_ordered_groups() {
        let q = build(&format()).unwrap();
        let ids: Vec<_> = q.item.iter().map(|i| i.link_id.as_str()).collect();
        assert_eq!(ids, vec!["section_0", "section_1"]);
        assert!(q.item.iter().all(|i| i.item_type == ItemType::Group));
        assert_eq!(q.item[1].order(), Some(Decimal::from(1)));
    }

    #[test]
    fn test_unknown_question_is_omitted_without_consuming_order() {
        let q = build(&format()).unwrap();
        let section = &q.item[0];
        let ids: Vec<_> = section.item.iter().map(|i| i.link_id.as_str()).collect();
        assert_eq!(ids, vec!["date", "beds"]);
        assert_eq!(section.item[1].order(), Some(Decimal::from(1)));
    }

    #[test]
    fn test_item_order_restarts_per_section() {
        let q = build(&format()).unwrap();
        assert_eq!(q.item[1].item[0].order(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_labels() {
        let q = build(&format()).unwrap();
        assert_eq!(q.find_item("beds").and_then(|i| i.text.as_deref()), Some("Beds: Total beds"));
        let second = &q.item[1];
        assert_eq!(second.text.as_deref(), Some("Note: Read me"));
        assert_eq!(second.item[0].text.as_deref(), Some("Note"));
        assert_eq!(second.item[1].text.as_deref(), Some("Beds"));
    }

    #[test]
    fn test_required_mirrors_field() {
        let q = build(&format()).unwrap();
        assert_eq!(q.find_item("date").and_then(|i| i.required), Some(true));
        assert_eq!(q.find_item("beds").and_then(|i| i.required), Some(false));
    }

    #[test]
    fn test_choice_options() {
        let q = build(&format()).unwrap();
        let supply = q.find_item("supply").unwrap();
        assert_eq!(supply.item_type, ItemType::Choice);
        assert_eq!(supply.answer_option.len(), 2);
        assert!(supply.answer_option[0].is_exclusive());
        assert!(!supply.answer_option[1].is_exclusive());
        assert_eq!(supply.answer_option[1].order(), Some(Decimal::ONE));
    }

    #[test]
    fn test_question_code_uses_format_url() {
        let q = build(&format()).unwrap();
        let code = &q.find_item("beds").unwrap().code[0];
        assert_eq!(code.system_str(), format!("{}/test", crate::config::DEFAULT_CANONICAL_URL));
        assert_eq!(code.code_str(), "beds");
    }

    #[test]
    fn test_empty_sections_rejected() {
        let format = Format::new("bare", "Bare", "").with_field(Field::new("a", "A", FieldType::Count));
        let err = build(&format).unwrap_err();
        assert_eq!(err, SanerError::invalid_format("bare", "sections", "must not be empty"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = build(&Format::new("", "", "")).unwrap_err();
        assert!(matches!(err, SanerError::InvalidFormat { ref property, .. } if property == "name"));
    }
}
