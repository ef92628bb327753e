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

//! Measure builder

use crate::config::PublicationSettings;
use crate::error::{Result, SanerError};
use crate::model::{Coding, Field, FieldType, Format, PopulationKind};
use crate::resource::{
    Expression, MEASURE_PROFILE, Measure, MeasureGroup, MeasurePopulation, Meta,
    PublicationStatus, UsageContext,
};

/// Compiles formats into measures
#[derive(Debug, Clone, Copy)]
pub struct MeasureBuilder<'a> {
    settings: &'a PublicationSettings,
}

impl<'a> MeasureBuilder<'a> {
    /// Builder using the given publication settings
    pub fn new(settings: &'a PublicationSettings) -> Self {
        Self { settings }
    }

    /// Build the measure for a format
    ///
    /// One group is produced per measured field that resolves and has a
    /// measurable type; anything else is skipped.
    pub fn build(&self, format: &Format) -> Result<Measure> {
        validate(format)?;

        let group = format
            .measure_fields
            .iter()
            .filter_map(|name| {
                let group = format.field(name).and_then(|field| self.group(field));
                if group.is_none() {
                    log::debug!("Format '{}': measure field '{}' skipped", format.name, name);
                }
                group
            })
            .collect();

        Ok(Measure {
            resource_type: "Measure".to_string(),
            id: format.name.clone(),
            meta: Some(Meta::with_profile(MEASURE_PROFILE)),
            url: self.settings.format_url(&format.name),
            version: self.settings.measure_version.clone(),
            name: format.name.clone(),
            title: format.title.clone(),
            status: PublicationStatus::Draft,
            subject_codeable_concept: Coding::resource_location().concept(),
            date: self.settings.publication_date.clone(),
            publisher: self.settings.publisher.clone(),
            description: format.description.clone(),
            use_context: vec![UsageContext::covid_focus()],
            jurisdiction: vec![Coding::united_states().concept()],
            author: format.authors.clone(),
            related_artifact: format.artifacts.clone(),
            measure_type: vec![Coding::measure_type_composite().concept()],
            group,
        })
    }

    fn group(&self, field: &Field) -> Option<MeasureGroup> {
        let population = match field.field_type {
            FieldType::Count => vec![population(
                PopulationKind::InitialPopulation,
                field.measure_text(),
                format!("Source defined field: {}", field.name),
            )],
            FieldType::Percentage => {
                let (numerator, denominator) = split_for_ratio(field.measure_text());
                vec![
                    population(
                        PopulationKind::Numerator,
                        numerator,
                        format!("Numerator for source defined field: {}", field.name),
                    ),
                    population(
                        PopulationKind::Denominator,
                        denominator,
                        format!("Denominator for source defined field: {}", field.name),
                    ),
                ]
            }
            FieldType::Display
            | FieldType::Date
            | FieldType::Boolean
            | FieldType::Choice
            | FieldType::Text
            | FieldType::ShortString => return None,
        };

        Some(MeasureGroup {
            code: Coding::new(&self.settings.canonical_url, &field.name, field.measure_text())
                .concept(),
            description: None,
            population,
        })
    }
}

fn validate(format: &Format) -> Result<()> {
    if format.name.is_empty() {
        return Err(SanerError::invalid_format(&format.name, "name", "must not be empty"));
    }
    if format.fields.is_empty() {
        return Err(SanerError::invalid_format(&format.name, "fields", "must not be empty"));
    }
    if format.measure_fields.is_empty() {
        return Err(SanerError::invalid_format(
            &format.name,
            "measure_fields",
            "must not be empty",
        ));
    }
    Ok(())
}

fn population(kind: PopulationKind, description: &str, expression: String) -> MeasurePopulation {
    MeasurePopulation {
        code: kind.concept(),
        criteria: Expression::plain_text(description, expression),
    }
}

/// Split a ratio description into numerator and denominator text
///
/// Text with exactly one `/` splits into its trimmed halves; any other
/// text is used whole for both sides.
pub fn split_for_ratio(description: &str) -> (&str, &str) {
    let mut parts = description.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(numerator), Some(denominator), None) => (numerator.trim(), denominator.trim()),
        _ => (description, description),
    }
}
