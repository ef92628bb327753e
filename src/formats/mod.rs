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

//! Format registry and the built-in reporting formats
//!
//! A [`FormatRegistry`] owns a set of [`Format`]s together with the
//! publication settings used to render them. Questionnaires and measures
//! are built on first request and cached for the registry's lifetime;
//! reports are built fresh on every call.

pub mod cdc_healthcare_supply;
pub mod cdc_healthcare_worker;
pub mod cdc_patient_impact;
pub mod fema_daily;

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::{Lazy, OnceCell};

use crate::builder::{MeasureBuilder, QuestionnaireBuilder, ReportBuilder, ReportData};
use crate::config::PublicationSettings;
use crate::error::{Result, SanerError};
use crate::model::Format;
use crate::resource::{Bundle, ContactDetail, Measure, MeasureReport, Questionnaire, RelatedArtifact};

pub(crate) const CDC_CITATION: &str =
    "Centers for Disease Control and Prevention (CDC), National Healthcare Safety Network (NHSN)";

fn nhsn_page(label: &str, display: &str, url: &str) -> RelatedArtifact {
    RelatedArtifact::documentation(label)
        .with_display(display)
        .with_url(url)
        .with_citation(CDC_CITATION)
}

fn nhsn_author() -> ContactDetail {
    ContactDetail::new("Centers for Disease Control/National Healthcare Safety Network (CDC/NHSN)")
        .with_email("mailto:nhsn@cdc.gov")
}

/// The built-in formats, in registration order
pub fn builtin_formats() -> Vec<Format> {
    vec![
        cdc_patient_impact::format(),
        fema_daily::format(),
        cdc_healthcare_worker::format(),
        cdc_healthcare_supply::format(),
    ]
}

static STANDARD: Lazy<FormatRegistry> =
    Lazy::new(|| FormatRegistry::new(PublicationSettings::default()));

/// A format and its cached resources
#[derive(Debug)]
pub struct RegisteredFormat {
    format: Arc<Format>,
    questionnaire: OnceCell<Arc<Questionnaire>>,
    measure: OnceCell<Arc<Measure>>,
}

impl RegisteredFormat {
    fn new(format: Format) -> Self {
        Self {
            format: Arc::new(format),
            questionnaire: OnceCell::new(),
            measure: OnceCell::new(),
        }
    }

    /// The format definition
    pub fn format(&self) -> &Arc<Format> {
        &self.format
    }

    /// Whether the questionnaire has been built
    pub fn is_questionnaire_built(&self) -> bool {
        self.questionnaire.get().is_some()
    }

    /// Whether the measure has been built
    pub fn is_measure_built(&self) -> bool {
        self.measure.get().is_some()
    }

    fn questionnaire(&self, settings: &PublicationSettings) -> Result<Arc<Questionnaire>> {
        self.questionnaire
            .get_or_try_init(|| {
                let questionnaire = QuestionnaireBuilder::new(settings).build(&self.format)?;
                log::debug!(
                    "Built questionnaire '{}' with {} sections",
                    self.format.name,
                    questionnaire.item.len()
                );
                Ok::<_, SanerError>(Arc::new(questionnaire))
            })
            .cloned()
    }

    fn measure(&self, settings: &PublicationSettings) -> Result<Arc<Measure>> {
        self.measure
            .get_or_try_init(|| {
                let measure = MeasureBuilder::new(settings).build(&self.format)?;
                log::debug!(
                    "Built measure '{}' with {} groups",
                    self.format.name,
                    measure.group.len()
                );
                Ok::<_, SanerError>(Arc::new(measure))
            })
            .cloned()
    }
}

/// Named collection of reporting formats
#[derive(Debug)]
pub struct FormatRegistry {
    settings: PublicationSettings,
    formats: IndexMap<String, RegisteredFormat>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new(PublicationSettings::default())
    }
}

impl FormatRegistry {
    /// Registry holding the built-in formats
    pub fn new(settings: PublicationSettings) -> Self {
        let mut registry = Self::empty(settings);
        for format in builtin_formats() {
            registry.register(format);
        }
        registry
    }

    /// Registry holding no formats
    pub fn empty(settings: PublicationSettings) -> Self {
        Self {
            settings,
            formats: IndexMap::new(),
        }
    }

    /// Process-wide registry with default settings
    pub fn standard() -> &'static FormatRegistry {
        &STANDARD
    }

    /// Publication settings
    pub fn settings(&self) -> &PublicationSettings {
        &self.settings
    }

    /// Add a format, replacing any format with the same name
    pub fn register(&mut self, format: Format) {
        let name = format.name.clone();
        if self
            .formats
            .insert(name.clone(), RegisteredFormat::new(format))
            .is_some()
        {
            log::debug!("Replaced format '{name}'");
        }
    }

    /// Look up a format
    pub fn get(&self, name: &str) -> Result<&RegisteredFormat> {
        self.formats
            .get(name)
            .ok_or_else(|| SanerError::format_not_found(name))
    }

    /// All formats in registration order
    pub fn list(&self) -> Vec<&Arc<Format>> {
        self.formats.values().map(RegisteredFormat::format).collect()
    }

    /// Number of formats
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether the registry holds no formats
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// The questionnaire for a format, built on first request
    pub fn questionnaire(&self, name: &str) -> Result<Arc<Questionnaire>> {
        self.get(name)?.questionnaire(&self.settings)
    }

    /// The measure for a format, built on first request
    pub fn measure(&self, name: &str) -> Result<Arc<Measure>> {
        self.get(name)?.measure(&self.settings)
    }

    /// Collection bundle holding a format's questionnaire
    pub fn questionnaire_bundle(&self, name: &str) -> Result<Bundle> {
        let questionnaire = self.questionnaire(name)?;
        Ok(Bundle::collection().with(&self.settings, Questionnaire::clone(&questionnaire)))
    }

    /// Collection bundle holding a format's measure
    pub fn measure_bundle(&self, name: &str) -> Result<Bundle> {
        let measure = self.measure(name)?;
        Ok(Bundle::collection().with(&self.settings, Measure::clone(&measure)))
    }

    /// A fresh report for one format
    pub fn report(&self, name: &str, data: &ReportData) -> Result<MeasureReport> {
        let measure = self.measure(name)?;
        Ok(ReportBuilder::new(&self.settings).build(&measure, data))
    }

    /// Collection bundle with one report per report-enabled format
    ///
    /// A non-empty `include` list limits the bundle to the named formats.
    pub fn report_bundle(&self, data: &ReportData, include: &[&str]) -> Result<Bundle> {
        let reports = self
            .formats
            .values()
            .map(RegisteredFormat::format)
            .filter(|format| format.measure_report_enabled)
            .filter(|format| include.is_empty() || include.contains(&format.name.as_str()))
            .map(|format| self.report(&format.name, data))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Report bundle with {} reports", reports.len());
        Ok(ReportBuilder::new(&self.settings).bundle(reports))
    }
}
