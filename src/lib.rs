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

//! SANER reporting formats compiled to FHIR R4 resources
//!
//! A reporting [`Format`](model::Format) describes the fields of a health
//! data collection form, how they are laid out in sections, and which of
//! them are measured. From one format this crate produces:
//!
//! - a `Questionnaire` for data entry,
//! - a `Measure` defining one scored group per measured field,
//! - `MeasureReport`s that fill those groups with one period's scores.
//!
//! ```rust,no_run
//! use octofhir_saner::{FormatRegistry, ReportData, Resource};
//! use chrono::NaiveDate;
//!
//! # fn main() -> octofhir_saner::Result<()> {
//! let registry = FormatRegistry::standard();
//! let questionnaire = registry.questionnaire("sanerCDC")?;
//! println!("{}", questionnaire.to_json_pretty()?);
//!
//! let day = NaiveDate::from_ymd_opt(2020, 4, 21).unwrap();
//! let data = ReportData::new(day, day).with_count("numC19Died", Some(3));
//! let report = registry.report("sanerCDC", &data)?;
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod formats;
pub mod model;
pub mod resource;

pub use builder::{
    EntityRef, FieldValue, MeasureBuilder, QuestionnaireBuilder, ReportBuilder, ReportData, Score,
    ScoreIndex,
};
pub use config::PublicationSettings;
pub use error::{Result, SanerError};
pub use formats::{FormatRegistry, RegisteredFormat};
pub use model::{Field, FieldOption, FieldType, Format, MeasureCategory, Question, Section};
pub use resource::{Bundle, Measure, MeasureReport, Questionnaire, Resource};
