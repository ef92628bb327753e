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

//! Resource builders
//!
//! Each builder is a pure function of a [`Format`](crate::model::Format) and
//! the [`PublicationSettings`](crate::config::PublicationSettings) it was
//! created with.

mod measure;
mod questionnaire;
mod report;
mod score;

pub use measure::{MeasureBuilder, split_for_ratio};
pub use questionnaire::QuestionnaireBuilder;
pub use report::ReportBuilder;
pub use score::{EntityRef, FieldValue, ReportData, Score, ScoreIndex};
