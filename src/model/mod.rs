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

//! Reporting format model
//!
//! Immutable value types describing fields, section layout and the coded
//! identities shared by every generated resource.

pub mod coding;
pub mod field;
pub mod format;

pub use coding::{CodeableConcept, Coding, PopulationKind, systems};
pub use field::{Field, FieldOption, FieldType, MeasureCategory};
pub use format::{Format, Grouping, GroupingPopulation, Question, Section};
