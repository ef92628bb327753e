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

//! Scores and the score index
//!
//! A [`ReportData`] snapshot holds the raw values collected for one
//! reporting period. [`ScoreIndex::from_report_data`] turns it into one
//! [`Score`] per field that actually has data; null values never produce
//! an entry.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{Result, SanerError};

/// The scored value of one field for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Score value
    pub measure_score: Decimal,
    /// Numerator of a ratio
    pub numerator: Option<i64>,
    /// Denominator of a ratio
    pub denominator: Option<i64>,
}

impl Score {
    /// Create a score, deriving the value from the ratio when it is absent
    pub fn new(
        measure_score: Option<Decimal>,
        numerator: Option<i64>,
        denominator: Option<i64>,
    ) -> Result<Self> {
        match (measure_score, numerator, denominator) {
            (Some(measure_score), numerator, denominator) => Ok(Self {
                measure_score,
                numerator,
                denominator,
            }),
            (None, Some(numerator), Some(denominator)) => Ok(Self::ratio(numerator, denominator)),
            (None, _, _) => Err(SanerError::invalid_score(
                "measureScore requires a value or both numerator and denominator",
            )),
        }
    }

    /// Plain value score
    pub fn value(value: Decimal) -> Self {
        Self {
            measure_score: value,
            numerator: None,
            denominator: None,
        }
    }

    /// Ratio score; a zero denominator scores 0
    pub fn ratio(numerator: i64, denominator: i64) -> Self {
        let measure_score = if denominator == 0 {
            log::warn!("Ratio {numerator}/0 has a zero denominator, scoring 0");
            Decimal::ZERO
        } else {
            Decimal::from(numerator)
                .checked_div(Decimal::from(denominator))
                .unwrap_or(Decimal::ZERO)
        };
        Self {
            measure_score,
            numerator: Some(numerator),
            denominator: Some(denominator),
        }
    }

    /// Score truncated toward zero, saturating at the `i64` range
    pub fn truncated(&self) -> i64 {
        self.measure_score.trunc().to_i64().unwrap_or(if self.measure_score.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

/// A raw value collected for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Single value, possibly missing
    Scalar(Option<Decimal>),
    /// Numerator and denominator, either possibly missing
    Ratio {
        /// Numerator
        numerator: Option<i64>,
        /// Denominator
        denominator: Option<i64>,
    },
}

/// Identity and name of an organization or location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    /// Logical id
    pub id: String,
    /// Display name
    pub name: Option<String>,
}

impl EntityRef {
    /// Reference by id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// Data collected for one reporting period
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    /// Values by field name
    pub values: IndexMap<String, FieldValue>,
    /// When the report was produced; `None` means now
    pub report_date: Option<DateTime<Utc>>,
    /// First day of the collection period
    pub period_start: NaiveDate,
    /// Last day of the collection period
    pub period_end: NaiveDate,
    /// Organization submitting the report
    pub reporter: Option<EntityRef>,
    /// Organization the data covers
    pub covered_organization: Option<EntityRef>,
    /// Location the data covers
    pub covered_location: Option<EntityRef>,
}

impl ReportData {
    /// Empty snapshot for a collection period
    pub fn new(period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            values: IndexMap::new(),
            report_date: None,
            period_start,
            period_end,
            reporter: None,
            covered_organization: None,
            covered_location: None,
        }
    }

    /// Record a single value
    pub fn with_value(mut self, field: impl Into<String>, value: Option<Decimal>) -> Self {
        self.values.insert(field.into(), FieldValue::Scalar(value));
        self
    }

    /// Record an integer count
    pub fn with_count(self, field: impl Into<String>, count: Option<i64>) -> Self {
        self.with_value(field, count.map(Decimal::from))
    }

    /// Record a ratio
    pub fn with_ratio(
        mut self,
        field: impl Into<String>,
        numerator: Option<i64>,
        denominator: Option<i64>,
    ) -> Self {
        self.values.insert(
            field.into(),
            FieldValue::Ratio {
                numerator,
                denominator,
            },
        );
        self
    }

    /// Set the report date
    pub fn with_report_date(mut self, date: DateTime<Utc>) -> Self {
        self.report_date = Some(date);
        self
    }

    /// Set the reporting organization
    pub fn with_reporter(mut self, reporter: EntityRef) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Set the covered organization
    pub fn with_covered_organization(mut self, organization: EntityRef) -> Self {
        self.covered_organization = Some(organization);
        self
    }

    /// Set the covered location
    pub fn with_covered_location(mut self, location: EntityRef) -> Self {
        self.covered_location = Some(location);
        self
    }
}

/// Scores by field name, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreIndex {
    scores: IndexMap<String, Score>,
}

impl ScoreIndex {
    /// Empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every non-null value of a snapshot
    pub fn from_report_data(data: &ReportData) -> Self {
        let mut index = Self::new();
        for (field, value) in &data.values {
            match *value {
                FieldValue::Scalar(value) => index.add_value(field, value),
                FieldValue::Ratio {
                    numerator,
                    denominator,
                } => index.add_ratio(field, numerator, denominator),
            }
        }
        index
    }

    /// Add a value score; `None` adds nothing
    pub fn add_value(&mut self, field: &str, value: Option<Decimal>) {
        if let Some(value) = value {
            self.insert(field, Score::value(value));
        }
    }

    /// Add a ratio score; adds nothing unless both parts are present
    pub fn add_ratio(&mut self, field: &str, numerator: Option<i64>, denominator: Option<i64>) {
        if let (Some(numerator), Some(denominator)) = (numerator, denominator) {
            self.insert(field, Score::ratio(numerator, denominator));
        }
    }

    /// Add a score, replacing any earlier score for the field
    pub fn insert(&mut self, field: impl Into<String>, score: Score) -> Option<Score> {
        self.scores.insert(field.into(), score)
    }

    /// Score for a field
    pub fn get(&self, field: &str) -> Option<&Score> {
        self.scores.get(field)
    }

    /// Number of scored fields
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no field is scored
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Score)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), v))
    }
}
