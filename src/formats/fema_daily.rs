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

//! FEMA template for daily hospital COVID-19 reporting (`sanerFEMA`)

use crate::model::{Field, FieldType, Format, MeasureCategory, Question, Section};
use crate::resource::RelatedArtifact;

/// Format name
pub const NAME: &str = "sanerFEMA";

/// Field names
pub mod fields {
    pub const COLLECTION_DATE: &str = "collectionDate";
    pub const STATE: &str = "state";
    pub const COUNTY: &str = "county";
    pub const TESTS_ORDERED_TODAY: &str = "newDiagnosticTests";
    pub const TESTS_ORDERED_TOTAL: &str = "cumulativeDiagnosticTests";
    pub const TESTS_RESULTED_TODAY: &str = "newTestsResulted";
    pub const SPECIMENS_REJECTED_TOTAL: &str = "cumulativeSpecimensRejected";
    pub const TESTS_PERFORMED_TOTAL: &str = "cumulativeTestsPerformed";
    pub const POSITIVE_TODAY: &str = "newPositiveC19Tests";
    pub const POSITIVE_TOTAL: &str = "cumulativePositiveC19Tests";
    pub const PERCENT_POSITIVE_TODAY: &str = "percentPositiveAmongNewlyResultedTests";
    pub const PERCENT_POSITIVE_TOTAL: &str = "cumulativePercentPositiveAmongResultedTests";
}

use fields::*;

fn outcome(name: &str, title: &str, field_type: FieldType, description: &str) -> Field {
    Field::new(name, title, field_type)
        .with_description(description)
        .with_category(MeasureCategory::Outcome)
}

/// Build the format
pub fn format() -> Format {
    Format::new(
        NAME,
        "SANER FEMA Template for daily Hospital COVID-19 Reporting",
        "SANER implementation of the FEMA Template for daily Hospital COVID-19 Reporting",
    )
    .with_fields([
        Field::new(COLLECTION_DATE, "Date", FieldType::Date)
            .with_category(MeasureCategory::Structure)
            .required(),
        Field::new(STATE, "State", FieldType::ShortString).with_category(MeasureCategory::Structure),
        Field::new(COUNTY, "County", FieldType::ShortString)
            .with_category(MeasureCategory::Structure),
        outcome(
            TESTS_ORDERED_TODAY,
            "New Diagnostic Tests Ordered/Received",
            FieldType::Count,
            "Midnight to midnight cutoff, tests ordered on previous date queried.",
        ),
        outcome(
            TESTS_ORDERED_TOTAL,
            "Cumulative Diagnostic Tests Ordered/Received",
            FieldType::Count,
            "All tests ordered to date.",
        ),
        outcome(
            TESTS_RESULTED_TODAY,
            "New Tests Resulted",
            FieldType::Count,
            "Midnight to midnight cutoff, test results released on previous date queried.",
        ),
        outcome(
            SPECIMENS_REJECTED_TOTAL,
            "Cumulative Specimens Rejected",
            FieldType::Count,
            "All specimens rejected for testing to date.",
        ),
        outcome(
            TESTS_PERFORMED_TOTAL,
            "Cumulative Tests Performed",
            FieldType::Count,
            "All tests with results released to date.",
        ),
        outcome(
            POSITIVE_TODAY,
            "New Positive COVID-19 Tests",
            FieldType::Count,
            "Midnight to midnight cutoff, positive test results released on the previous date queried.",
        ),
        outcome(
            POSITIVE_TOTAL,
            "Cumulative Positive COVID-19 Tests",
            FieldType::Count,
            "All positive test results released to date.",
        ),
        outcome(
            PERCENT_POSITIVE_TODAY,
            "Percent Positive among Newly Resulted Tests",
            FieldType::Percentage,
            "# of new positive test results / # of total new tests released for previous date queried.",
        ),
        outcome(
            PERCENT_POSITIVE_TOTAL,
            "Cumulative Percent Positive among Resulted Tests",
            FieldType::Percentage,
            "# of total positive results to released date / # of total test results released to date.",
        ),
    ])
    .with_measure_fields([
        TESTS_ORDERED_TODAY,
        TESTS_ORDERED_TOTAL,
        TESTS_RESULTED_TODAY,
        SPECIMENS_REJECTED_TOTAL,
        TESTS_PERFORMED_TOTAL,
        POSITIVE_TODAY,
        POSITIVE_TOTAL,
        PERCENT_POSITIVE_TODAY,
        PERCENT_POSITIVE_TOTAL,
    ])
    .with_section(Section::new(
        "Daily Hospital COVID-19 Reporting",
        [
            COLLECTION_DATE,
            STATE,
            COUNTY,
            TESTS_ORDERED_TODAY,
            TESTS_ORDERED_TOTAL,
            TESTS_RESULTED_TODAY,
            SPECIMENS_REJECTED_TOTAL,
            TESTS_PERFORMED_TOTAL,
            POSITIVE_TODAY,
            POSITIVE_TOTAL,
        ]
        .into_iter()
        .map(Question::new)
        .collect(),
    ))
    .with_artifact(
        RelatedArtifact::documentation("Template for daily Hospital COVID-19 Reporting")
            .with_citation("Federal Emergency Management Agency (FEMA)")
            .with_document(
                "https://github.com/AudaciousInquiry/saner-ig/blob/master/resources/Template%20for%20Daily%20Hospital%20COVID-19%20Reporting.xlsx",
                "2020-03-29",
            ),
    )
    .enable_measure_report()
}
