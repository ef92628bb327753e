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

//! Integration tests for MeasureReport generation and report bundles

use chrono::{NaiveDate, TimeZone, Utc};
use octofhir_saner::formats::{cdc_healthcare_supply, cdc_patient_impact, fema_daily};
use octofhir_saner::*;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, d).unwrap()
}

fn data() -> ReportData {
    ReportData::new(day(20), day(21))
        .with_report_date(Utc.with_ymd_and_hms(2020, 4, 21, 12, 0, 0).unwrap())
        .with_covered_organization(EntityRef::new("org-1", "General Hospital"))
        .with_covered_location(EntityRef::new("loc-1", "General Hospital Main"))
        .with_count("numbeds", Some(120))
        .with_count("numBedsOcc", Some(87))
        .with_count("numC19Died", None)
        .with_count("newDiagnosticTests", Some(40))
        .with_ratio("percentPositiveAmongNewlyResultedTests", Some(10), Some(20))
        .with_ratio("cumulativePercentPositiveAmongResultedTests", Some(5), None)
}

#[test]
fn ratio_scores_and_counts() {
    let report = FormatRegistry::default()
        .report(fema_daily::NAME, &data())
        .unwrap();
    let group = report.group("percentPositiveAmongNewlyResultedTests").unwrap();

    assert_eq!(group.score(), Some(Decimal::new(5, 1)));
    assert_eq!(group.count("numerator"), Some(10));
    assert_eq!(group.count("denominator"), Some(20));
}

#[test]
fn incomplete_ratio_is_unscored() {
    let report = FormatRegistry::default()
        .report(fema_daily::NAME, &data())
        .unwrap();
    let group = report
        .group("cumulativePercentPositiveAmongResultedTests")
        .unwrap();
    assert_eq!(group.measure_score, None);
    assert_eq!(group.population, None);
}

#[test]
fn missing_count_keeps_code_only() {
    let report = FormatRegistry::default()
        .report(cdc_patient_impact::NAME, &data())
        .unwrap();

    assert_eq!(report.group.len(), 13);
    let died = report.group("numC19Died").unwrap();
    assert_eq!(died.measure_score, None);
    assert_eq!(died.population, None);

    let beds = report.group("numbeds").unwrap();
    assert_eq!(beds.score(), Some(Decimal::from(120)));
    assert_eq!(beds.count("initial-population"), Some(120));
}

#[test]
fn report_metadata() {
    let registry = FormatRegistry::default();
    let report = registry.report(cdc_patient_impact::NAME, &data()).unwrap();
    let measure = registry.measure(cdc_patient_impact::NAME).unwrap();

    assert_eq!(report.measure, measure.url);
    assert_eq!(report.date, "2020-04-21T12:00:00Z");
    assert_eq!(report.period.start, Some(day(20)));
    assert_eq!(report.period.end, Some(day(21)));
    assert_eq!(
        report.subject.as_ref().and_then(|s| s.reference.as_deref()),
        Some("Location/loc-1")
    );
    assert_eq!(
        report.reporter.as_ref().and_then(|r| r.reference.as_deref()),
        Some("Organization/org-1")
    );
    assert!(uuid::Uuid::parse_str(&report.id).is_ok());
}

#[test]
fn explicit_reporter_wins() {
    let data = data().with_reporter(EntityRef::new("reporter-1", "State HIE"));
    let report = FormatRegistry::default()
        .report(cdc_patient_impact::NAME, &data)
        .unwrap();
    assert_eq!(
        report.reporter.and_then(|r| r.reference),
        Some("Organization/reporter-1".to_string())
    );
}

#[test]
fn test_tag_can_be_disabled() {
    let registry = FormatRegistry::new(PublicationSettings::default().with_test_tag(false));
    let report = registry.report(fema_daily::NAME, &data()).unwrap();
    assert!(report.meta.unwrap().security.is_empty());
}

#[test]
fn reports_are_fresh_per_call() {
    let registry = FormatRegistry::default();
    let first = registry.report(fema_daily::NAME, &data()).unwrap();
    let second = registry.report(fema_daily::NAME, &data()).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.group, second.group);
}

#[test]
fn report_bundle_covers_enabled_formats() {
    let registry = FormatRegistry::default();
    let bundle = registry.report_bundle(&data(), &[]).unwrap();

    let measures: Vec<_> = bundle
        .resources()
        .filter_map(|r| r.as_measure_report())
        .map(|r| r.measure.clone())
        .collect();
    assert_eq!(
        measures,
        vec![
            registry.measure(cdc_patient_impact::NAME).unwrap().url.clone(),
            registry.measure(fema_daily::NAME).unwrap().url.clone(),
        ]
    );

    for entry in &bundle.entry {
        assert_eq!(
            entry.full_url,
            format!(
                "https://github.com/microsoft-healthcare-madison/learning-spike-erp/MeasureReport/{}",
                entry.resource.id()
            )
        );
    }
}

#[test]
fn report_bundle_honours_include_list() {
    let registry = FormatRegistry::default();
    let bundle = registry
        .report_bundle(&data(), &[fema_daily::NAME, cdc_healthcare_supply::NAME])
        .unwrap();

    assert_eq!(bundle.entry.len(), 1);
    let report = bundle.entry[0].resource.as_measure_report().unwrap();
    assert!(report.measure.ends_with("/sanerFEMA"));
}

#[test]
fn scores_can_be_indexed_directly() {
    let registry = FormatRegistry::default();
    let measure = registry.measure(cdc_patient_impact::NAME).unwrap();

    let mut scores = ScoreIndex::new();
    scores.add_value("numVent", Some(Decimal::new(305, 1)));
    scores.add_value("numVent", Some(Decimal::from(31)));
    scores.insert("numVentUse", Score::new(None, Some(12), Some(31)).unwrap());

    let report =
        ReportBuilder::new(registry.settings()).build_with_scores(&measure, &scores, &data());
    assert_eq!(report.group("numVent").unwrap().count("initial-population"), Some(31));
    // Ratio scores on count groups report the truncated ratio.
    assert_eq!(
        report.group("numVentUse").unwrap().count("initial-population"),
        Some(0)
    );
}
