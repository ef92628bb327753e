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

//! MeasureReport builder

use chrono::{SecondsFormat, Utc};

use super::score::{ReportData, Score, ScoreIndex};
use crate::config::PublicationSettings;
use crate::model::{Coding, PopulationKind};
use crate::resource::{
    Bundle, MEASURE_REPORT_PROFILE, Measure, MeasureGroup, MeasurePopulation, MeasureReport,
    MeasureReportStatus, MeasureReportType, Meta, Period, Quantity, Reference, ReportGroup,
    ReportPopulation,
};

/// Populates measures with scores
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    settings: &'a PublicationSettings,
}

impl<'a> ReportBuilder<'a> {
    /// Builder using the given publication settings
    pub fn new(settings: &'a PublicationSettings) -> Self {
        Self { settings }
    }

    /// Build a report for a measure from a snapshot
    pub fn build(&self, measure: &Measure, data: &ReportData) -> MeasureReport {
        self.build_with_scores(measure, &ScoreIndex::from_report_data(data), data)
    }

    /// Build a report for a measure from already indexed scores
    ///
    /// Groups are parallel to the measure's groups. A group without a score
    /// carries only its code.
    pub fn build_with_scores(
        &self,
        measure: &Measure,
        scores: &ScoreIndex,
        data: &ReportData,
    ) -> MeasureReport {
        let group: Vec<_> = measure
            .group
            .iter()
            .filter_map(|group| report_group(group, scores))
            .collect();

        log::debug!(
            "Report for '{}': {} groups, {} scored",
            measure.name,
            group.len(),
            group.iter().filter(|g| g.measure_score.is_some()).count()
        );

        let mut meta = Meta::with_profile(MEASURE_REPORT_PROFILE);
        if self.settings.tag_reports_as_test {
            meta.security.push(Coding::security_test());
        }

        let reporter = data
            .reporter
            .as_ref()
            .or(data.covered_organization.as_ref())
            .map(|org| Reference::to("Organization", &org.id, org.name.as_deref()));

        MeasureReport {
            resource_type: "MeasureReport".to_string(),
            id: uuid::Uuid::new_v4().to_string(),
            meta: Some(meta),
            status: MeasureReportStatus::Complete,
            report_type: MeasureReportType::Summary,
            measure: measure.url.clone(),
            subject: data
                .covered_location
                .as_ref()
                .map(|loc| Reference::to("Location", &loc.id, loc.name.as_deref())),
            date: data
                .report_date
                .unwrap_or_else(Utc::now)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            reporter,
            period: Period::new(data.period_start, data.period_end),
            group,
        }
    }

    /// Collect reports into a collection bundle
    pub fn bundle(&self, reports: impl IntoIterator<Item = MeasureReport>) -> Bundle {
        reports
            .into_iter()
            .fold(Bundle::collection(), |bundle, report| bundle.with(self.settings, report))
    }
}

fn report_group(group: &MeasureGroup, scores: &ScoreIndex) -> Option<ReportGroup> {
    let coding = group.code.first_coding()?;
    let code = coding.code.as_deref()?;

    let Some(score) = scores.get(code) else {
        return Some(ReportGroup {
            code: group.code.clone(),
            population: None,
            measure_score: None,
        });
    };

    let population: Vec<_> = group
        .population
        .iter()
        .filter_map(|population| report_population(population, score))
        .collect();

    Some(ReportGroup {
        code: group.code.clone(),
        population: (!population.is_empty()).then_some(population),
        measure_score: Some(Quantity::new(score.measure_score)),
    })
}

fn report_population(population: &MeasurePopulation, score: &Score) -> Option<ReportPopulation> {
    let kind = population.kind_code().and_then(PopulationKind::from_code)?;
    let count = match kind {
        PopulationKind::InitialPopulation | PopulationKind::MeasurePopulation => score.truncated(),
        PopulationKind::Numerator => score.numerator.unwrap_or_else(|| score.truncated()),
        PopulationKind::Denominator => score.denominator.unwrap_or(1),
        PopulationKind::MeasureObservation => return None,
    };
    Some(ReportPopulation {
        code: population.code.clone(),
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MeasureBuilder;
    use crate::model::{Field, FieldType, Format};
    use crate::resource::{CodeableConcept, Expression};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn measure() -> Measure {
        let format = Format::new("test", "Test", "Test format")
            .with_field(Field::new("beds", "Beds", FieldType::Count))
            .with_field(Field::new("died", "Died", FieldType::Count))
            .with_field(Field::new("rate", "Rate", FieldType::Percentage).with_description("a / b"))
            .with_measure_fields(["beds", "died", "rate"]);
        MeasureBuilder::new(&PublicationSettings::default())
            .build(&format)
            .unwrap()
    }

    fn data() -> ReportData {
        let day = NaiveDate::from_ymd_opt(2020, 4, 21).unwrap();
        ReportData::new(day, day)
    }

    fn build(measure: &Measure, scores: &ScoreIndex) -> MeasureReport {
        ReportBuilder::new(&PublicationSettings::default()).build_with_scores(measure, scores, &data())
    }

    #[test]
    fn test_ratio_group_counts() {
        let mut scores = ScoreIndex::new();
        scores.add_ratio("rate", Some(10), Some(20));
        let report = build(&measure(), &scores);
        let group = report.group("rate").unwrap();
        assert_eq!(group.score(), Some(Decimal::new(5, 1)));
        assert_eq!(group.count("numerator"), Some(10));
        assert_eq!(group.count("denominator"), Some(20));
    }

    #[test]
    fn test_unscored_group_has_code_only() {
        let report = build(&measure(), &ScoreIndex::new());
        let group = report.group("died").unwrap();
        assert_eq!(group.measure_score, None);
        assert_eq!(group.population, None);
        assert_eq!(report.group.len(), 3);
    }

    #[test]
    fn test_count_group_truncates() {
        let mut scores = ScoreIndex::new();
        scores.add_value("beds", Some(Decimal::new(129, 1)));
        let report = build(&measure(), &scores);
        assert_eq!(report.group("beds").unwrap().count("initial-population"), Some(12));
    }

    #[test]
    fn test_ratio_fallbacks_for_plain_value() {
        let mut scores = ScoreIndex::new();
        scores.insert("rate", Score::value(Decimal::new(35, 1)));
        let report = build(&measure(), &scores);
        let group = report.group("rate").unwrap();
        assert_eq!(group.count("numerator"), Some(3));
        assert_eq!(group.count("denominator"), Some(1));
    }

    #[test]
    fn test_dropped_populations_omit_list() {
        let mut measure = measure();
        measure.group[0].population = vec![
            MeasurePopulation {
                code: PopulationKind::MeasureObservation.concept(),
                criteria: Expression::default(),
            },
            MeasurePopulation {
                code: CodeableConcept::from_coding(Coding::code("urn:test", "stratifier")),
                criteria: Expression::default(),
            },
        ];
        let mut scores = ScoreIndex::new();
        scores.add_value("beds", Some(Decimal::TEN));
        let report = build(&measure, &scores);
        let group = report.group("beds").unwrap();
        assert_eq!(group.population, None);
        assert_eq!(group.score(), Some(Decimal::TEN));
    }

    #[test]
    fn test_metadata() {
        let report = build(&measure(), &ScoreIndex::new());
        let meta = report.meta.unwrap();
        assert_eq!(meta.profile, vec![MEASURE_REPORT_PROFILE.to_string()]);
        assert_eq!(meta.security, vec![Coding::security_test()]);
        assert_eq!(report.measure, measure().url);
        assert_eq!(report.reporter, None);
    }

    #[test]
    fn test_reporter_falls_back_to_covered_organization() {
        use crate::builder::EntityRef;

        let data = data()
            .with_covered_organization(EntityRef::new("org-1", "General Hospital"))
            .with_covered_location(EntityRef::new("loc-1", "Main Campus"));
        let report = ReportBuilder::new(&PublicationSettings::default()).build(&measure(), &data);
        assert_eq!(
            report.reporter.and_then(|r| r.reference),
            Some("Organization/org-1".to_string())
        );
        assert_eq!(
            report.subject.and_then(|r| r.reference),
            Some("Location/loc-1".to_string())
        );
    }
}
