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

//! Integration tests for measure generation

use octofhir_saner::formats::{cdc_patient_impact, fema_daily};
use octofhir_saner::model::PopulationKind;
use octofhir_saner::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn registry() -> FormatRegistry {
    FormatRegistry::default()
}

fn kinds(measure: &Measure, code: &str) -> Vec<String> {
    measure
        .group(code)
        .unwrap()
        .population
        .iter()
        .filter_map(|p| p.kind_code().map(str::to_string))
        .collect()
}

#[rstest]
#[case(cdc_patient_impact::NAME, 13)]
#[case(fema_daily::NAME, 9)]
fn one_group_per_measured_field(#[case] name: &str, #[case] groups: usize) {
    let registry = registry();
    let format = registry.get(name).unwrap().format().clone();
    let measure = registry.measure(name).unwrap();

    assert_eq!(measure.group.len(), groups);
    let codes: Vec<_> = measure.group_codes().collect();
    let expected: Vec<_> = format.measure_fields.iter().map(String::as_str).collect();
    assert_eq!(codes, expected);

    for field in format.resolved_measure_fields() {
        let expected = match field.field_type {
            FieldType::Count => vec![PopulationKind::InitialPopulation.code()],
            FieldType::Percentage => vec![
                PopulationKind::Numerator.code(),
                PopulationKind::Denominator.code(),
            ],
            other => panic!("unexpected measured type {other:?}"),
        };
        assert_eq!(kinds(&measure, &field.name), expected);
    }
}

#[test]
fn count_criteria_text() {
    let measure = registry().measure(cdc_patient_impact::NAME).unwrap();
    let group = measure.group("numVent").unwrap();
    let criteria = &group.population[0].criteria;

    assert_eq!(
        criteria.description.as_deref(),
        Some("Total number of ventilators available.")
    );
    assert_eq!(criteria.language, "text/plain");
    assert_eq!(
        criteria.expression.as_deref(),
        Some("Source defined field: numVent")
    );
}

#[test]
fn ratio_criteria_are_split_on_slash() {
    let measure = registry().measure(fema_daily::NAME).unwrap();
    let group = measure.group("percentPositiveAmongNewlyResultedTests").unwrap();

    let numerator = &group.population[0].criteria;
    let denominator = &group.population[1].criteria;
    assert_eq!(
        numerator.description.as_deref(),
        Some("# of new positive test results")
    );
    assert_eq!(
        denominator.description.as_deref(),
        Some("# of total new tests released for previous date queried.")
    );
    assert_eq!(
        numerator.expression.as_deref(),
        Some("Numerator for source defined field: percentPositiveAmongNewlyResultedTests")
    );
    assert_eq!(
        denominator.expression.as_deref(),
        Some("Denominator for source defined field: percentPositiveAmongNewlyResultedTests")
    );
}

#[test]
fn ratio_without_slash_reuses_description() {
    let mut registry = FormatRegistry::empty(PublicationSettings::default());
    registry.register(
        Format::new("ratio", "Ratio", "")
            .with_field(
                Field::new("occupancy", "Occupancy", FieldType::Percentage)
                    .with_description("Share of beds in use"),
            )
            .with_measure_fields(["occupancy"]),
    );

    let measure = registry.measure("ratio").unwrap();
    let group = measure.group("occupancy").unwrap();
    let descriptions: Vec<_> = group
        .population
        .iter()
        .map(|p| p.criteria.description.as_deref())
        .collect();
    assert_eq!(
        descriptions,
        vec![Some("Share of beds in use"), Some("Share of beds in use")]
    );
}

#[test]
fn measure_metadata() {
    let measure = registry().measure(cdc_patient_impact::NAME).unwrap();

    assert_eq!(measure.id, "sanerCDC");
    assert_eq!(
        measure.url,
        "http://build.fhir.org/ig/AudaciousInquiry/saner-ig/sanerCDC"
    );
    assert_eq!(measure.version, "20200421.01");
    assert_eq!(measure.date, "2020-04-21T00:00:00Z");
    assert_eq!(measure.publisher, "HL7 SANER-IG");
    assert_eq!(measure.related_artifact.len(), 4);
    assert!(measure.is_composite());
}

#[rstest]
#[case(Format::new("", "", ""), "name")]
#[case(Format::new("noFields", "", "").with_measure_fields(["a"]), "fields")]
#[case(
    Format::new("noMeasured", "", "").with_field(Field::new("a", "A", FieldType::Count)),
    "measure_fields"
)]
fn malformed_formats_are_rejected(#[case] format: Format, #[case] property: &str) {
    let err = MeasureBuilder::new(&PublicationSettings::default())
        .build(&format)
        .unwrap_err();
    match err {
        SanerError::InvalidFormat { property: actual, .. } => assert_eq!(actual, property),
        other => panic!("unexpected error {other:?}"),
    }
}
