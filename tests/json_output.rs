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

//! FHIR JSON rendering of generated resources

use chrono::NaiveDate;
use octofhir_saner::formats::{cdc_healthcare_supply, fema_daily};
use octofhir_saner::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const ITEM_ORDER: &str =
    "http://fhir.org/guides/argonaut/questionnaire/StructureDefinition/extension-itemOrder";

fn first_question(questionnaire: &Value) -> &Value {
    &questionnaire["item"][0]["item"][0]
}

#[test]
fn questionnaire_json_shape() {
    let registry = FormatRegistry::default();
    let json = registry.questionnaire(fema_daily::NAME).unwrap().to_value().unwrap();

    assert_eq!(json["resourceType"], "Questionnaire");
    assert_eq!(json["status"], "draft");
    assert_eq!(json["jurisdiction"][0]["coding"][0]["code"], "US");
    assert_eq!(json["useContext"][0]["valueCodeableConcept"]["coding"][0]["code"], "840539006");

    let section = &json["item"][0];
    assert_eq!(section["linkId"], "section_0");
    assert_eq!(section["type"], "group");
    assert_eq!(section["repeats"], false);

    assert_eq!(
        first_question(&json),
        &json!({
            "extension": [{"url": ITEM_ORDER, "valueDecimal": 0.0}],
            "linkId": "collectionDate",
            "code": [{
                "system": "http://build.fhir.org/ig/AudaciousInquiry/saner-ig/sanerFEMA",
                "code": "collectionDate"
            }],
            "text": "Date: ",
            "type": "date",
            "required": true,
            "repeats": false
        })
    );
}

#[test]
fn answer_options_carry_extensions() {
    let registry = FormatRegistry::default();
    let json = registry
        .questionnaire(cdc_healthcare_supply::NAME)
        .unwrap()
        .to_value()
        .unwrap();

    let vent = &json["item"][2]["item"][0];
    assert_eq!(vent["linkId"], "ventsupply");
    assert_eq!(
        vent["answerOption"][1],
        json!({
            "valueString": "1-3 days",
            "_valueString": {
                "extension": [
                    {
                        "url": "http://hl7.org/fhir/StructureDefinition/questionnaire-optionExclusive",
                        "valueBoolean": true
                    },
                    {"url": ITEM_ORDER, "valueDecimal": 1.0}
                ]
            }
        })
    );
}

#[test]
fn measure_report_json_omits_unscored_parts() {
    let day = NaiveDate::from_ymd_opt(2020, 4, 21).unwrap();
    let data = ReportData::new(day, day).with_count("newDiagnosticTests", Some(40));
    let json = FormatRegistry::default()
        .report(fema_daily::NAME, &data)
        .unwrap()
        .to_value()
        .unwrap();

    assert_eq!(json["resourceType"], "MeasureReport");
    assert_eq!(json["status"], "complete");
    assert_eq!(json["type"], "summary");
    assert_eq!(json["period"], json!({"start": "2020-04-21", "end": "2020-04-21"}));
    assert_eq!(json["meta"]["security"][0]["code"], "HTEST");

    let scored = &json["group"][0];
    assert_eq!(scored["measureScore"], json!({"value": 40.0}));
    assert_eq!(scored["population"][0]["count"], 40);

    let unscored = json["group"][1].as_object().unwrap();
    assert!(unscored.contains_key("code"));
    assert!(!unscored.contains_key("population"));
    assert!(!unscored.contains_key("measureScore"));
}

#[test]
fn bundles_use_internal_full_urls() {
    let registry = FormatRegistry::default();
    let json = registry.measure_bundle(fema_daily::NAME).unwrap().to_value().unwrap();

    assert_eq!(json["resourceType"], "Bundle");
    assert_eq!(json["type"], "collection");
    assert_eq!(
        json["entry"][0]["fullUrl"],
        "https://github.com/microsoft-healthcare-madison/learning-spike-erp/Measure/sanerFEMA"
    );
    assert_eq!(json["entry"][0]["resource"]["resourceType"], "Measure");

    let questionnaires = registry.questionnaire_bundle(fema_daily::NAME).unwrap();
    assert_eq!(
        questionnaires.entry[0].full_url,
        "https://github.com/microsoft-healthcare-madison/learning-spike-erp/Questionnaire/sanerFEMA"
    );
}

#[test]
fn pretty_and_compact_json_agree() {
    let measure = FormatRegistry::default().measure(fema_daily::NAME).unwrap();
    let compact: Value = serde_json::from_str(&measure.to_json().unwrap()).unwrap();
    let pretty: Value = serde_json::from_str(&measure.to_json_pretty().unwrap()).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn settings_load_from_json() {
    let settings = PublicationSettings::from_json(
        r#"{"canonicalUrl": "http://example.org/saner", "tagReportsAsTest": false}"#,
    )
    .unwrap();
    assert_eq!(settings.canonical_url, "http://example.org/saner");
    assert!(!settings.tag_reports_as_test);
    assert_eq!(settings.publisher, "HL7 SANER-IG");

    assert!(matches!(
        PublicationSettings::from_json("{").unwrap_err(),
        SanerError::Serialization { .. }
    ));
}
