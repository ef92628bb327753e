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

//! CDC COVID-19 Patient Impact & Hospital Capacity module (`sanerCDC`)

use super::CDC_CITATION;
use crate::model::{Field, FieldType, Format, MeasureCategory, Question, Section};
use crate::resource::RelatedArtifact;

/// Format name
pub const NAME: &str = "sanerCDC";

/// Field names
pub mod fields {
    pub const FACILITY_ID: &str = "facilityId";
    pub const SUMMARY_CENSUS_ID: &str = "summaryCensusId";
    pub const COLLECTION_DATE: &str = "collectionDate";
    pub const TOTAL_BEDS: &str = "numTotBeds";
    pub const INPATIENT_BEDS: &str = "numbeds";
    pub const INPATIENT_BED_OCCUPANCY: &str = "numBedsOcc";
    pub const ICU_BEDS: &str = "numICUBeds";
    pub const ICU_BED_OCCUPANCY: &str = "numICUBedsOcc";
    pub const VENTILATORS: &str = "numVent";
    pub const VENTILATORS_IN_USE: &str = "numVentUse";
    pub const HOSPITALIZED: &str = "numC19HospPats";
    pub const VENTILATED: &str = "numC19MechVentPats";
    pub const HOSPITAL_ONSET: &str = "numC19HOPats";
    pub const AWAITING_BEDS: &str = "numC19OverflowPats";
    pub const AWAITING_VENTILATORS: &str = "numC19OFMechVentPats";
    pub const DIED: &str = "numC19Died";
}

use fields::*;

fn count(name: &str, title: &str, description: &str, category: MeasureCategory) -> Field {
    Field::new(name, title, FieldType::Count)
        .with_description(description)
        .with_category(category)
        .with_bounds(0, 10_000)
}

fn outcome(name: &str, title: &str, description: &str) -> Field {
    count(name, title, description, MeasureCategory::Outcome)
}

fn structure(name: &str, title: &str, description: &str) -> Field {
    count(name, title, description, MeasureCategory::Structure)
}

fn cdc_document(label: &str, url: &str) -> RelatedArtifact {
    RelatedArtifact::documentation(label)
        .with_citation(CDC_CITATION)
        .with_document(url, "2020-03-27")
}

/// Build the format
pub fn format() -> Format {
    Format::new(
        NAME,
        "SANER CDC COVID-19 Patient Impact & Hospital Capacity Module",
        "SANER implementation of the CDC COVID-19 Patient Impact & Hospital Capacity Module",
    )
    .with_fields([
        Field::new(FACILITY_ID, "Facility ID #", FieldType::ShortString)
            .with_category(MeasureCategory::Structure)
            .required(),
        Field::new(SUMMARY_CENSUS_ID, "Summary Census ID #", FieldType::ShortString)
            .with_category(MeasureCategory::Structure)
            .required(),
        Field::new(COLLECTION_DATE, "Collection Date", FieldType::Date)
            .with_description(
                "Date for which patient impact and hospital capacity counts are reported",
            )
            .with_category(MeasureCategory::Structure)
            .required(),
        outcome(
            HOSPITALIZED,
            "HOSPITALIZED",
            "Patients currently hospitalized in an inpatient care location who have suspected or confirmed COVID-19.",
        ),
        outcome(
            VENTILATED,
            "HOSPITALIZED and VENTILATED",
            "Patients hospitalized in an NHSN inpatient care location who have suspected or confirmed COVID - 19 and are on a mechanical ventilator.",
        ),
        outcome(
            HOSPITAL_ONSET,
            "HOSPITAL ONSET",
            "Patients hospitalized in an NHSN inpatient care location with onset of suspected or confirmed COVID - 19 14 or more days after hospitalization.",
        ),
        outcome(
            AWAITING_BEDS,
            "ED/OVERFLOW",
            "Patients with suspected or confirmed COVID-19 who are in the ED or any overflow location awaiting an inpatient bed.",
        ),
        outcome(
            AWAITING_VENTILATORS,
            "ED/OVERFLOW and VENTILATED",
            "Patients with suspected or confirmed COVID - 19 who are in the ED or any overflow location awaiting an inpatient bed and on a mechanical ventilator.",
        ),
        outcome(
            DIED,
            "DEATHS",
            "Patients with suspected or confirmed COVID-19 who died in the hospital, ED, or any overflow location.",
        )
        .with_bounds(0, 1_500),
        structure(
            TOTAL_BEDS,
            "ALL HOSPTIAL BEDS",
            "Total number of all Inpatient and outpatient beds, including all staffed, ICU, licensed, and overflow(surge) beds used for inpatients or outpatients.",
        ),
        structure(
            INPATIENT_BEDS,
            "HOSPITAL INPATIENT BEDS",
            "Inpatient beds, including all staffed, licensed, and overflow(surge) beds used for inpatients.",
        )
        .required(),
        structure(
            INPATIENT_BED_OCCUPANCY,
            "HOSPITAL INPATIENT BED OCCUPANCY",
            "Total number of staffed inpatient beds that are occupied.",
        ),
        structure(
            ICU_BEDS,
            "ICU BEDS",
            "Total number of staffed inpatient intensive care unit (ICU) beds.",
        ),
        structure(
            ICU_BED_OCCUPANCY,
            "ICU BED OCCUPANCY",
            "Total number of staffed inpatient ICU beds that are occupied.",
        ),
        structure(
            VENTILATORS,
            "MECHANICAL VENTILATORS",
            "Total number of ventilators available.",
        ),
        structure(
            VENTILATORS_IN_USE,
            "MECHANICAL VENTILATORS IN USE",
            "Total number of ventilators in use.",
        ),
    ])
    .with_measure_fields([
        TOTAL_BEDS,
        INPATIENT_BEDS,
        INPATIENT_BED_OCCUPANCY,
        ICU_BEDS,
        ICU_BED_OCCUPANCY,
        VENTILATORS,
        VENTILATORS_IN_USE,
        HOSPITALIZED,
        VENTILATED,
        HOSPITAL_ONSET,
        AWAITING_BEDS,
        AWAITING_VENTILATORS,
        DIED,
    ])
    .with_section(Section::new(
        "COVID-19 Module: Patient Impact and Hospital Capacity Pathway",
        [FACILITY_ID, SUMMARY_CENSUS_ID, COLLECTION_DATE]
            .into_iter()
            .map(Question::new)
            .collect(),
    ))
    .with_section(Section::new(
        "Patient Impact Data Elements",
        [
            HOSPITALIZED,
            VENTILATED,
            HOSPITAL_ONSET,
            AWAITING_BEDS,
            AWAITING_VENTILATORS,
            DIED,
        ]
        .into_iter()
        .map(Question::new)
        .collect(),
    ))
    .with_section(Section::new(
        "Hospital Bed/ Intensive Care Unit (ICU)/ Ventilator Capacity Data Elements",
        [
            TOTAL_BEDS,
            INPATIENT_BEDS,
            INPATIENT_BED_OCCUPANCY,
            ICU_BEDS,
            ICU_BED_OCCUPANCY,
            VENTILATORS,
            VENTILATORS_IN_USE,
        ]
        .into_iter()
        .map(Question::new)
        .collect(),
    ))
    .with_artifact(
        cdc_document("COVID-19 Module", "https://www.cdc.gov/nhsn/acute-care-hospital/covid19/")
            .with_display(
                "CDC’s NHSN is supporting the nation’s COVID-19 response by introducing a new COVID-19 Module.",
            ),
    )
    .with_artifact(cdc_document(
        "Importing COVID-19 Patient Module Denominator data for Patient Safety Component",
        "https://www.cdc.gov/nhsn/pdfs/covid19/import-covid19-data-508.pdf",
    ))
    .with_artifact(cdc_document(
        "Instructions for Completion of the COVID-19 Patient Impact and Hospital Capacity Module Form (CDC 57.130)",
        "https://www.cdc.gov/nhsn/pdfs/covid19/57.130-toi-508.pdf",
    ))
    .with_artifact(cdc_document(
        "covi19-test-csv-import",
        "https://www.cdc.gov/nhsn/pdfs/covid19/covid19-test-csv-import.csv",
    ))
    .enable_measure_report()
}
