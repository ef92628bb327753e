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

//! CDC COVID-19 Healthcare Worker Staffing Pathway

use super::{nhsn_author, nhsn_page};
use crate::model::{Field, FieldType, Format, MeasureCategory, Question, Section};

/// Format name
pub const NAME: &str = "CDCHealthcareWorkerStaffingPathway";

/// Field names
pub mod fields {
    pub const FACILITY_ID: &str = "facilityId";
    pub const SUMMARY_CENSUS_ID: &str = "summaryCensusId";
    pub const COLLECTION_DATE: &str = "collectiondate";
    pub const INFORMATION: &str = "information";
    pub const GROUP_TODAY: &str = "groupToday";
    pub const GROUP_THIS_WEEK: &str = "groupThisWeek";
    pub const ENV_SERVICE_TODAY: &str = "shortenvsvc";
    pub const NURSE_TODAY: &str = "shortnurse";
    pub const RT_TODAY: &str = "shortrt";
    pub const PHARM_TODAY: &str = "shortphar";
    pub const PHYSICIAN_TODAY: &str = "shortphys";
    pub const TEMP_TODAY: &str = "shorttemp";
    pub const OTHER_TODAY: &str = "shortoth";
    pub const OTHER_LICENSED_TODAY: &str = "shortothlic";
    pub const OTHER_SPECIFY_TODAY: &str = "shortothsfy";
    pub const ENV_SERVICE_WEEK: &str = "posshortenvsvc";
    pub const NURSE_WEEK: &str = "posshortnurse";
    pub const RT_WEEK: &str = "posshortrt";
    pub const PHARM_WEEK: &str = "posshortphar";
    pub const PHYSICIAN_WEEK: &str = "posshortphys";
    pub const TEMP_WEEK: &str = "posshorttemp";
    pub const OTHER_WEEK: &str = "posshortoth";
    pub const OTHER_LICENSED_WEEK: &str = "posshortothlic";
    pub const OTHER_SPECIFY_WEEK: &str = "posshortothsfy";
}

use fields::*;

const OTHER_HCP: &str = "Persons who work in the facility, regardless of clinical responsibility or patient contact not included in categories above";

/// Staff groups asked about today and within a week, with their shared label
const STAFF_GROUPS: [(&str, &str, &str, &str); 7] = [
    (
        ENV_SERVICE_TODAY,
        ENV_SERVICE_WEEK,
        "Environmental services",
        "Front-line persons who clean patient rooms and all areas in a healthcare facility",
    ),
    (
        NURSE_TODAY,
        NURSE_WEEK,
        "Nurses",
        "Registered nurses and licensed practical nurses",
    ),
    (
        RT_TODAY,
        RT_WEEK,
        "Respiratory therapists",
        "Certified medical professionals who specialize in knowledge and use of mechanical ventilation as well as other programs for respiratory care",
    ),
    (PHARM_TODAY, PHARM_WEEK, "Pharmacists and pharmacy techs", ""),
    (
        PHYSICIAN_TODAY,
        PHYSICIAN_WEEK,
        "Physicians",
        "Attending physicians, fellows",
    ),
    (
        TEMP_TODAY,
        TEMP_WEEK,
        "Temporary physicians, nurses, respiratory therapists, and pharmacists",
        "'per diems', 'travelers', retired, or other seasonal or intermittently contracted persons",
    ),
    (
        OTHER_LICENSED_TODAY,
        OTHER_LICENSED_WEEK,
        "Other licensed independent practitioners",
        "Advanced practice nurses, physician assistants",
    ),
];

fn shortage(name: &str, title: &str, field_type: FieldType, description: &str) -> Field {
    Field::new(name, title, field_type)
        .with_description(description)
        .with_category(MeasureCategory::Structure)
}

/// Build the format
pub fn format() -> Format {
    let other_hcp_week = format!("{OTHER_HCP}.");

    let mut format = Format::new(
        NAME,
        "COVID-19 Healthcare Worker Staffing Pathway",
        "SANER implementation of the CDC COVID-19 Healthcare Worker Staffing Pathway",
    )
    .with_fields([
        Field::new(INFORMATION, "Information", FieldType::Display).required(),
        Field::new(GROUP_TODAY, "Critical Staffing Shortage Today", FieldType::Display)
            .with_description(
                "Does your organization consider that it has a critical staffing shortage in this group today?",
            )
            .required(),
        Field::new(
            GROUP_THIS_WEEK,
            "Critical Staffing Shortage Within a Week",
            FieldType::Display,
        )
        .with_description(
            "Does your organization anticipate that it will have a critical staffing shortage in this group within one week?",
        )
        .required(),
        Field::new(FACILITY_ID, "Facility ID #", FieldType::ShortString)
            .with_category(MeasureCategory::Structure)
            .required(),
        Field::new(SUMMARY_CENSUS_ID, "Summary Census ID #", FieldType::ShortString)
            .with_category(MeasureCategory::Structure)
            .required(),
        Field::new(COLLECTION_DATE, "Collection Date", FieldType::Date)
            .with_description(
                "Select the date for which the recorded data was collected for the following questions.",
            )
            .with_category(MeasureCategory::Structure)
            .required(),
    ])
    .with_section(Section::new(
        "COVID-19 Module: Healthcare Worker Staffing Pathway",
        [FACILITY_ID, SUMMARY_CENSUS_ID, COLLECTION_DATE]
            .into_iter()
            .map(Question::new)
            .collect(),
    ))
    .with_section(Section::new(
        INFORMATION,
        vec![Question::new(GROUP_TODAY), Question::new(GROUP_THIS_WEEK)],
    ));

    for (today, week, title, description) in STAFF_GROUPS {
        format = format
            .with_fields([
                shortage(today, title, FieldType::Boolean, description),
                shortage(week, title, FieldType::Boolean, description),
            ])
            .with_section(Section::new(
                today,
                vec![
                    Question::with_display(today, GROUP_TODAY),
                    Question::with_display(week, GROUP_THIS_WEEK),
                ],
            ));
    }

    format
        .with_fields([
            shortage(OTHER_TODAY, "Other HCP", FieldType::Boolean, OTHER_HCP),
            shortage(
                OTHER_SPECIFY_TODAY,
                "Other HCP - Specify the groups",
                FieldType::ShortString,
                OTHER_HCP,
            ),
            shortage(OTHER_WEEK, "Other HCP", FieldType::Boolean, &other_hcp_week),
            shortage(
                OTHER_SPECIFY_WEEK,
                "Other HCP - Specify the groups",
                FieldType::ShortString,
                &other_hcp_week,
            ),
        ])
        .with_section(Section::new(
            OTHER_TODAY,
            vec![
                Question::with_display(OTHER_TODAY, GROUP_TODAY),
                Question::title_only(OTHER_SPECIFY_TODAY),
                Question::with_display(OTHER_WEEK, GROUP_THIS_WEEK),
                Question::title_only(OTHER_SPECIFY_WEEK),
            ],
        ))
        .with_artifact(nhsn_page(
            "NHSN COVID-19 Reporting for Acute Care",
            "CDC/NHSN COVID-19 Acute Care Module Home Page",
            "https://www.cdc.gov/nhsn/acute-care-hospital/covid19/",
        ))
        .with_artifact(nhsn_page(
            "How to import COVID-19 Summary Data",
            "Facility - How to Upload COVID-19 CSV Data Files",
            "https://www.cdc.gov/nhsn/pdfs/covid19/import-covid19-data-508.pdf",
        ))
        .with_artifact(nhsn_page(
            "COVID-19 Module Analysis Reports",
            "NHSN COVID-19 Module Analysis Reports",
            "https://www.cdc.gov/nhsn/pdfs/covid19/fac-analysis-qrg-508.pdf",
        ))
        .with_artifact(nhsn_page(
            "Table of Instructions",
            "Instructions for Completion of the COVID-19 Healthcare Worker Staffing Pathway (CDC 57.131)",
            "https://www.cdc.gov/nhsn/pdfs/covid19/57.131-toi-508.pdf",
        ))
        .with_artifact(nhsn_page(
            "PDF Form",
            "Healthcare Worker Staffing Pathway Form",
            "https://www.cdc.gov/nhsn/pdfs/covid19/57.131-covid19-hwp-blank-p.pdf",
        ))
        .with_artifact(nhsn_page(
            "CSV File Template",
            "CDC/NHSN COVID-19 Acute Care Healthcare Supply Reporting CSV File Template",
            "https://www.cdc.gov/nhsn/pdfs/covid19/facility-import-hcw.csv",
        ))
        .with_author(nhsn_author())
}
