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

//! CDC COVID-19 Healthcare Supply Pathway

use super::{nhsn_author, nhsn_page};
use crate::model::{
    Coding, Field, FieldOption, FieldType, Format, Grouping, GroupingPopulation,
    MeasureCategory, Question, Section, systems,
};

/// Format name
pub const NAME: &str = "CDCHealthcareSupplyPathway";

/// Field names
pub mod fields {
    pub const FACILITY_ID: &str = "facilityId";
    pub const SUMMARY_CENSUS_ID: &str = "summaryCensusId";
    pub const COLLECTION_DATE: &str = "collectiondate";
    pub const INFORMATION: &str = "information";
    pub const ON_HAND_SUPPLY: &str = "onHandSupply";
    pub const REUSE_OR_EXTENDED_USE: &str = "reuseOrExtendedUse";
    pub const ABLE_TO_OBTAIN: &str = "ableToObtain";
}

use fields::*;

/// A supply item and the grouping its answers report under
struct SupplyItem {
    /// Display field heading the item's section
    base: &'static str,
    /// Prefix of the answer fields
    prefix: &'static str,
    title: &'static str,
    description: &'static str,
    group_code: &'static str,
    group_text: &'static str,
}

const ITEMS: [SupplyItem; 7] = [
    SupplyItem {
        base: "vent",
        prefix: "vent",
        title: "Ventilator supplies (any, including tubing)",
        description: "any supplies, including flow sensors, tubing, connectors, valves, filters, etc",
        group_code: "Ventilators",
        group_text: "Ventilator Supply Reporting",
    },
    SupplyItem {
        base: "n95mask",
        prefix: "n95mask",
        title: "N95 masks",
        description: "",
        group_code: "N95Masks",
        group_text: "N95 Mask Supply Reporting",
    },
    SupplyItem {
        base: "otherresp",
        prefix: "othresp",
        title: "Other respirators including PAPRs",
        description: "Other respirators such as PAPRs or elastomerics",
        group_code: "OtherRespirators",
        group_text: "Other Respirator Supply Reporting",
    },
    SupplyItem {
        base: "surgmask",
        prefix: "surgmask",
        title: "Surgical masks",
        description: "",
        group_code: "SurgicalMasks",
        group_text: "Surgical Mask Supply Reporting",
    },
    SupplyItem {
        base: "shield",
        prefix: "shield",
        title: "Eye protection including face shields or goggles",
        description: "",
        group_code: "EyeProtection",
        group_text: "Eye Protection Supply Reporting",
    },
    SupplyItem {
        base: "gown",
        prefix: "gown",
        title: "Gowns (single use)",
        description: "",
        group_code: "Gown",
        group_text: "Gown Supply Reporting",
    },
    SupplyItem {
        base: "glove",
        prefix: "glove",
        title: "Gloves",
        description: "",
        group_code: "Glove",
        group_text: "Glove Supply Reporting",
    },
];

/// Days of supply on hand
pub fn supply_choices() -> Vec<FieldOption> {
    ["Zero days", "1-3 days", "4-14 days", "15 or more days"]
        .into_iter()
        .map(FieldOption::new)
        .collect()
}

fn supply_field(name: String, item: &SupplyItem, field_type: FieldType) -> Field {
    Field::new(name, item.title, field_type)
        .with_description(item.description)
        .with_category(MeasureCategory::Structure)
}

/// Build the format
pub fn format() -> Format {
    let mut format = Format::new(
        NAME,
        "COVID-19 Healthcare Supply Pathway",
        "SANER implementation of the CDC COVID-19 Healthcare Supply Pathway",
    )
    .with_fields([
        Field::new(INFORMATION, "Information", FieldType::Display).required(),
        Field::new(ON_HAND_SUPPLY, "On-hand Supply", FieldType::Choice)
            .with_description(
                "Please answer based on your organization’s best estimation for the supply of this item.",
            )
            .with_options(supply_choices())
            .required(),
        Field::new(REUSE_OR_EXTENDED_USE, "Reusing or Extending Use", FieldType::Display)
            .with_description("Are you currently reusing the item or implementing extended use?")
            .required(),
        Field::new(ABLE_TO_OBTAIN, "Able to Obtain", FieldType::Display)
            .with_description(
                "Are you able to obtain this item? If you have placed an order but  are not able to have that order filled, please answer NO.",
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
        "COVID-19 Module: Healthcare Supply Pathway",
        [FACILITY_ID, SUMMARY_CENSUS_ID, COLLECTION_DATE]
            .into_iter()
            .map(Question::new)
            .collect(),
    ))
    .with_section(Section::new(
        INFORMATION,
        [ON_HAND_SUPPLY, REUSE_OR_EXTENDED_USE, ABLE_TO_OBTAIN]
            .into_iter()
            .map(Question::new)
            .collect(),
    ));

    for item in &ITEMS {
        let supply = format!("{}supply", item.prefix);
        let reuse = format!("{}reuse", item.prefix);
        let obtain = format!("{}obtain", item.prefix);

        format = format
            .with_fields([
                supply_field(item.base.to_string(), item, FieldType::Display),
                supply_field(supply.clone(), item, FieldType::Choice).with_options(supply_choices()),
                supply_field(reuse.clone(), item, FieldType::Boolean),
                supply_field(obtain.clone(), item, FieldType::Boolean),
            ])
            .with_section(Section::new(
                item.base,
                vec![
                    Question::with_display(supply.as_str(), ON_HAND_SUPPLY),
                    Question::with_display(reuse.as_str(), REUSE_OR_EXTENDED_USE),
                    Question::with_display(obtain.as_str(), ABLE_TO_OBTAIN),
                ],
            ))
            .with_grouping(Grouping::new(
                Coding::new(systems::SANER_GROUP, item.group_code, item.title),
                item.group_text,
                [supply, reuse, obtain]
                    .into_iter()
                    .map(|name| GroupingPopulation::new(name, None))
                    .collect(),
            ));
    }

    format
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
            "Instructions for Completion of the COVID-19 Healthcare Supply Pathway (CDC 57.132)",
            "https://www.cdc.gov/nhsn/pdfs/covid19/57.132-toi-508.pdf",
        ))
        .with_artifact(nhsn_page(
            "PDF Form",
            "Healthcare Supply Pathway Form",
            "https://www.cdc.gov/nhsn/pdfs/covid19/57.132-covid19-sup-blank-p.pdf",
        ))
        .with_artifact(nhsn_page(
            "CSV File Template",
            "CDC/NHSN COVID-19 Acute Care Healthcare Supply Reporting CSV File Template",
            "https://www.cdc.gov/nhsn/pdfs/covid19/facility-import-supplies.csv",
        ))
        .with_author(nhsn_author())
}
