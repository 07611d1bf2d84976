pub mod ada;
pub mod contact;
pub mod hours;
pub mod identity;
pub mod labels;

use serde::{Serialize, Serializer};

use super::segment::GENDER_RE;

/// Values a job supplies for fields the listing text never carries.
#[derive(Debug, Clone)]
pub struct ParseDefaults {
    pub category: String,
    pub state: String,
}

impl ParseDefaults {
    pub fn new(category: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            state: state.into(),
        }
    }
}

/// One provider listing in the directory's column layout. Field renames are the CSV
/// header, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderRecord {
    #[serde(rename = "Provider_Category")]
    pub category: String,
    #[serde(rename = "Provider_Specialty")]
    pub specialty: Option<String>,
    #[serde(rename = "Provider_FIRST_Name")]
    pub first_name: Option<String>,
    #[serde(rename = "PROVIDER_MIDDLE_NAME")]
    pub middle_name: Option<String>,
    #[serde(rename = "PROVIDER_LAST_Name")]
    pub last_name: Option<String>,
    #[serde(rename = "Degree")]
    pub degree: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Organization")]
    pub organization: Option<String>,
    #[serde(rename = "Group_Name")]
    pub group_name: Option<String>,
    #[serde(rename = "Provider_ID")]
    pub provider_id: Option<String>,
    #[serde(rename = "NPI")]
    pub npi: Option<String>,
    #[serde(rename = "License_Number")]
    pub license_number: Option<String>,
    #[serde(rename = "Address_Line")]
    pub address_line: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "County")]
    pub county: Option<String>,
    #[serde(rename = "ZIP")]
    pub zip: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Languages", serialize_with = "json_list")]
    pub languages: Vec<String>,
    #[serde(rename = "ADA_Features", serialize_with = "json_list")]
    pub ada_features: Vec<String>,
    #[serde(rename = "Days_Hours")]
    pub days_hours: String,
    #[serde(rename = "Accepting_New_Patients")]
    pub accepting_new_patients: bool,
    #[serde(rename = "Hospital_Affiliations")]
    pub hospital_affiliations: Option<String>,
    #[serde(rename = "Age_Group")]
    pub age_group: Option<String>,
    #[serde(rename = "Areas_of_Expertise")]
    pub areas_of_expertise: Option<String>,
    #[serde(rename = "Web_Address")]
    pub web_address: Option<String>,
}

/// List cells are written as JSON arrays, e.g. `["English","Spanish"]`.
fn json_list<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    let json = serde_json::to_string(items).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&json)
}

/// Parse one annotated provider unit. Units without a gender marker are not listings.
pub fn parse_unit(text: &str, defaults: &ParseDefaults) -> Option<ProviderRecord> {
    if !GENDER_RE.is_match(text) {
        return None;
    }

    let mut record = ProviderRecord {
        category: labels::provider_category(text).unwrap_or_else(|| defaults.category.clone()),
        state: defaults.state.clone(),
        ..Default::default()
    };

    if let Some(id) = identity::parse_identity(text) {
        record.last_name = Some(id.last);
        record.first_name = Some(id.first);
        record.middle_name = id.middle;
        record.degree = Some(id.degree);
        record.gender = Some(id.gender);
    }

    record.group_name = labels::group_name(text);
    record.provider_id = contact::provider_id(text);
    record.npi = contact::npi(text);

    if let Some(addr) = contact::address(text) {
        record.address_line = Some(addr.line);
        record.city = Some(addr.city);
        record.zip = Some(addr.zip);
    }

    record.phone = contact::phone(text);
    record.languages = labels::languages(text);
    record.ada_features = ada::ada_features(text);
    record.days_hours = hours::days_hours(text);
    record.accepting_new_patients = text.contains("Accepting New Patients");
    record.age_group = labels::age_group(text);
    record.hospital_affiliations = labels::hospital_affiliations(text);
    record.specialty = labels::provider_specialty(text);
    record.web_address = labels::web_address(text);
    record.areas_of_expertise = labels::areas_of_expertise(text);

    Some(record)
}
