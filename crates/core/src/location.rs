//! District / upazila directory backing the location pickers.
//!
//! The data ships as two static JSON files (`districts.json`, `upazilas.json`)
//! that the server also exposes verbatim. Ids are strings in the source data.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    #[serde(default)]
    pub division_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub bn_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upazila {
    pub id: String,
    pub district_id: String,
    pub name: String,
    #[serde(default)]
    pub bn_name: Option<String>,
}

/// In-memory lookup over the district and upazila lists.
#[derive(Debug, Clone, Default)]
pub struct LocationDirectory {
    districts: Vec<District>,
    upazilas: Vec<Upazila>,
}

impl LocationDirectory {
    pub fn new(districts: Vec<District>, upazilas: Vec<Upazila>) -> Self {
        Self {
            districts,
            upazilas,
        }
    }

    /// Parse the two JSON documents.
    pub fn from_json(districts_json: &str, upazilas_json: &str) -> Result<Self, CoreError> {
        let districts: Vec<District> = serde_json::from_str(districts_json)
            .map_err(|e| CoreError::Internal(format!("Malformed districts data: {e}")))?;
        let upazilas: Vec<Upazila> = serde_json::from_str(upazilas_json)
            .map_err(|e| CoreError::Internal(format!("Malformed upazilas data: {e}")))?;
        Ok(Self::new(districts, upazilas))
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn district(&self, name: &str) -> Option<&District> {
        self.districts
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn has_district(&self, name: &str) -> bool {
        self.district(name).is_some()
    }

    /// Upazilas of a district, by district name. Empty when unknown.
    pub fn upazilas_of(&self, district_name: &str) -> Vec<&Upazila> {
        match self.district(district_name) {
            Some(district) => self
                .upazilas
                .iter()
                .filter(|u| u.district_id == district.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// The upazila must exist and belong to the named district.
    pub fn validate(&self, district: &str, upazila: &str) -> Result<(), CoreError> {
        if !self.has_district(district) {
            return Err(CoreError::Validation(format!("Unknown district '{district}'")));
        }
        let belongs = self
            .upazilas_of(district)
            .iter()
            .any(|u| u.name.eq_ignore_ascii_case(upazila.trim()));
        if !belongs {
            return Err(CoreError::Validation(format!(
                "Upazila '{upazila}' is not in district '{district}'"
            )));
        }
        Ok(())
    }
}
