//! Form payloads shared by the server (request bodies) and the client
//! (pre-submission checks).
//!
//! Each form's `validate` returns the first problem found so the UI can show
//! one inline message at a time.

use serde::{Deserialize, Serialize};

use crate::blood_group::BloodGroup;
use crate::error::CoreError;
use crate::validation::{
    require_non_empty, validate_donation_date, validate_donation_time, validate_email,
    validate_message, validate_password, validate_units,
};

/// Email + password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_email(&self.email)?;
        require_non_empty("Password", &self.password)
    }
}

/// Identity account creation (the credential half of registration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountForm {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl AccountForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("Name", &self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Donor profile creation (the backend half of registration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("Name", &self.name)?;
        require_non_empty("District", &self.district)?;
        require_non_empty("Upazila", &self.upazila)
    }
}

/// The full registration screen, before it is split into account + profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("Name", &self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(CoreError::Validation("Passwords do not match".to_string()));
        }
        require_non_empty("District", &self.district)?;
        require_non_empty("Upazila", &self.upazila)
    }

    pub fn account(&self, photo_url: Option<String>) -> AccountForm {
        AccountForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            photo_url,
        }
    }

    pub fn profile(&self, avatar_url: Option<String>) -> ProfileForm {
        ProfileForm {
            name: self.name.trim().to_string(),
            avatar_url,
            blood_group: self.blood_group,
            district: self.district.trim().to_string(),
            upazila: self.upazila.trim().to_string(),
        }
    }
}

/// Partial profile edit. Email is the natural key and cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub upazila: Option<String>,
}

impl ProfileUpdateForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            require_non_empty("Name", name)?;
        }
        if let Some(district) = &self.district {
            require_non_empty("District", district)?;
        }
        if let Some(upazila) = &self.upazila {
            require_non_empty("Upazila", upazila)?;
        }
        // A district change without an upazila would leave a mismatched pair.
        if self.district.is_some() != self.upazila.is_some() {
            return Err(CoreError::Validation(
                "District and upazila must be updated together".to_string(),
            ));
        }
        Ok(())
    }
}

/// Create or edit a donation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequestForm {
    pub recipient_name: String,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub full_address: String,
    pub hospital_name: String,
    pub blood_group: BloodGroup,
    pub donation_date: String,
    pub donation_time: String,
    #[serde(default)]
    pub request_message: String,
    #[serde(default)]
    pub units: Option<i32>,
}

impl DonationRequestForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("Recipient name", &self.recipient_name)?;
        require_non_empty("Recipient district", &self.recipient_district)?;
        require_non_empty("Recipient upazila", &self.recipient_upazila)?;
        require_non_empty("Full address", &self.full_address)?;
        require_non_empty("Hospital name", &self.hospital_name)?;
        validate_donation_date(&self.donation_date)?;
        validate_donation_time(&self.donation_time)?;
        validate_message(&self.request_message)?;
        validate_units(self.units)
    }
}
