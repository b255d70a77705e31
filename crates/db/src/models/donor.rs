//! Donor profile model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_core::types::{DbId, Timestamp};

/// A row from the `donors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donor {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(try_from = "String")]
    pub status: AccountStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a donor profile. Role and status take their defaults.
#[derive(Debug)]
pub struct CreateDonor {
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
}

/// DTO for a profile edit. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateDonor {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}

/// Filters for the public donor search.
#[derive(Debug, Default)]
pub struct DonorSearch {
    pub blood_group: Option<BloodGroup>,
    pub district: Option<String>,
    pub upazila: Option<String>,
}
