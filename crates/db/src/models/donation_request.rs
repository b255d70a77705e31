//! Donation request model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::request_status::RequestStatus;
use vitalflow_core::types::{DbId, Timestamp};
use vitalflow_core::workflow::RequestParties;

/// A row from the `donation_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonationRequest {
    pub id: DbId,
    pub requester_name: String,
    pub requester_email: String,
    pub recipient_name: String,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub full_address: String,
    pub hospital_name: String,
    #[sqlx(try_from = "String")]
    pub blood_group: BloodGroup,
    pub donation_date: String,
    pub donation_time: String,
    pub request_message: String,
    pub units: Option<i32>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub assigned_donor_name: Option<String>,
    pub assigned_donor_email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DonationRequest {
    /// The people the workflow rules look at.
    pub fn parties(&self) -> RequestParties<'_> {
        RequestParties {
            owner_email: &self.requester_email,
            assigned_donor_email: self.assigned_donor_email.as_deref(),
        }
    }
}

/// DTO for inserting a new request. Status always starts at `pending`.
#[derive(Debug)]
pub struct CreateDonationRequest {
    pub requester_name: String,
    pub requester_email: String,
    pub recipient_name: String,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub full_address: String,
    pub hospital_name: String,
    pub blood_group: BloodGroup,
    pub donation_date: String,
    pub donation_time: String,
    pub request_message: String,
    pub units: Option<i32>,
}

/// DTO for editing a pending request's recipient and schedule fields.
#[derive(Debug)]
pub struct UpdateDonationRequest {
    pub recipient_name: String,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub full_address: String,
    pub hospital_name: String,
    pub blood_group: BloodGroup,
    pub donation_date: String,
    pub donation_time: String,
    pub request_message: String,
    pub units: Option<i32>,
}

/// Donor stamped onto a request when it is accepted.
#[derive(Debug, Clone)]
pub struct DonorAssignment {
    pub name: String,
    pub email: String,
}
