//! Response shapes returned by the VitalFlow API.

use serde::Deserialize;
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::request_status::RequestStatus;
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_core::types::{DbId, Timestamp};
use vitalflow_core::workflow::{Actor, RequestAction, RequestParties};

/// The identity account (no profile data).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountView {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

/// Register and login response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: AccountView,
}

/// `GET /auth/me`. Role and status are absent until the profile exists.
#[derive(Debug, Clone, Deserialize)]
pub struct MeView {
    pub user: AccountView,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DonorView {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Donor card from the public search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicDonorView {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoleView {
    pub role: Role,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DonationRequestView {
    pub id: DbId,
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
    pub status: RequestStatus,
    pub assigned_donor_name: Option<String>,
    pub assigned_donor_email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DonationRequestView {
    pub fn parties(&self) -> RequestParties<'_> {
        RequestParties {
            owner_email: &self.requester_email,
            assigned_donor_email: self.assigned_donor_email.as_deref(),
        }
    }

    /// Row menu entries for `actor`, from the shared workflow rules.
    pub fn actions_for(&self, actor: &Actor) -> Vec<RequestAction> {
        vitalflow_core::workflow::available_actions(self.status, actor, self.parties())
    }
}

/// `GET /requests/{id}`: the request plus the caller's permitted actions.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestDetailView {
    #[serde(flatten)]
    pub request: DonationRequestView,
    pub actions: Vec<RequestAction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FundingView {
    pub id: DbId,
    pub donor_email: String,
    pub donor_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub transaction_id: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TotalFunding {
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AdminStatsView {
    pub total_donors: i64,
    pub total_requests: i64,
    pub total_funding: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_detail_flattens_request_fields() {
        let json = serde_json::json!({
            "id": 7,
            "requester_name": "Rahim",
            "requester_email": "rahim@example.com",
            "recipient_name": "Karim",
            "recipient_district": "Dhaka",
            "recipient_upazila": "Savar",
            "full_address": "12 Lake Road",
            "hospital_name": "DMCH",
            "blood_group": "A-",
            "donation_date": "2026-11-02",
            "donation_time": "10:30",
            "request_message": "",
            "units": null,
            "status": "inprogress",
            "assigned_donor_name": "Sumi",
            "assigned_donor_email": "sumi@example.com",
            "created_at": "2026-10-01T08:00:00Z",
            "updated_at": "2026-10-02T08:00:00Z",
            "actions": ["view", "mark_done", "cancel"]
        });

        let detail: RequestDetailView = serde_json::from_value(json).unwrap();
        assert_eq!(detail.request.status, RequestStatus::InProgress);
        assert_eq!(detail.request.blood_group, BloodGroup::ANeg);
        assert_eq!(
            detail.actions,
            vec![RequestAction::View, RequestAction::MarkDone, RequestAction::Cancel]
        );

        let sumi = Actor::new("sumi@example.com", Role::Donor);
        assert_eq!(detail.request.actions_for(&sumi), detail.actions);
    }
}
