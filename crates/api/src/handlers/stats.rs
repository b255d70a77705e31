//! Dashboard counters for staff.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vitalflow_db::repositories::{DonationRequestRepo, DonorRepo, FundingRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_donors: i64,
    pub total_requests: i64,
    /// Sum of all fundings in minor units.
    pub total_funding: i64,
}

/// GET /admin-stats
pub async fn admin_stats(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<AdminStats>> {
    let (total_donors, total_requests, total_funding) = tokio::try_join!(
        DonorRepo::count(&state.pool, None),
        DonationRequestRepo::count_all(&state.pool, None),
        FundingRepo::total(&state.pool),
    )?;

    Ok(Json(AdminStats {
        total_donors,
        total_requests,
        total_funding,
    }))
}
