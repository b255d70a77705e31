//! Handlers for donation requests.
//!
//! Every status change, edit and delete is checked with
//! [`vitalflow_core::workflow::transition`] before it reaches the database.
//! Status writes are compare-and-set on the status that was checked, so a
//! request that moved in the meantime yields 409 instead of a lost update.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitalflow_core::error::CoreError;
use vitalflow_core::forms::DonationRequestForm;
use vitalflow_core::pagination::{clamp_size, Page};
use vitalflow_core::request_status::{parse_status_filter, RequestStatus};
use vitalflow_core::types::DbId;
use vitalflow_core::workflow::{
    action_for_target, available_actions, transition, Actor, RequestAction,
};
use vitalflow_db::models::donation_request::{
    CreateDonationRequest, DonationRequest, DonorAssignment, UpdateDonationRequest,
};
use vitalflow_db::repositories::DonationRequestRepo;

use super::{check_location, forbidden, same_email};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{ActiveDonor, CurrentDonor, RequireAdmin, RequireStaff};
use crate::query::{parse_blood_group_param, BloodGroupParams, LimitParams, ListParams};
use crate::state::AppState;

/// Default and maximum size of the public recent-requests list.
const RECENT_DEFAULT: i64 = 6;
const RECENT_MAX: i64 = 50;

/// Rows in the dashboard's "my recent requests" card.
const MY_RECENT_LIMIT: i64 = 3;

/// Rows in the urgent list.
const URGENT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A request plus the actions the caller may take on it.
#[derive(Debug, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: DonationRequest,
    pub actions: Vec<RequestAction>,
}

/// Body of `PATCH /update-donation-status/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /requests
///
/// Blocked users are rejected by [`ActiveDonor`] before the body is read.
pub async fn create_request(
    State(state): State<AppState>,
    ActiveDonor(me): ActiveDonor,
    Json(input): Json<DonationRequestForm>,
) -> AppResult<(StatusCode, Json<DonationRequest>)> {
    input.validate()?;
    check_location(&state, &input.recipient_district, &input.recipient_upazila)?;

    let request = DonationRequestRepo::create(
        &state.pool,
        &CreateDonationRequest {
            requester_name: me.name.clone(),
            requester_email: me.email.clone(),
            recipient_name: input.recipient_name.trim().to_string(),
            recipient_district: input.recipient_district.trim().to_string(),
            recipient_upazila: input.recipient_upazila.trim().to_string(),
            full_address: input.full_address.trim().to_string(),
            hospital_name: input.hospital_name.trim().to_string(),
            blood_group: input.blood_group,
            donation_date: input.donation_date.trim().to_string(),
            donation_time: input.donation_time.trim().to_string(),
            request_message: input.request_message,
            units: input.units,
        },
    )
    .await?;

    tracing::info!(request_id = request.id, donor_id = me.id, "Donation request created");
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    me: CurrentDonor,
    Path(id): Path<DbId>,
) -> AppResult<Json<RequestDetail>> {
    let request = find_request(&state, id).await?;
    let actions = if me.0.status.is_active() {
        available_actions(request.status, &me.actor(), request.parties())
    } else {
        vec![RequestAction::View]
    };
    Ok(Json(RequestDetail { request, actions }))
}

/// GET /requests?limit=
///
/// Public list of the newest pending requests.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<DonationRequest>>> {
    let limit = clamp_size(params.limit, RECENT_DEFAULT, RECENT_MAX);
    let requests = DonationRequestRepo::list_recent_pending(&state.pool, limit).await?;
    Ok(Json(requests))
}

/// GET /urgent-requests?bloodGroup=
///
/// Public list of pending requests, soonest donation date first.
pub async fn list_urgent(
    State(state): State<AppState>,
    Query(params): Query<BloodGroupParams>,
) -> AppResult<Json<Vec<DonationRequest>>> {
    let blood_group = parse_blood_group_param(params.blood_group.as_deref())?;
    let requests = DonationRequestRepo::list_urgent(&state.pool, blood_group, URGENT_LIMIT).await?;
    Ok(Json(requests))
}

/// PATCH /update-request/{id}
///
/// Full edit of a pending request by its requester or an Admin.
pub async fn update_request(
    State(state): State<AppState>,
    me: ActiveDonor,
    Path(id): Path<DbId>,
    Json(input): Json<DonationRequestForm>,
) -> AppResult<Json<DonationRequest>> {
    let current = find_request(&state, id).await?;
    transition(current.status, RequestAction::Edit, &me.actor(), current.parties())
        .map_err(CoreError::from)?;

    input.validate()?;
    check_location(&state, &input.recipient_district, &input.recipient_upazila)?;

    let update = UpdateDonationRequest {
        recipient_name: input.recipient_name.trim().to_string(),
        recipient_district: input.recipient_district.trim().to_string(),
        recipient_upazila: input.recipient_upazila.trim().to_string(),
        full_address: input.full_address.trim().to_string(),
        hospital_name: input.hospital_name.trim().to_string(),
        blood_group: input.blood_group,
        donation_date: input.donation_date.trim().to_string(),
        donation_time: input.donation_time.trim().to_string(),
        request_message: input.request_message,
        units: input.units,
    };

    let updated = DonationRequestRepo::update_pending(&state.pool, id, &update)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict("Request is no longer pending and cannot be edited".into())
        })?;
    Ok(Json(updated))
}

/// GET /my-request?page=&size=&filter=
///
/// The caller's own requests, newest first, optionally by status.
pub async fn my_requests(
    State(state): State<AppState>,
    CurrentDonor(me): CurrentDonor,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<DonationRequest>>> {
    let status = parse_status_filter(params.filter())?;
    let (limit, offset) = params.window();

    let items =
        DonationRequestRepo::list_for_requester(&state.pool, &me.email, status, limit, offset)
            .await?;
    let total = DonationRequestRepo::count_for_requester(&state.pool, &me.email, status).await?;
    Ok(Json(Page::new(items, total)))
}

/// GET /my-recent-requests
pub async fn my_recent_requests(
    State(state): State<AppState>,
    CurrentDonor(me): CurrentDonor,
) -> AppResult<Json<Vec<DonationRequest>>> {
    let items =
        DonationRequestRepo::list_for_requester(&state.pool, &me.email, None, MY_RECENT_LIMIT, 0)
            .await?;
    Ok(Json(items))
}

/// GET /all-requests?page=&size=&filter=
pub async fn all_requests(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<DonationRequest>>> {
    let status = parse_status_filter(params.filter())?;
    let (limit, offset) = params.window();

    let items = DonationRequestRepo::list_all(&state.pool, status, limit, offset).await?;
    let total = DonationRequestRepo::count_all(&state.pool, status).await?;
    Ok(Json(Page::new(items, total)))
}

/// PATCH /update-donation-status/{id}
///
/// Move a request along the workflow. Accepting stamps the caller as the
/// assigned donor.
pub async fn update_donation_status(
    State(state): State<AppState>,
    me: ActiveDonor,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<Json<DonationRequest>> {
    let current = find_request(&state, id).await?;
    let action = action_for_target(input.status)?;
    let next = transition(current.status, action, &me.actor(), current.parties())
        .map_err(CoreError::from)?;

    let assignment = (action == RequestAction::Accept).then(|| DonorAssignment {
        name: me.0.name.clone(),
        email: me.0.email.clone(),
    });

    let updated = DonationRequestRepo::transition(
        &state.pool,
        id,
        current.status,
        next,
        assignment.as_ref(),
    )
    .await?
    .ok_or_else(|| {
        CoreError::Conflict("Request status changed while you were updating it".into())
    })?;

    tracing::info!(
        request_id = id,
        donor_id = me.0.id,
        from = %current.status,
        to = %updated.status,
        "Donation request status changed"
    );
    Ok(Json(updated))
}

/// DELETE /delete-request/{id}
///
/// Requesters delete their own requests here; Admins use the admin route.
pub async fn delete_own_request(
    State(state): State<AppState>,
    me: CurrentDonor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let request = find_request(&state, id).await?;
    if !same_email(&me.0.email, &request.requester_email) {
        return Err(forbidden("Only the requester may delete this request").into());
    }
    transition(request.status, RequestAction::Delete, &me.actor(), request.parties())
        .map_err(CoreError::from)?;

    delete_request(&state, id).await?;
    tracing::info!(request_id = id, donor_id = me.0.id, "Donation request deleted by requester");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /admin/delete-request/{id}
pub async fn admin_delete_request(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let request = find_request(&state, id).await?;
    let actor = Actor::new(admin.email.clone(), admin.role);
    transition(request.status, RequestAction::Delete, &actor, request.parties())
        .map_err(CoreError::from)?;

    delete_request(&state, id).await?;
    tracing::info!(request_id = id, admin_id = admin.id, "Donation request deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_request(state: &AppState, id: DbId) -> AppResult<DonationRequest> {
    DonationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DonationRequest", id)))
}

async fn delete_request(state: &AppState, id: DbId) -> AppResult<()> {
    if DonationRequestRepo::delete(&state.pool, id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::not_found("DonationRequest", id)))
    }
}
