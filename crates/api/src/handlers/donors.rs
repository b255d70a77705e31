//! Handlers for donor profiles: creation, self-service edits, the admin user
//! table, and the public donor search.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::error::CoreError;
use vitalflow_core::forms::{ProfileForm, ProfileUpdateForm};
use vitalflow_core::pagination::Page;
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_core::validation::normalize_email;
use vitalflow_db::models::donor::{CreateDonor, Donor, DonorSearch, UpdateDonor};
use vitalflow_db::repositories::{AccountRepo, DonorRepo};

use super::{check_location, forbidden, same_email};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{CurrentDonor, RequireAdmin, RequireStaff};
use crate::query::{non_blank, parse_blood_group_param, DonorSearchParams, ListParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// `GET /donor/role/{email}` response.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: Role,
    pub status: AccountStatus,
}

/// Body of `PATCH /update/donor/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub email: String,
    pub status: AccountStatus,
}

/// Body of `PATCH /update/donor/role`.
#[derive(Debug, Deserialize)]
pub struct RoleChange {
    pub email: String,
    pub role: Role,
}

/// Donor card shown on the public search page. Role and status stay private.
#[derive(Debug, Serialize)]
pub struct PublicDonor {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub blood_group: BloodGroup,
    pub district: String,
    pub upazila: String,
}

impl From<Donor> for PublicDonor {
    fn from(d: Donor) -> Self {
        Self {
            name: d.name,
            email: d.email,
            avatar_url: d.avatar_url,
            blood_group: d.blood_group,
            district: d.district,
            upazila: d.upazila,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /donor
///
/// Create the caller's donor profile. New profiles are always `Donor` /
/// `Active`; the email comes from the token, not the body.
pub async fn create_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ProfileForm>,
) -> AppResult<(StatusCode, Json<Donor>)> {
    input.validate()?;
    check_location(&state, &input.district, &input.upazila)?;

    let donor = DonorRepo::create(
        &state.pool,
        &CreateDonor {
            email: user.email.clone(),
            name: input.name.trim().to_string(),
            avatar_url: input.avatar_url,
            blood_group: input.blood_group,
            district: input.district.trim().to_string(),
            upazila: input.upazila.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(donor_id = donor.id, "Donor profile created");
    Ok((StatusCode::CREATED, Json(donor)))
}

/// GET /donor?page=&size=&filter=Active|Blocked
pub async fn list_donors(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Donor>>> {
    let status = match params.filter().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<AccountStatus>()?),
    };
    let (limit, offset) = params.window();

    let items = DonorRepo::list(&state.pool, status, limit, offset).await?;
    let total = DonorRepo::count(&state.pool, status).await?;
    Ok(Json(Page::new(items, total)))
}

/// GET /donor/role/{email}
///
/// Users may look up their own role; staff may look up anyone's. An account
/// that has not created its profile yet gets 404 for its own email.
pub async fn role_of(
    State(state): State<AppState>,
    user: AuthUser,
    Path(email): Path<String>,
) -> AppResult<Json<RoleResponse>> {
    let email = normalize_email(&email);
    if !same_email(&user.email, &email) {
        let caller = DonorRepo::find_by_email(&state.pool, &user.email).await?;
        if !caller.is_some_and(|me| me.role.is_staff()) {
            return Err(forbidden("You may only look up your own role").into());
        }
    }

    let donor = find_donor(&state, &email).await?;
    Ok(Json(RoleResponse {
        role: donor.role,
        status: donor.status,
    }))
}

/// PATCH /donor/update/{email}
///
/// Partial profile edit by the owner or an Admin. Name and avatar changes are
/// mirrored onto the identity account.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentDonor(me): CurrentDonor,
    Path(email): Path<String>,
    Json(input): Json<ProfileUpdateForm>,
) -> AppResult<Json<Donor>> {
    let email = normalize_email(&email);
    if !same_email(&me.email, &email) && !me.role.is_admin() {
        return Err(forbidden("You may only edit your own profile").into());
    }

    input.validate()?;
    if let (Some(district), Some(upazila)) = (&input.district, &input.upazila) {
        check_location(&state, district, upazila)?;
    }

    let update = UpdateDonor {
        name: input.name.map(|n| n.trim().to_string()),
        avatar_url: input.avatar_url,
        blood_group: input.blood_group,
        district: input.district.map(|d| d.trim().to_string()),
        upazila: input.upazila.map(|u| u.trim().to_string()),
    };

    let donor = DonorRepo::update(&state.pool, &email, &update)
        .await?
        .ok_or_else(|| CoreError::not_found("Donor", &email))?;

    AccountRepo::update_identity(
        &state.pool,
        &email,
        update.name.as_deref(),
        update.avatar_url.as_deref(),
    )
    .await?;

    Ok(Json(donor))
}

/// PATCH /update/donor/status
///
/// Block or unblock a user. Admins cannot block themselves.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<StatusChange>,
) -> AppResult<Json<Donor>> {
    let email = normalize_email(&input.email);
    if same_email(&admin.email, &email) && input.status == AccountStatus::Blocked {
        return Err(forbidden("You cannot block your own account").into());
    }

    let donor = DonorRepo::set_status(&state.pool, &email, input.status)
        .await?
        .ok_or_else(|| CoreError::not_found("Donor", &email))?;

    tracing::info!(
        admin_id = admin.id,
        donor_id = donor.id,
        status = %donor.status,
        "Donor status changed"
    );
    Ok(Json(donor))
}

/// PATCH /update/donor/role
///
/// Promote or demote a user. Admins cannot demote themselves.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<RoleChange>,
) -> AppResult<Json<Donor>> {
    let email = normalize_email(&input.email);
    if same_email(&admin.email, &email) && input.role != Role::Admin {
        return Err(forbidden("You cannot demote your own account").into());
    }

    let donor = DonorRepo::set_role(&state.pool, &email, input.role)
        .await?
        .ok_or_else(|| CoreError::not_found("Donor", &email))?;

    tracing::info!(
        admin_id = admin.id,
        donor_id = donor.id,
        role = %donor.role,
        "Donor role changed"
    );
    Ok(Json(donor))
}

/// GET /search-donors?bloodGroup=&district=&upazila=
///
/// Public. Only `Active` donors are returned; blank filters match everything.
pub async fn search_donors(
    State(state): State<AppState>,
    Query(params): Query<DonorSearchParams>,
) -> AppResult<Json<Vec<PublicDonor>>> {
    let filter = DonorSearch {
        blood_group: parse_blood_group_param(params.blood_group.as_deref())?,
        district: non_blank(params.district),
        upazila: non_blank(params.upazila),
    };

    let donors = DonorRepo::search(&state.pool, &filter).await?;
    Ok(Json(donors.into_iter().map(PublicDonor::from).collect()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_donor(state: &AppState, email: &str) -> AppResult<Donor> {
    DonorRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Donor", email)))
}
