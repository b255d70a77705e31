//! Profile-backed access control extractors.
//!
//! Each extractor resolves the bearer's donor profile and rejects requests
//! whose role or status does not meet the requirement. Role and status are
//! read from the database on every request, never from the token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitalflow_core::error::CoreError;
use vitalflow_core::workflow::Actor;
use vitalflow_db::models::donor::Donor;
use vitalflow_db::repositories::DonorRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn load_profile(parts: &mut Parts, state: &AppState) -> Result<Donor, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    DonorRepo::find_by_email(&state.pool, &user.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No donor profile exists for this account".into(),
            ))
        })
}

fn require_active(donor: &Donor) -> Result<(), AppError> {
    if donor.status.is_active() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Your account is blocked".into(),
        )))
    }
}

/// Any authenticated user with a donor profile, blocked or not.
///
/// ```ignore
/// async fn mine(CurrentDonor(me): CurrentDonor) -> AppResult<Json<Donor>> {
///     Ok(Json(me))
/// }
/// ```
pub struct CurrentDonor(pub Donor);

impl CurrentDonor {
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.email.clone(), self.0.role)
    }
}

impl FromRequestParts<AppState> for CurrentDonor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentDonor(load_profile(parts, state).await?))
    }
}

/// An `Active` profile of any role. Blocked users get 403.
pub struct ActiveDonor(pub Donor);

impl ActiveDonor {
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.email.clone(), self.0.role)
    }
}

impl FromRequestParts<AppState> for ActiveDonor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let donor = load_profile(parts, state).await?;
        require_active(&donor)?;
        Ok(ActiveDonor(donor))
    }
}

/// Requires an active `Volunteer` or `Admin`. Rejects with 403 otherwise.
pub struct RequireStaff(pub Donor);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let donor = load_profile(parts, state).await?;
        require_active(&donor)?;
        if !donor.role.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Volunteer or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(donor))
    }
}

/// Requires an active `Admin`. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Donor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let donor = load_profile(parts, state).await?;
        require_active(&donor)?;
        if !donor.role.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(donor))
    }
}
