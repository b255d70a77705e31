//! Handlers for the `/auth` resource (register, login, account deletion, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vitalflow_core::error::{CoreError, CredentialError};
use vitalflow_core::forms::{AccountForm, LoginForm};
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_core::validation::normalize_email;
use vitalflow_db::models::account::{AccountResponse, CreateAccount};
use vitalflow_db::repositories::{AccountRepo, DonorRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: AccountResponse,
}

/// `GET /auth/me`: the account plus its profile's role and status.
///
/// `role` and `status` are `null` until the donor profile is created.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: AccountResponse,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create an identity account and sign it in. The donor profile is created
/// separately via `POST /donor`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<AccountForm>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    let email = normalize_email(&input.email);

    if AccountRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CredentialError::EmailInUse.into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            email,
            password_hash,
            display_name: input.name.trim().to_string(),
            photo_url: input.photo_url,
        },
    )
    .await?;

    tracing::info!(account_id = account.id, "Account registered");

    let response = issue(&state, &account)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login
///
/// Authenticate with email + password. Unknown emails and wrong passwords are
/// reported separately (`USER_NOT_FOUND` / `WRONG_PASSWORD`).
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginForm>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;
    let email = normalize_email(&input.email);

    let account = AccountRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or(CredentialError::UserNotFound)?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(account_id = account.id, "Rejected login: wrong password");
        return Err(CredentialError::WrongPassword.into());
    }

    AccountRepo::record_login(&state.pool, account.id).await?;
    tracing::info!(account_id = account.id, "Account signed in");

    Ok(Json(issue(&state, &account)?))
}

/// DELETE /auth/account
///
/// Delete the caller's identity account. Only allowed while no donor profile
/// exists; this is the rollback step of an interrupted registration.
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<StatusCode> {
    if DonorRepo::find_by_email(&state.pool, &user.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Account has a donor profile and cannot be deleted".into(),
        )));
    }

    if AccountRepo::delete(&state.pool, user.account_id).await? {
        tracing::info!(account_id = user.account_id, "Account deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(
            "Account",
            user.account_id,
        )))
    }
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<MeResponse>> {
    let account = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))?;
    let profile = DonorRepo::find_by_email(&state.pool, &account.email).await?;

    Ok(Json(MeResponse {
        user: AccountResponse::from(&account),
        role: profile.as_ref().map(|p| p.role),
        status: profile.as_ref().map(|p| p.status),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issue(
    state: &AppState,
    account: &vitalflow_db::models::account::Account,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(account.id, &account.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in(),
        user: AccountResponse::from(account),
    })
}
