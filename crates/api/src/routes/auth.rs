//! Route definitions for the `/auth` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register  -> register
/// POST   /login     -> login
/// DELETE /account   -> delete_account (requires auth)
/// GET    /me        -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/account", delete(auth::delete_account))
        .route("/me", get(auth::me))
}
