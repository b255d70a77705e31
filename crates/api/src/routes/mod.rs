pub mod auth;
pub mod donors;
pub mod fundings;
pub mod health;
pub mod requests;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree. Paths are mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/account                          delete own account (bearer)
/// /auth/me                               current account + role/status (bearer)
///
/// /donor                                 create profile (bearer), list (staff)
/// /donor/role/{email}                    role + status (self or staff)
/// /donor/update/{email}                  profile edit (self or admin)
/// /update/donor/status                   block / unblock (admin)
/// /update/donor/role                     promote / demote (admin)
/// /search-donors                         public donor search
///
/// /requests                              recent pending (public), create (active)
/// /requests/{id}                         detail + allowed actions (bearer)
/// /urgent-requests                       pending by date (public)
/// /update-request/{id}                   edit pending (owner or admin)
/// /update-donation-status/{id}           workflow transition (active)
/// /my-request                            own requests, paged (bearer)
/// /my-recent-requests                    own 3 newest (bearer)
/// /all-requests                          all requests, paged (staff)
/// /delete-request/{id}                   delete own (owner)
/// /admin/delete-request/{id}             delete any (admin)
///
/// /fundings                              record (bearer), list (bearer)
/// /total-funding                         sum (public)
/// /admin-stats                           dashboard counters (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(donors::router())
        .merge(requests::router())
        .merge(fundings::router())
}
