use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/requests",
            get(requests::list_recent).post(requests::create_request),
        )
        .route("/requests/{id}", get(requests::get_request))
        .route("/urgent-requests", get(requests::list_urgent))
        .route("/update-request/{id}", patch(requests::update_request))
        .route(
            "/update-donation-status/{id}",
            patch(requests::update_donation_status),
        )
        .route("/my-request", get(requests::my_requests))
        .route("/my-recent-requests", get(requests::my_recent_requests))
        .route("/all-requests", get(requests::all_requests))
        .route("/delete-request/{id}", delete(requests::delete_own_request))
        .route(
            "/admin/delete-request/{id}",
            delete(requests::admin_delete_request),
        )
}
