use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::donors;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/donor",
            get(donors::list_donors).post(donors::create_profile),
        )
        .route("/donor/role/{email}", get(donors::role_of))
        .route("/donor/update/{email}", patch(donors::update_profile))
        .route("/update/donor/status", patch(donors::update_status))
        .route("/update/donor/role", patch(donors::update_role))
        .route("/search-donors", get(donors::search_donors))
}
