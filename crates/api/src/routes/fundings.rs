use axum::routing::get;
use axum::Router;

use crate::handlers::{fundings, stats};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/fundings",
            get(fundings::list_fundings).post(fundings::record_funding),
        )
        .route("/total-funding", get(fundings::total_funding))
        .route("/admin-stats", get(stats::admin_stats))
}
