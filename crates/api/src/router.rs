//! The VitalFlow HTTP application: every route plus the layers wrapped
//! around it. `main` serves this router and the integration tests drive it
//! with `oneshot`.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeFile;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Location files served verbatim for the client's pickers.
const LOCATION_ASSETS: [&str; 2] = ["districts.json", "upazilas.json"];

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resource routes, `/health` and the location files, wrapped in the layer
/// stack. Outermost first, a request passes CORS, gets an `x-request-id`, is
/// traced, has the id copied onto its response, is cut off after
/// `request_timeout_secs` with 408, and turns a handler panic into a 500.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    with_location_assets(Router::new(), config)
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// `GET /districts.json` and `GET /upazilas.json` from `assets_dir`.
fn with_location_assets(router: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    LOCATION_ASSETS.iter().fold(router, |router, name| {
        router.route_service(
            &format!("/{name}"),
            ServeFile::new(config.assets_dir.join(name)),
        )
    })
}

/// CORS for the configured front-end origins, with the methods and headers
/// the client sends. Panics at start-up on an unparseable origin.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
