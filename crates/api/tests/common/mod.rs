#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vitalflow_api::auth::jwt::{generate_access_token, JwtConfig};
use vitalflow_api::auth::password::hash_password;
use vitalflow_api::config::ServerConfig;
use vitalflow_api::router::build_app_router;
use vitalflow_api::state::AppState;
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::location::LocationDirectory;
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_db::models::account::CreateAccount;
use vitalflow_db::models::donor::CreateDonor;
use vitalflow_db::repositories::{AccountRepo, DonorRepo};

/// Password used for every seeded account.
pub const TEST_PASSWORD: &str = "Donate1Blood";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        assets_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets")),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        },
    }
}

/// A small directory: Dhaka (Savar, Dhamrai) and Comilla (Debidwar).
pub fn test_locations() -> LocationDirectory {
    LocationDirectory::from_json(
        r#"[{"id":"1","division_id":"1","name":"Comilla"},
            {"id":"47","division_id":"6","name":"Dhaka"}]"#,
        r#"[{"id":"1","district_id":"1","name":"Debidwar"},
            {"id":"300","district_id":"47","name":"Savar"},
            {"id":"301","district_id":"47","name":"Dhamrai"}]"#,
    )
    .expect("test locations parse")
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        locations: Some(Arc::new(test_locations())),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Create an account and its donor profile with the given role; returns a
/// bearer token for it.
pub async fn seed_donor(pool: &PgPool, email: &str, role: Role) -> String {
    seed_donor_with(pool, email, role, BloodGroup::OPos, "Dhaka", "Savar").await
}

pub async fn seed_donor_with(
    pool: &PgPool,
    email: &str,
    role: Role,
    blood_group: BloodGroup,
    district: &str,
    upazila: &str,
) -> String {
    let token = seed_account(pool, email).await;
    let name = email.split('@').next().unwrap_or("donor").to_string();
    DonorRepo::create(
        pool,
        &CreateDonor {
            email: email.to_string(),
            name,
            avatar_url: None,
            blood_group,
            district: district.to_string(),
            upazila: upazila.to_string(),
        },
    )
    .await
    .expect("donor creation should succeed");
    if role != Role::Donor {
        DonorRepo::set_role(pool, email, role)
            .await
            .expect("role update should succeed");
    }
    token
}

/// Create an account without a donor profile; returns a bearer token for it.
pub async fn seed_account(pool: &PgPool, email: &str) -> String {
    let account = AccountRepo::create(
        pool,
        &CreateAccount {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            display_name: email.to_string(),
            photo_url: None,
        },
    )
    .await
    .expect("account creation should succeed");
    generate_access_token(account.id, &account.email, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn block(pool: &PgPool, email: &str) {
    DonorRepo::set_status(pool, email, AccountStatus::Blocked)
        .await
        .expect("status update should succeed");
}

/// A valid request body for `POST /requests`.
pub fn request_body(blood_group: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "recipient_name": "Karim",
        "recipient_district": "Dhaka",
        "recipient_upazila": "Savar",
        "full_address": "12 Lake Road",
        "hospital_name": "Enam Medical",
        "blood_group": blood_group,
        "donation_date": date,
        "donation_time": "10:30",
        "request_message": "Surgery tomorrow",
        "units": 2
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
