//! HTTP-level tests for fundings and the staff dashboard counters.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, request_body};
use serde_json::json;
use sqlx::PgPool;
use vitalflow_core::roles::Role;

fn funding(amount_cents: i64, transaction_id: &str) -> serde_json::Value {
    json!({ "amount_cents": amount_cents, "transaction_id": transaction_id })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_funding_and_total(pool: PgPool) {
    let token = common::seed_donor(&pool, "giver@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/total-funding").await).await;
    assert_eq!(json["total"], 0);

    let response = post_json_auth(app.clone(), "/fundings", funding(2_500, "pi_001"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["donor_email"], "giver@example.com");
    assert_eq!(json["currency"], "usd");

    post_json_auth(app.clone(), "/fundings", funding(1_000, "pi_002"), &token).await;

    let json = body_json(get(app.clone(), "/total-funding").await).await;
    assert_eq!(json["total"], 3_500);

    let json = body_json(get_auth(app, "/fundings?page=0&size=1", &token).await).await;
    assert_eq!(json["totalCount"], 2);
    assert_eq!(json["items"][0]["transaction_id"], "pi_002");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_transaction_is_conflict(pool: PgPool) {
    let token = common::seed_donor(&pool, "giver@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/fundings", funding(500, "pi_dup"), &token).await;
    let response = post_json_auth(app, "/fundings", funding(500, "pi_dup"), &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_positive_amount_rejected(pool: PgPool) {
    let token = common::seed_donor(&pool, "giver@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app.clone(), "/fundings", funding(0, "pi_zero"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(app, "/fundings", funding(100, "  "), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_stats_for_staff_only(pool: PgPool) {
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let admin = common::seed_donor(&pool, "admin@example.com", Role::Admin).await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/requests", request_body("O+", "2026-11-02"), &donor).await;
    post_json_auth(app.clone(), "/fundings", funding(1_200, "pi_stats"), &donor).await;

    let response = get_auth(app.clone(), "/admin-stats", &donor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/admin-stats", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_donors"], 2);
    assert_eq!(json["total_requests"], 1);
    assert_eq!(json["total_funding"], 1_200);
}
