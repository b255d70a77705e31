//! HTTP-level tests for donation requests and their status workflow.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json_auth, request_body,
};
use serde_json::json;
use sqlx::PgPool;
use vitalflow_core::roles::Role;

/// Create a request as `token` and return its id.
async fn create(app: &axum::Router, token: &str, blood_group: &str, date: &str) -> i64 {
    let response = post_json_auth(app.clone(), "/requests", request_body(blood_group, date), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn set_status(app: &axum::Router, id: i64, status: &str, token: &str) -> axum::http::Response<axum::body::Body> {
    patch_json_auth(
        app.clone(),
        &format!("/update-donation-status/{id}"),
        json!({ "status": status }),
        token,
    )
    .await
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_request_starts_pending(pool: PgPool) {
    let token = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/requests", request_body("A-", "2026-11-02"), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["requester_email"], "owner@example.com");
    assert_eq!(json["requester_name"], "owner");
    assert_eq!(json["blood_group"], "A-");
    assert!(json["assigned_donor_email"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blocked_user_cannot_create_request(pool: PgPool) {
    let token = common::seed_donor(&pool, "blocked@example.com", Role::Donor).await;
    common::block(&pool, "blocked@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/requests", request_body("A-", "2026-11-02"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_request_validates_fields(pool: PgPool) {
    let token = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);

    let mut body = request_body("A-", "2026-11-02");
    body["units"] = json!(11);
    let response = post_json_auth(app.clone(), "/requests", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = request_body("A-", "02/11/2026");
    body["units"] = json!(1);
    let response = post_json_auth(app.clone(), "/requests", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = request_body("A-", "2026-11-02");
    body["recipient_upazila"] = json!("Debidwar");
    let response = post_json_auth(app, "/requests", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_then_done(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    let response = set_status(&app, id, "inprogress", &donor).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "inprogress");
    assert_eq!(json["assigned_donor_email"], "donor@example.com");
    assert_eq!(json["assigned_donor_name"], "donor");

    let response = set_status(&app, id, "done", &donor).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "done");

    // Terminal.
    let response = set_status(&app, id, "canceled", &owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_cannot_accept_own_request(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    let response = set_status(&app, id, "inprogress", &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_accept_is_conflict(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let first = common::seed_donor(&pool, "first@example.com", Role::Donor).await;
    let second = common::seed_donor(&pool, "second@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    assert_eq!(set_status(&app, id, "inprogress", &first).await.status(), StatusCode::OK);
    let response = set_status(&app, id, "inprogress", &second).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_target_and_cancel_from_pending_rejected(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    let response = set_status(&app, id, "pending", &owner).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = set_status(&app, id, "canceled", &owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = set_status(&app, id, "finished", &owner).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bystander_cannot_finish_but_volunteer_can(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let bystander = common::seed_donor(&pool, "bystander@example.com", Role::Donor).await;
    let volunteer = common::seed_donor(&pool, "vol@example.com", Role::Volunteer).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;
    set_status(&app, id, "inprogress", &donor).await;

    let response = set_status(&app, id, "done", &bystander).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = set_status(&app, id, "canceled", &volunteer).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "canceled");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_lists_allowed_actions(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    let json = body_json(get_auth(app.clone(), &format!("/requests/{id}"), &owner).await).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["actions"], json!(["view", "edit", "delete"]));

    let json = body_json(get_auth(app.clone(), &format!("/requests/{id}"), &donor).await).await;
    assert_eq!(json["actions"], json!(["view", "accept"]));

    let response = get(app.clone(), &format!("/requests/{id}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/requests/999999", &owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blocked_user_sees_view_only_and_cannot_accept(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let blocked = common::seed_donor(&pool, "blocked@example.com", Role::Donor).await;
    common::block(&pool, "blocked@example.com").await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    let response = get_auth(app.clone(), &format!("/requests/{id}"), &blocked).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["actions"], json!(["view"]));

    let response = set_status(&app, id, "inprogress", &blocked).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app, &format!("/requests/{id}"), &owner).await).await;
    assert_eq!(json["status"], "pending");
    assert!(json["assigned_donor_email"].is_null());
}

// ---------------------------------------------------------------------------
// Edit / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_only_while_pending(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let id = create(&app, &owner, "O+", "2026-11-02").await;

    let mut body = request_body("O+", "2026-11-05");
    body["hospital_name"] = json!("Square Hospital");
    let response = patch_json_auth(app.clone(), &format!("/update-request/{id}"), body.clone(), &owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["hospital_name"], "Square Hospital");
    assert_eq!(json["donation_date"], "2026-11-05");

    // Someone else's request.
    let response = patch_json_auth(app.clone(), &format!("/update-request/{id}"), body.clone(), &donor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    set_status(&app, id, "inprogress", &donor).await;
    let response = patch_json_auth(app, &format!("/update-request/{id}"), body, &owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_own_and_admin_delete(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let other = common::seed_donor(&pool, "other@example.com", Role::Donor).await;
    let admin = common::seed_donor(&pool, "admin@example.com", Role::Admin).await;
    let app = common::build_test_app(pool);
    let first = create(&app, &owner, "O+", "2026-11-02").await;
    let second = create(&app, &owner, "B+", "2026-11-03").await;

    let response = delete_auth(app.clone(), &format!("/delete-request/{first}"), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &format!("/delete-request/{first}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), &format!("/admin/delete-request/{second}"), &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &format!("/admin/delete-request/{second}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/admin/delete-request/{second}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_allowed_in_any_status_for_owner_and_admin(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let volunteer = common::seed_donor(&pool, "vol@example.com", Role::Volunteer).await;
    let admin = common::seed_donor(&pool, "admin@example.com", Role::Admin).await;
    let app = common::build_test_app(pool);
    let first = create(&app, &owner, "O+", "2026-11-02").await;
    let second = create(&app, &owner, "B+", "2026-11-03").await;
    set_status(&app, first, "inprogress", &donor).await;
    set_status(&app, second, "inprogress", &donor).await;

    // The assigned donor is not the requester.
    let response = delete_auth(app.clone(), &format!("/delete-request/{first}"), &donor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Staff without the Admin role use neither route.
    let response = delete_auth(app.clone(), &format!("/admin/delete-request/{first}"), &volunteer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admins use their own route, not the requester's.
    let response = delete_auth(app.clone(), &format!("/delete-request/{first}"), &admin).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &format!("/delete-request/{first}"), &owner).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/admin/delete-request/{second}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_my_requests_paginates_and_filters(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let mut ids = Vec::new();
    for day in 1..=5 {
        ids.push(create(&app, &owner, "O+", &format!("2026-11-0{day}")).await);
    }
    create(&app, &donor, "O+", "2026-11-09").await;
    set_status(&app, ids[0], "inprogress", &donor).await;

    let json = body_json(get_auth(app.clone(), "/my-request?page=1&size=2", &owner).await).await;
    assert_eq!(json["totalCount"], 5);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);

    let json = body_json(get_auth(app.clone(), "/my-request?filter=inprogress", &owner).await).await;
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["items"][0]["id"], ids[0]);

    let json = body_json(get_auth(app.clone(), "/my-request?filter=all", &owner).await).await;
    assert_eq!(json["totalCount"], 5);

    let json = body_json(get_auth(app, "/my-recent-requests", &owner).await).await;
    let recent: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(recent, vec![ids[4], ids[3], ids[2]]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_requests_requires_staff(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let volunteer = common::seed_donor(&pool, "vol@example.com", Role::Volunteer).await;
    let app = common::build_test_app(pool);
    create(&app, &owner, "O+", "2026-11-02").await;
    create(&app, &owner, "A+", "2026-11-03").await;

    let response = get_auth(app.clone(), "/all-requests", &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app, "/all-requests?filter=pending", &volunteer).await).await;
    assert_eq!(json["totalCount"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_recent_and_urgent_lists(pool: PgPool) {
    let owner = common::seed_donor(&pool, "owner@example.com", Role::Donor).await;
    let donor = common::seed_donor(&pool, "donor@example.com", Role::Donor).await;
    let app = common::build_test_app(pool);
    let late = create(&app, &owner, "A+", "2026-12-20").await;
    let soon = create(&app, &owner, "A+", "2026-11-01").await;
    let other_group = create(&app, &owner, "B-", "2026-10-30").await;
    let taken = create(&app, &owner, "A+", "2026-10-20").await;
    set_status(&app, taken, "inprogress", &donor).await;

    let json = body_json(get(app.clone(), "/requests?limit=2").await).await;
    let recent: Vec<i64> = json.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(recent, vec![other_group, soon]);

    let json = body_json(get(app.clone(), "/urgent-requests?bloodGroup=A%2B").await).await;
    let urgent: Vec<i64> = json.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(urgent, vec![soon, late]);

    let json = body_json(get(app, "/urgent-requests").await).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}
