//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use vitalflow_api::error::AppError;
use vitalflow_core::error::{CoreError, CredentialError};
use vitalflow_core::request_status::RequestStatus;
use vitalflow_core::workflow::{RequestAction, TransitionError};

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("DonationRequest", 42));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "DonationRequest 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Units must be between 1 and 10".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Units must be between 1 and 10");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("bad page".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn forbidden_and_unauthorized_codes() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("blocked".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn credential_errors_keep_their_codes() {
    let cases = [
        (CredentialError::UserNotFound, StatusCode::UNAUTHORIZED, "USER_NOT_FOUND"),
        (CredentialError::WrongPassword, StatusCode::UNAUTHORIZED, "WRONG_PASSWORD"),
        (CredentialError::InvalidEmail, StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
        (CredentialError::EmailInUse, StatusCode::CONFLICT, "EMAIL_IN_USE"),
    ];
    for (err, expected_status, expected_code) in cases {
        let (status, json) = error_to_response(AppError::from(err)).await;
        assert_eq!(status, expected_status, "{expected_code}");
        assert_eq!(json["code"], expected_code);
    }
}

#[tokio::test]
async fn workflow_rejections_map_to_conflict_or_forbidden() {
    let terminal = CoreError::from(TransitionError::Terminal(RequestStatus::Done));
    let (status, json) = error_to_response(AppError::Core(terminal)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let not_party = CoreError::from(TransitionError::NotAParty(RequestAction::Cancel));
    let (status, _) = error_to_response(AppError::Core(not_party)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::InternalError("connection string leaked".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
