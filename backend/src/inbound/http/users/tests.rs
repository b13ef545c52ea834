//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::domain::ports::{MockExerciseLog, MockUserRegistry};
use crate::inbound::http::test_utils::{in_memory_state, test_app};

async fn post_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> (StatusCode, Value) {
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn registered_user_is_listed() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (status, created) = post_user(&app, json!({"username": "ada"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["username"], "ada");
    let id = created["id"].as_str().expect("id string");
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let listed: Vec<UserResponse> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(
        listed,
        vec![UserResponse {
            username: "ada".to_owned(),
            id: id.to_owned(),
        }]
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_username_is_rejected() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (first, _) = post_user(&app, json!({"username": "ada"})).await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = post_user(&app, json!({"username": "ada"})).await;
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "username already registered");
}

#[rstest]
#[case(json!({}))]
#[case(json!({"username": ""}))]
#[case(json!({"username": "   "}))]
#[actix_web::test]
async fn missing_username_is_rejected(#[case] body: Value) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (status, body) = post_user(&app, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "username is mandatory");
    assert_eq!(body["details"]["field"], "username");
}

#[rstest]
#[actix_web::test]
async fn bodiless_registration_reports_missing_username() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "username is mandatory");
}

#[rstest]
#[actix_web::test]
async fn form_encoded_registration_is_accepted() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_form([("username", "grace")])
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: UserResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.username, "grace");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn store_failures_are_redacted() {
    let mut users = MockUserRegistry::new();
    users
        .expect_list_users()
        .times(1)
        .return_once(|| Err(Error::internal("user store error: relation missing")));
    let state = HttpState::new(Arc::new(users), Arc::new(MockExerciseLog::new()));
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}
