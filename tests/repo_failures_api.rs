mod common;

use axum::http::StatusCode;
use common::{DB_ERROR_TEXT, FailingUserRepo, TestApp, json_request, request};
use serde_json::{Value, json};
use task_users::repos::UserRow;

fn assert_fixed_body(body: &Value, code: &str, message: &str) {
    assert_eq!(body, &json!({ "error": { "code": code, "message": message } }));
    assert!(!body.to_string().contains(DB_ERROR_TEXT), "{body}");
}

#[tokio::test]
async fn create_repo_failure_is_internal() {
    let app = TestApp::failing(FailingUserRepo::default());

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/v1/users",
            None,
            json!({
                "username": "alice",
                "name": "Alice",
                "email": "alice@example.com",
                "password": "hunter22",
                "phone": "081234567",
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_fixed_body(&body, "INTERNAL_SERVER_ERROR", "internal server error");
}

#[tokio::test]
async fn read_db_error_is_not_found() {
    let app = TestApp::failing(FailingUserRepo::default());
    let token = app.credential_for(5);

    let (status, body) = app
        .send(request("GET", "/api/v1/users/5", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_fixed_body(&body, "NOT_FOUND", "data not found");
}

#[tokio::test]
async fn update_db_error_is_internal() {
    let app = TestApp::failing(FailingUserRepo::default());
    let token = app.credential_for(5);

    let (status, body) = app
        .send(json_request(
            "PUT",
            "/api/v1/users/5",
            Some(&token),
            json!({ "name": "Renamed" }),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_fixed_body(&body, "INTERNAL_SERVER_ERROR", "internal server error");
}

#[tokio::test]
async fn delete_db_error_is_internal() {
    let app = TestApp::failing(FailingUserRepo::default());
    let token = app.credential_for(5);

    let (status, body) = app
        .send(request("DELETE", "/api/v1/users/5", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_fixed_body(&body, "INTERNAL_SERVER_ERROR", "internal server error");
}

#[tokio::test]
async fn login_db_error_is_not_found() {
    let app = TestApp::failing(FailingUserRepo::default());

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/v1/login",
            None,
            json!({ "email": "alice@example.com", "password": "hunter22" }),
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_fixed_body(&body, "NOT_FOUND", "data not found");
}

#[tokio::test]
async fn issuance_failure_after_login_is_internal() {
    // a negative id cannot be put into a credential
    let app = TestApp::failing(FailingUserRepo {
        login_row: Some(UserRow {
            id: -1,
            username: "ghost".into(),
            name: "Ghost".into(),
            email: "ghost@example.com".into(),
            phone: "081234567".into(),
            gender: None,
        }),
    });

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/v1/login",
            None,
            json!({ "email": "ghost@example.com", "password": "hunter22" }),
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_fixed_body(&body, "INTERNAL_SERVER_ERROR", "internal server error");
    assert!(body.get("token").is_none());
}
