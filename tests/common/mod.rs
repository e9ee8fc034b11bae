#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use task_users::app::build_router;
use task_users::repos::error::{RepoError, RepoResult};
use task_users::repos::{MemoryUserRepo, NewUser, UserChanges, UserRepo, UserRow};
use task_users::services::auth::{
    AccessPolicy, CredentialIssuer, CredentialVerifier, OwnerOnly, SigningKey,
};
use task_users::state::AppState;
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-secret";
pub const ISSUER: &str = "task-users";

pub struct TestApp<R = MemoryUserRepo> {
    pub router: Router,
    pub repo: Arc<R>,
    pub state: AppState,
}

impl TestApp<MemoryUserRepo> {
    pub fn new() -> Self {
        Self::with_policy(Arc::new(OwnerOnly))
    }

    pub fn with_policy(policy: Arc<dyn AccessPolicy>) -> Self {
        Self::build(Arc::new(MemoryUserRepo::new()), policy)
    }
}

impl TestApp<FailingUserRepo> {
    pub fn failing(repo: FailingUserRepo) -> Self {
        Self::build(Arc::new(repo), Arc::new(OwnerOnly))
    }
}

impl<R: UserRepo + 'static> TestApp<R> {
    fn build(repo: Arc<R>, policy: Arc<dyn AccessPolicy>) -> Self {
        let key = SigningKey::from_secret(SECRET);
        let state = AppState::with_policy(
            repo.clone(),
            CredentialIssuer::new(key.clone(), ISSUER, 60),
            CredentialVerifier::new(key, ISSUER, 0),
            policy,
        );
        Self {
            router: build_router(state.clone()),
            repo,
            state,
        }
    }

    /// A valid credential for `id`, without going through signup.
    pub fn credential_for(&self, id: i64) -> String {
        self.state
            .issuer
            .issue(id, "Someone", "someone@example.com")
            .expect("issue")
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(req).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json")
        };
        (status, json)
    }

    /// Create an account and log in; returns (user id, bearer credential).
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> (i64, String) {
        let (status, body) = self
            .send(json_request(
                "POST",
                "/api/v1/users",
                None,
                serde_json::json!({
                    "username": username,
                    "name": username.to_uppercase(),
                    "email": email,
                    "password": password,
                    "phone": "081234567",
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let id = body["userID"].as_i64().expect("userID");

        let (status, body) = self
            .send(json_request(
                "POST",
                "/api/v1/login",
                None,
                serde_json::json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let token = body["token"].as_str().expect("token").to_string();

        (id, token)
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub const DB_ERROR_TEXT: &str = "pool timed out";

/// Every call fails with a database error, except `login` when a row is
/// configured for it.
#[derive(Debug, Default)]
pub struct FailingUserRepo {
    pub login_row: Option<UserRow>,
}

impl FailingUserRepo {
    fn db_error() -> RepoError {
        RepoError::Db(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl UserRepo for FailingUserRepo {
    async fn create(&self, _: NewUser) -> RepoResult<UserRow> {
        Err(Self::db_error())
    }

    async fn get(&self, _: i64) -> RepoResult<UserRow> {
        Err(Self::db_error())
    }

    async fn update(&self, _: i64, _: UserChanges) -> RepoResult<UserRow> {
        Err(Self::db_error())
    }

    async fn delete(&self, _: i64) -> RepoResult<()> {
        Err(Self::db_error())
    }

    async fn login(&self, _: &str, _: &str) -> RepoResult<UserRow> {
        self.login_row.clone().ok_or_else(Self::db_error)
    }
}
