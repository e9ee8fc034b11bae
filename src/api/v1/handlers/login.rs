/*
 * Responsibility
 * - POST /login
 * - email + password が一致したアカウントに対して毎回新しいクレデンシャルを発行する
 * - 失敗理由 (email が無い / password 違い) は区別せず NotFound
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::login::{LoginRequest, LoginResponse},
        extractors::JsonBody,
    },
    error::AppError,
    repos::error::RepoError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate().map_err(|reason| {
        tracing::warn!(reason, "login: invalid input");
        AppError::InvalidInput
    })?;

    let account = state
        .users
        .login(&req.email, &req.password)
        .await
        .map_err(|e| {
            match &e {
                RepoError::NotFound => tracing::warn!("login: no matching account"),
                RepoError::Conflict | RepoError::Db(_) => {
                    tracing::error!(error = ?e, "user_repo::login failed")
                }
            }
            AppError::NotFound
        })?;

    let token = state
        .issuer
        .issue(account.id, &account.name, &account.email)?;

    tracing::info!(user_id = account.id, "credential issued");
    Ok(Json(LoginResponse { token }))
}
