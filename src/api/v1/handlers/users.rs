/*
 * Responsibility
 * - /users 系 CRUD handler
 * - 各 handler は Parsing → Authorizing → Executing → Responding の順に進み、
 *   失敗したところで AppError を返して終わる
 * - Create 以外は AccessPolicy で所有者チェックを行う (DENY は NotFound)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse},
        extractors::{AuthCtx, AuthCtxExtractor, JsonBody, UserIdPath},
    },
    error::AppError,
    repos::error::RepoError,
    services::auth::{Decision, ResourceDescriptor},
    state::AppState,
};

/// Gate: the caller must own the account named in the path.
///
/// DENY is reported as NotFound, the same outcome as a missing account.
fn authorize_owner(state: &AppState, ctx: &AuthCtx, user_id: i64) -> Result<(), AppError> {
    match state
        .policy
        .decide(&ctx.principal, &ResourceDescriptor::user(user_id))
    {
        Decision::Allow => Ok(()),
        Decision::Deny => {
            tracing::warn!(
                principal_id = ctx.user_id(),
                user_id,
                "access to another account denied"
            );
            Err(AppError::NotFound)
        }
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(|reason| {
        tracing::warn!(reason, "create user: invalid input");
        AppError::InvalidInput
    })?;

    let row = state
        .users
        .create(req.into_new_user())
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "user_repo::create failed");
            AppError::Internal
        })?;

    tracing::info!(user_id = row.id, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from_row(row))))
}

pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    authorize_owner(&state, &ctx, user_id)?;

    let row = state.users.get(user_id).await.map_err(|e| {
        match &e {
            RepoError::NotFound => tracing::warn!(user_id, "user_repo::get: not found"),
            RepoError::Conflict | RepoError::Db(_) => {
                tracing::error!(user_id, error = ?e, "user_repo::get failed")
            }
        }
        AppError::NotFound
    })?;

    Ok(Json(UserResponse::from_row(row)))
}

// Extractors run in argument order, and the body extractor has to come last.
// They are taken as `Result`s so the body binding and validation can short-circuit
// before the path id and the credential are looked at.
pub async fn update_user(
    State(state): State<AppState>,
    user_id: Result<UserIdPath, AppError>,
    ctx: Result<AuthCtxExtractor, AppError>,
    body: Result<JsonBody<UpdateUserRequest>, AppError>,
) -> Result<Json<UserResponse>, AppError> {
    let JsonBody(req) = body?;
    req.validate().map_err(|reason| {
        tracing::warn!(reason, "update user: invalid input");
        AppError::InvalidInput
    })?;
    let UserIdPath(user_id) = user_id?;
    let AuthCtxExtractor(ctx) = ctx?;

    authorize_owner(&state, &ctx, user_id)?;

    let row = state
        .users
        .update(user_id, req.into_changes())
        .await
        .map_err(|e| match &e {
            RepoError::NotFound => {
                tracing::warn!(user_id, "user_repo::update: not found");
                AppError::NotFound
            }
            RepoError::Conflict | RepoError::Db(_) => {
                tracing::error!(user_id, error = ?e, "user_repo::update failed");
                AppError::Internal
            }
        })?;

    Ok(Json(UserResponse::with_profile(row)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<MessageResponse>, AppError> {
    authorize_owner(&state, &ctx, user_id)?;

    state.users.delete(user_id).await.map_err(|e| {
        tracing::error!(user_id, error = ?e, "user_repo::delete failed");
        AppError::Internal
    })?;

    tracing::info!(user_id, "user deleted");
    Ok(Json(MessageResponse {
        message: "success delete data",
    }))
}
