/*
 * Responsibility
 * - Path の {user_id} を内部 ID (i64, 非負) として受け取る
 * - 失敗時は AppError::InvalidId (認可失敗とは別の結果)
 * - 認証より先に評価される (handler 引数の順序で保証)
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdPath(pub i64);

pub(crate) fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<u64>()
        .ok()
        .and_then(|n| i64::try_from(n).ok())
        .ok_or(AppError::InvalidId)
}

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidId)?;

        parse_user_id(&raw)
            .map(Self)
            .inspect_err(|_| tracing::warn!(id = %raw, "path id is not a non-negative integer"))
    }
}
