use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

/// Handler で、 AuthCtx を受け取るための extractor
///
/// `Authorization: Bearer <credential>` を検証して Principal を取り出す。
/// 失敗時は NotFound (401 は返さない。存在確認の手がかりを与えないため)
pub struct AuthCtxExtractor(pub AuthCtx);

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            tracing::warn!("missing bearer credential");
            return Err(AppError::NotFound);
        };

        match state.verifier.verify(token) {
            Ok(principal) => Ok(AuthCtxExtractor(AuthCtx::new(principal))),
            Err(err) => {
                tracing::warn!(error = %err, "credential verification failed");
                Err(AppError::NotFound)
            }
        }
    }
}
