/*
 * Responsibility
 * - JSON body の bind。decode できなければ AppError::UnsupportedInput (415)
 * - 形式チェック (validate) は handler 側で行う
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "request body could not be decoded");
                Err(AppError::UnsupportedInput)
            }
        }
    }
}
