/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / 認証失敗 / 入力エラーを統一的に変換
 *
 * Notes
 * - 認証失敗と認可 DENY は NotFound に畳み込む (他人のアカウントの存在を漏らさない)
 * - message は固定文言のみ。内部のエラー内容はログにだけ出す
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("unsupported input")]
    UnsupportedInput,
    #[error("invalid input")]
    InvalidInput,
    #[error("invalid id")]
    InvalidId,
    #[error("not found")]
    NotFound,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedInput => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::InvalidInput | AppError::InvalidId => StatusCode::NOT_ACCEPTABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (code, message) = match self {
            AppError::UnsupportedInput => ("UNSUPPORTED_INPUT", "could not read request body"),
            AppError::InvalidInput => ("INVALID_INPUT", "request body failed validation"),
            AppError::InvalidId => ("INVALID_ID", "id must be a non-negative integer"),
            AppError::NotFound => ("NOT_FOUND", "data not found"),
            AppError::Internal => ("INTERNAL_SERVER_ERROR", "internal server error"),
        };
        ErrorBody { code, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.body() };

        (self.status(), Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Conflict | RepoError::Db(_) => AppError::Internal,
        }
    }
}
