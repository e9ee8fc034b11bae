/*
 * Responsibility
 * - v1 handler が使う extractor の公開
 * - rejection は全て AppError (状態遷移の早期終了をそのまま返す)
 */
pub mod auth_ctx;
pub mod json_body;
pub mod user_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::JsonBody;
pub use user_id::UserIdPath;
