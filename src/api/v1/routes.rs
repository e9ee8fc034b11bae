/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /users (作成), /login, /users/{user_id} (取得・更新・削除)
 * - 認証は handler の extractor (AuthCtxExtractor) で行う。path id の解析が先
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    login::login,
    users::{create_user, delete_user, get_user, update_user},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/login", post(login))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
