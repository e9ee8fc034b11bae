/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - extractor が検証して生成し、handler はこの型だけを受け取る
 *
 * Notes
 * - 署名検証は services::auth::CredentialVerifier の責務
 * - 認可 (所有者チェック) は handler が AccessPolicy で行う
 */
use crate::services::auth::Principal;

/// 認証済みのリクエストに付与されるコンテキスト
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
}

impl AuthCtx {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn user_id(&self) -> i64 {
        self.principal.id
    }
}
