/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserRepo, issuer/verifier: クレデンシャル, policy: 認可ポリシー
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::UserRepo;
use crate::services::auth::{AccessPolicy, CredentialIssuer, CredentialVerifier, OwnerOnly};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub issuer: Arc<CredentialIssuer>,
    pub verifier: Arc<CredentialVerifier>,
    pub policy: Arc<dyn AccessPolicy>,
}

impl AppState {
    /// State with the default owner-only policy.
    pub fn new(
        users: Arc<dyn UserRepo>,
        issuer: CredentialIssuer,
        verifier: CredentialVerifier,
    ) -> Self {
        Self::with_policy(users, issuer, verifier, Arc::new(OwnerOnly))
    }

    pub fn with_policy(
        users: Arc<dyn UserRepo>,
        issuer: CredentialIssuer,
        verifier: CredentialVerifier,
        policy: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            users,
            issuer: Arc::new(issuer),
            verifier: Arc::new(verifier),
            policy,
        }
    }
}
