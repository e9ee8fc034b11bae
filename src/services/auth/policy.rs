/*
 * Responsibility
 * - 認可判定 (ALLOW / DENY) のインターフェースと既定ポリシー
 * - storage は参照しない。識別子の比較だけで決める
 *
 * Notes
 * - DENY は handler 側で NotFound として返す (存在しないアカウントと区別させない)
 */
use crate::services::auth::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// The resource a request targets, as named in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub owner_id: i64,
}

impl ResourceDescriptor {
    pub fn user(id: i64) -> Self {
        Self { owner_id: id }
    }
}

pub trait AccessPolicy: Send + Sync {
    fn decide(&self, principal: &Principal, resource: &ResourceDescriptor) -> Decision;
}

/// Caller must be the owner of the resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOnly;

impl AccessPolicy for OwnerOnly {
    fn decide(&self, principal: &Principal, resource: &ResourceDescriptor) -> Decision {
        authorize(resource.owner_id, principal)
    }
}

pub fn authorize(resource_owner_id: i64, principal: &Principal) -> Decision {
    if principal.id == resource_owner_id {
        Decision::Allow
    } else {
        Decision::Deny
    }
}
