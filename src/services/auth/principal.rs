/*
 * Responsibility
 * - 検証済みクレデンシャルから得られる主体 (Principal)
 * - リクエスト 1 回分だけ生きる。生成後は不変
 */

/// Identity carried by a verified credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub name: String,
    pub email: String,
}
