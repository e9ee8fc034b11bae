/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 認証は middleware ではなく extractor 側 (api::v1::extractors::auth_ctx)
 */
pub mod cors;
pub mod http;
