/// Factory: build the credential issuer/verifier pair from application `Config`.
///
/// Both sides share the same key material; it is read once here and passed in
/// explicitly.
use crate::config::Config;
use crate::services::auth::{CredentialIssuer, CredentialVerifier, SigningKey};

pub fn build_credential_services(config: &Config) -> (CredentialIssuer, CredentialVerifier) {
    let key = SigningKey::from_secret(config.jwt_secret.as_bytes());

    let issuer = CredentialIssuer::new(
        key.clone(),
        config.auth_issuer.clone(),
        config.access_token_ttl_seconds,
    );
    let verifier =
        CredentialVerifier::new(key, &config.auth_issuer, config.access_token_leeway_seconds);

    (issuer, verifier)
}
