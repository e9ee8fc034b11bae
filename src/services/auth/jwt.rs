use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;

pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

/// HS256 key material, loaded once at startup and handed to both the issuer
/// and the verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// Claims carried by an access credential.
///
/// `userId` is a JSON number, never a string. Decoders on the other side may
/// hand it back as a float, so the verifier accepts integral float encodings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialClaims {
    pub iss: String,
    #[serde(rename = "userId")]
    pub user_id: serde_json::Number,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Error)]
pub enum IssuanceError {
    #[error("subject id must be non-negative, got {0}")]
    InvalidSubject(i64),
    #[error("credential lifetime of {0}s does not fit the clock")]
    InvalidLifetime(u64),
    #[error("failed to sign credential: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl From<IssuanceError> for AppError {
    fn from(_: IssuanceError) -> Self {
        AppError::Internal
    }
}

#[derive(Clone)]
pub struct CredentialIssuer {
    key: SigningKey,
    issuer: String,
    ttl_seconds: u64,
}

impl std::fmt::Debug for CredentialIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl CredentialIssuer {
    pub fn new(key: SigningKey, issuer: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            key,
            issuer: issuer.into(),
            ttl_seconds,
        }
    }

    /// Issue a fresh credential for an authenticated account.
    ///
    /// Every call gets its own `jti`, so two credentials for the same account
    /// never collide even when issued within the same second.
    pub fn issue(&self, id: i64, name: &str, email: &str) -> Result<String, IssuanceError> {
        if id < 0 {
            return Err(IssuanceError::InvalidSubject(id));
        }

        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or(IssuanceError::InvalidLifetime(self.ttl_seconds))?;

        let claims = CredentialClaims {
            iss: self.issuer.clone(),
            user_id: serde_json::Number::from(id),
            name: name.to_string(),
            email: email.to_string(),
            iat: now,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    pub(crate) fn sign<T: Serialize>(&self, claims: &T) -> Result<String, IssuanceError> {
        let mut header = Header::new(ALGORITHM);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, self.key.encoding()).map_err(|e| {
            error!(error = %e, "failed to sign credential");
            IssuanceError::Signing(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> CredentialIssuer {
        CredentialIssuer::new(SigningKey::from_secret(b"test-secret"), "task-users", 60)
    }

    #[test]
    fn two_issuances_are_distinct() {
        let issuer = issuer();
        let a = issuer.issue(7, "A", "a@x.com").unwrap();
        let b = issuer.issue(7, "A", "a@x.com").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn negative_subject_is_rejected() {
        assert!(matches!(
            issuer().issue(-1, "A", "a@x.com"),
            Err(IssuanceError::InvalidSubject(-1))
        ));
    }

    #[test]
    fn lifetime_past_the_clock_is_an_issuance_error() {
        let issuer =
            CredentialIssuer::new(SigningKey::from_secret(b"test-secret"), "task-users", u64::MAX);
        assert!(matches!(
            issuer.issue(1, "A", "a@x.com"),
            Err(IssuanceError::InvalidLifetime(u64::MAX))
        ));

        let issuer = CredentialIssuer::new(
            SigningKey::from_secret(b"test-secret"),
            "task-users",
            i64::MAX as u64,
        );
        assert!(matches!(
            issuer.issue(1, "A", "a@x.com"),
            Err(IssuanceError::InvalidLifetime(_))
        ));
    }

    #[test]
    fn user_id_is_encoded_as_a_number() {
        let token = issuer().issue(42, "A", "a@x.com").unwrap();
        let mut validation = jsonwebtoken::Validation::new(ALGORITHM);
        validation.set_issuer(&["task-users"]);
        let data = jsonwebtoken::decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap();
        assert!(data.claims["userId"].is_number());
        assert_eq!(data.claims["userId"].as_i64(), Some(42));
        assert_eq!(data.claims["name"], "A");
        assert_eq!(data.claims["email"], "a@x.com");
    }
}
