use jsonwebtoken::Validation;
use thiserror::Error;

use crate::services::auth::Principal;
use crate::services::auth::jwt::{ALGORITHM, CredentialClaims, SigningKey};

// Largest integer an f64 holds exactly.
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

/// Errors returned by credential verification. Any of them means "no principal".
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("missing credential")]
    Missing,
    #[error("credential verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("invalid 'userId' claim (expected a non-negative integer)")]
    InvalidSubject,
}

/// Convert the numeric `userId` claim into an account id.
///
/// Accepts integer encodings and integral float encodings (`7.0`) as long as
/// the float is exactly representable. Anything else fails closed.
fn subject_id(n: &serde_json::Number) -> Option<i64> {
    if let Some(v) = n.as_i64() {
        return (v >= 0).then_some(v);
    }
    if n.is_u64() {
        // positive but wider than i64
        return None;
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && (0.0..=MAX_EXACT_FLOAT_ID).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

/// HS256 credential verifier.
#[derive(Clone)]
pub struct CredentialVerifier {
    key: SigningKey,
    validation: Validation,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("CredentialVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl CredentialVerifier {
    pub fn new(key: SigningKey, issuer: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self { key, validation }
    }

    /// Verify signature, issuer and expiry, then lift the claims into a `Principal`.
    ///
    /// `jsonwebtoken::Validation` checks:
    /// - signature and algorithm
    /// - `exp` (with leeway)
    /// - `iss`
    ///
    /// This method additionally checks that `userId` is a usable account id.
    pub fn verify(&self, token: &str) -> Result<Principal, VerificationError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(VerificationError::Missing);
        }

        let data =
            jsonwebtoken::decode::<CredentialClaims>(token, self.key.decoding(), &self.validation)?;
        let claims = data.claims;

        if claims.iss.trim().is_empty() {
            return Err(VerificationError::EmptyClaim("iss"));
        }

        let id = subject_id(&claims.user_id).ok_or(VerificationError::InvalidSubject)?;

        Ok(Principal {
            id,
            name: claims.name,
            email: claims.email,
        })
    }
}
