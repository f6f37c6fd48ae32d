//! Access-token (JWT) validation.
//!
//! Responsibility:
//! - Verify signature and expiry of bearer tokens (HS256, shared secret)
//! - Extract the subject claim so the caller can resolve an identity
//! - Confirm a token belongs to a specific resolved identity (subject match)
//!
//! The gate calls `extract_subject` first, resolves the identity, then asks
//! `is_valid` whether the token and that identity actually belong together.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::services::identity::Identity;

/// The only claim the application reads. `exp` is enforced by `jsonwebtoken`
/// during decode, so it does not need a field here.
#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    sub: String,
}

/// HS256 access-token validator.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtValidator {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    // Signature + expiry check, then hand back the claims.
    fn decode(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Subject claim of a token that passes signature and expiry checks.
    ///
    /// `None` for anything malformed, forged or expired; the caller treats
    /// that the same as "no token".
    pub fn extract_subject(&self, token: &str) -> Option<String> {
        match self.decode(token) {
            Ok(claims) => Some(claims.sub),
            Err(err) => {
                tracing::debug!(error = ?err, "access token decode failed");
                None
            }
        }
    }

    /// Whether `token` is currently valid for the resolved `identity`:
    /// signature, expiry, and subject match.
    pub fn is_valid(&self, token: &str, identity: &Identity) -> bool {
        self.decode(token)
            .map(|claims| claims.sub == identity.subject)
            .unwrap_or(false)
    }
}
