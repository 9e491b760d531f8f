use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use thiserror::Error;

use crate::SessionClaims;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The embedded expiry claim has lapsed (signature was otherwise valid).
    #[error("token has expired")]
    Expired,

    /// Anything else: bad signature, malformed payload, wrong algorithm.
    #[error("invalid token")]
    Invalid,
}

/// Signing/verification seam for session tokens.
///
/// The API layer holds this as a trait object so tests can substitute a
/// codec with a different secret or a failing one.
pub trait TokenCodec: Send + Sync {
    fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError>;
    fn decode(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

/// HS256 codec over a process-scoped secret.
///
/// The secret is injected at construction (explicit configuration); the codec
/// never generates or rotates it on its own.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Zero leeway so the claim expiry and the stored-record expiry
        // re-check cannot disagree around the boundary.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;
        Ok(data.claims)
    }
}
