use ferrobank_auth::{Role, SessionClaims};
use ferrobank_core::AccountId;

/// Authenticated identity for a request.
///
/// Carries the snapshot embedded in the signed token, not a fresh read of the
/// account store; treat the fields as possibly briefly stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    pub uid: AccountId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<SessionClaims> for CurrentAccount {
    fn from(claims: SessionClaims) -> Self {
        Self {
            uid: claims.sub,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        }
    }
}
