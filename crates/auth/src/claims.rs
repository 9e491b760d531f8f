use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use ferrobank_core::AccountId;

use crate::Role;

/// Signed session claims.
///
/// The claims carry a snapshot of the account's public identity so that
/// protected handlers never need to re-read the account store just to know
/// who is calling. Callers must treat the snapshot as briefly stale.
///
/// `iat`/`exp` are UNIX seconds, which is what the token layer validates
/// natively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the account identifier.
    pub sub: AccountId,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Issued-at, UNIX seconds.
    pub iat: i64,
    /// Expiry, UNIX seconds.
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a freshly issued session.
    pub fn issue(
        sub: AccountId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        issued_at: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Self {
        Self {
            sub,
            username: username.into(),
            email: email.into(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_sets_expiry_after_ttl() {
        let now = Utc::now();
        let claims = SessionClaims::issue(
            AccountId::new(),
            "alice",
            "alice@example.com",
            Role::Customer,
            now,
            TimeDelta::hours(24),
        );

        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.issued_at().unwrap().timestamp(), now.timestamp());
    }
}
