//! Customer account model and registration rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferrobank_auth::Role;
use ferrobank_core::{AccountId, DomainError};

/// Every account opens with this balance (demo product, play money).
pub const STARTING_BALANCE: i64 = 100_000;

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 6;

/// A registered customer account.
///
/// # Invariants
/// - `username` and `email` are unique across the store (case-insensitive),
///   enforced at insert time by the ledger store.
/// - `email` is stored lowercased.
/// - `balance` never goes negative after a committed operation.
/// - `password_hash` is an Argon2id PHC string; the plaintext never lands
///   here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub balance: i64,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Validated registration input, pre-hash.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewAccount {
    /// Validate and normalize raw registration fields.
    ///
    /// Username is trimmed, email is trimmed and lowercased. The password is
    /// checked separately (see [`validate_password`]) so the caller can run
    /// that check before paying for the hash.
    pub fn parse(
        username: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Self, DomainError> {
        let username = username.trim();
        if username.chars().count() < MIN_USERNAME_CHARS {
            return Err(DomainError::validation(
                "Username must be at least 3 characters.",
            ));
        }

        let email = email.trim().to_lowercase();
        if !looks_like_email(&email) {
            return Err(DomainError::validation("Please enter a valid email"));
        }

        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(Self {
            username: username.to_string(),
            email,
            phone,
        })
    }
}

impl Account {
    /// Open a new account at the fixed starting balance.
    pub fn open(new: NewAccount, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(),
            username: new.username,
            email: new.email,
            password_hash,
            balance: STARTING_BALANCE,
            phone: new.phone,
            role: Role::Customer,
            created_at: now,
        }
    }

    /// Public identity view: everything a client may see, never the hash.
    pub fn view(&self) -> AccountView {
        AccountView {
            uid: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Minimal public account view returned by register/login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub uid: AccountId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Password policy check, run against the plaintext before hashing.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(DomainError::validation(
            "Password must be at least 6 characters.",
        ));
    }
    Ok(())
}

// Shape check equivalent to `^\S+@\S+\.\S+$`: no whitespace, a local part,
// and a domain with at least one interior dot.
fn looks_like_email(s: &str) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_email_and_trims() {
        let new = NewAccount::parse(" alice ", " Alice@Example.COM ", Some("  ")).unwrap();
        assert_eq!(new.username, "alice");
        assert_eq!(new.email, "alice@example.com");
        assert_eq!(new.phone, None);
    }

    #[test]
    fn short_username_rejected() {
        let err = NewAccount::parse("al", "al@example.com", None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn bad_emails_rejected() {
        for email in ["not-an-email", "a@b", "a b@c.com", "@c.com", "a@.com", ""] {
            assert!(
                NewAccount::parse("alice", email, None).is_err(),
                "accepted {email:?}"
            );
        }
    }

    #[test]
    fn plausible_emails_accepted() {
        for email in ["a@b.co", "first.last@sub.domain.org"] {
            assert!(NewAccount::parse("alice", email, None).is_ok());
        }
    }

    #[test]
    fn five_char_password_rejected_six_accepted() {
        assert!(validate_password("pw123").is_err());
        assert!(validate_password("pw1234").is_ok());
    }

    #[test]
    fn open_starts_at_fixed_balance() {
        let new = NewAccount::parse("alice", "alice@x.com", None).unwrap();
        let account = Account::open(new, "hash".into(), Utc::now());
        assert_eq!(account.balance, STARTING_BALANCE);
        assert_eq!(account.role, Role::Customer);
    }

    #[test]
    fn view_excludes_credential_hash() {
        let new = NewAccount::parse("alice", "alice@x.com", None).unwrap();
        let account = Account::open(new, "hash".into(), Utc::now());
        let view = account.view();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
