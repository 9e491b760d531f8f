//! Active-session token store.
//!
//! One record per issued token, keyed by the token string. The gate enforces
//! the single-active-session invariant by calling `remove_for_account` before
//! every insert.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use ferrobank_core::{AccountId, DomainError};

/// One active authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub uid: AccountId,
    pub expiry: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub trait SessionStore: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<(), DomainError>;

    /// Lookup by token AND owning account; a token signed for another
    /// account never matches.
    fn find(&self, token: &str, uid: &AccountId) -> Result<Option<SessionRecord>, DomainError>;

    /// Newest session for an account (introspection).
    fn find_for_account(&self, uid: &AccountId) -> Result<Option<SessionRecord>, DomainError>;

    /// Idempotent delete by token.
    fn remove_token(&self, token: &str) -> Result<(), DomainError>;

    /// Delete every session owned by the account.
    fn remove_for_account(&self, uid: &AccountId) -> Result<(), DomainError>;
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn insert(&self, record: SessionRecord) -> Result<(), DomainError> {
        (**self).insert(record)
    }

    fn find(&self, token: &str, uid: &AccountId) -> Result<Option<SessionRecord>, DomainError> {
        (**self).find(token, uid)
    }

    fn find_for_account(&self, uid: &AccountId) -> Result<Option<SessionRecord>, DomainError> {
        (**self).find_for_account(uid)
    }

    fn remove_token(&self, token: &str) -> Result<(), DomainError> {
        (**self).remove_token(token)
    }

    fn remove_for_account(&self, uid: &AccountId) -> Result<(), DomainError> {
        (**self).remove_for_account(uid)
    }
}

/// In-memory session store for dev/test and the demo deployment.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, SessionRecord>>, DomainError> {
        self.inner
            .read()
            .map_err(|_| DomainError::internal("session store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, SessionRecord>>, DomainError> {
        self.inner
            .write()
            .map_err(|_| DomainError::internal("session store lock poisoned"))
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<(), DomainError> {
        self.write()?.insert(record.token.clone(), record);
        Ok(())
    }

    fn find(&self, token: &str, uid: &AccountId) -> Result<Option<SessionRecord>, DomainError> {
        Ok(self
            .read()?
            .get(token)
            .filter(|r| r.uid == *uid)
            .cloned())
    }

    fn find_for_account(&self, uid: &AccountId) -> Result<Option<SessionRecord>, DomainError> {
        Ok(self
            .read()?
            .values()
            .filter(|r| r.uid == *uid)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    fn remove_token(&self, token: &str) -> Result<(), DomainError> {
        self.write()?.remove(token);
        Ok(())
    }

    fn remove_for_account(&self, uid: &AccountId) -> Result<(), DomainError> {
        self.write()?.retain(|_, r| r.uid != *uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn record(token: &str, uid: AccountId, created_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            token: token.to_string(),
            uid,
            expiry: created_at + TimeDelta::hours(24),
            created_at,
        }
    }

    #[test]
    fn find_requires_matching_owner() {
        let store = InMemorySessionStore::new();
        let alice = AccountId::new();
        store.insert(record("t1", alice, Utc::now())).unwrap();

        assert!(store.find("t1", &alice).unwrap().is_some());
        assert!(store.find("t1", &AccountId::new()).unwrap().is_none());
        assert!(store.find("t2", &alice).unwrap().is_none());
    }

    #[test]
    fn remove_for_account_clears_all_of_that_accounts_sessions() {
        let store = InMemorySessionStore::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        let now = Utc::now();
        store.insert(record("a1", alice, now)).unwrap();
        store.insert(record("a2", alice, now)).unwrap();
        store.insert(record("b1", bob, now)).unwrap();

        store.remove_for_account(&alice).unwrap();

        assert!(store.find("a1", &alice).unwrap().is_none());
        assert!(store.find("a2", &alice).unwrap().is_none());
        assert!(store.find("b1", &bob).unwrap().is_some());
    }

    #[test]
    fn remove_token_is_idempotent() {
        let store = InMemorySessionStore::new();
        store.remove_token("missing").unwrap();
        store.remove_token("missing").unwrap();
    }

    #[test]
    fn find_for_account_prefers_newest() {
        let store = InMemorySessionStore::new();
        let alice = AccountId::new();
        let now = Utc::now();
        store.insert(record("old", alice, now - TimeDelta::minutes(5))).unwrap();
        store.insert(record("new", alice, now)).unwrap();

        let found = store.find_for_account(&alice).unwrap().unwrap();
        assert_eq!(found.token, "new");
    }
}
