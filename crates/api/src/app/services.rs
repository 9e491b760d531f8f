//! Application services behind the HTTP handlers.
//!
//! `SessionGate` owns the credential/session lifecycle, `LedgerService` owns
//! money movement and account reads. Both translate domain errors into
//! [`ApiError`] so handlers only shape JSON.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use ferrobank_auth::{
    Hs256TokenCodec, SessionClaims, TokenCodec, TokenError, hash_password, verify_password,
};
use ferrobank_core::{AccountId, Page, PageParams};
use ferrobank_infra::{
    InMemoryLedger, InMemorySessionStore, LedgerStore, SessionRecord, SessionStore,
    TransferCommand,
};
use ferrobank_ledger::{
    Account, AccountView, NewAccount, TransactionView, TransferReceipt, normalize_note,
    validate_amount, validate_password,
};

use crate::app::AppConfig;
use crate::app::errors::ApiError;
use crate::context::CurrentAccount;

/// Sessions live this long; both the token `exp` claim and the stored expiry
/// use the same value.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Issues, validates and revokes sessions.
#[derive(Clone)]
pub struct SessionGate {
    ledger: Arc<dyn LedgerStore>,
    sessions: Arc<dyn SessionStore>,
    codec: Arc<dyn TokenCodec>,
    ttl: TimeDelta,
}

impl SessionGate {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        sessions: Arc<dyn SessionStore>,
        codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            ledger,
            sessions,
            codec,
            ttl: TimeDelta::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn session_ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Open an account. The cheap policy checks run before the hash is paid
    /// for; uniqueness is enforced by the store at insert time.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> Result<AccountView, ApiError> {
        validate_password(password)?;
        let new = NewAccount::parse(username, email, phone)?;

        let hash = hash_password(password)
            .map_err(|_| ApiError::internal("password hashing failed"))?;
        let account = Account::open(new, hash, Utc::now());
        let view = account.view();

        self.ledger.insert_account(account)?;

        tracing::info!(uid = %view.uid, username = %view.username, "account registered");
        Ok(view)
    }

    /// Authenticate and issue a fresh session, displacing any existing one.
    ///
    /// Unknown email and wrong password produce the same response, so the
    /// endpoint cannot be used to probe which emails are registered.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, AccountView), ApiError> {
        const BAD_CREDENTIALS: &str = "Invalid email or password.";

        let account = self
            .ledger
            .find_by_email(email)?
            .ok_or_else(|| ApiError::unauthenticated(BAD_CREDENTIALS))?;

        verify_password(password, &account.password_hash)
            .map_err(|_| ApiError::unauthenticated(BAD_CREDENTIALS))?;

        let claims = SessionClaims::issue(
            account.id,
            account.username.clone(),
            account.email.clone(),
            account.role,
            now,
            self.ttl,
        );
        let token = self
            .codec
            .encode(&claims)
            .map_err(|_| ApiError::internal("token signing failed"))?;

        // Single active session per account: displace before insert.
        self.sessions.remove_for_account(&account.id)?;
        self.sessions.insert(SessionRecord {
            token: token.clone(),
            uid: account.id,
            expiry: now + self.ttl,
            created_at: now,
        })?;

        tracing::info!(uid = %account.id, "session issued");
        Ok((token, account.view()))
    }

    /// Full session check: signature, store presence, stored expiry.
    ///
    /// A token that is cryptographically valid but absent from the store (it
    /// was revoked, or displaced by a newer login) is rejected. Expired
    /// tokens are removed from the store as a side effect.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<CurrentAccount, ApiError> {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                self.sessions.remove_token(token)?;
                return Err(ApiError::unauthenticated(
                    "Token has expired. Please login again.",
                ));
            }
            Err(TokenError::Invalid) => {
                return Err(ApiError::unauthenticated("Invalid token."));
            }
        };

        let record = self
            .sessions
            .find(token, &claims.sub)?
            .ok_or_else(|| ApiError::unauthenticated("Token not found. Please login again."))?;

        // The store keeps its own expiry; trust it over the claim.
        if now > record.expiry {
            self.sessions.remove_token(token)?;
            return Err(ApiError::unauthenticated(
                "Token has expired. Please login again.",
            ));
        }

        Ok(CurrentAccount::from(claims))
    }

    /// Revoke a session by token. Unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        if let Err(err) = self.sessions.remove_token(token) {
            tracing::warn!(%err, "failed to revoke session");
        }
    }

    /// Newest stored session for an account, if any.
    pub fn active_session(&self, uid: &AccountId) -> Result<Option<SessionRecord>, ApiError> {
        Ok(self.sessions.find_for_account(uid)?)
    }
}

/// Reads and money movement over the ledger store.
#[derive(Clone)]
pub struct LedgerService {
    ledger: Arc<dyn LedgerStore>,
}

impl LedgerService {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    pub fn account(&self, uid: &AccountId) -> Result<Account, ApiError> {
        self.ledger
            .account(uid)?
            .ok_or_else(|| ApiError::not_found("User not found."))
    }

    /// Run a transfer end to end.
    ///
    /// Checks run in a fixed order (amount bounds, sender, balance,
    /// recipient, self-transfer, note) so a request failing several of them
    /// always reports the same one. The store re-validates everything inside
    /// its own critical section before committing.
    pub fn transfer(
        &self,
        sender_uid: &AccountId,
        recipient: &str,
        amount: i64,
        note: Option<String>,
    ) -> Result<TransferReceipt, ApiError> {
        validate_amount(amount)?;

        let sender = self
            .ledger
            .account(sender_uid)?
            .ok_or_else(|| ApiError::not_found("Sender account not found."))?;

        if sender.balance < amount {
            return Err(ApiError::InsufficientFunds);
        }

        let receiver = self
            .ledger
            .resolve_recipient(recipient)?
            .ok_or_else(|| ApiError::not_found("Recipient not found. Check email or username."))?;

        if receiver.id == sender.id {
            return Err(ApiError::validation("Cannot transfer to yourself."));
        }

        let note = normalize_note(note)?;

        let applied = self.ledger.execute_transfer(TransferCommand {
            sender: sender.id,
            receiver: receiver.id,
            amount,
            note,
            occurred_at: Utc::now(),
        })?;

        tracing::info!(
            transaction_id = %applied.record.id,
            amount,
            "transfer completed"
        );

        Ok(TransferReceipt {
            transaction_id: applied.record.id,
            amount,
            receiver: applied.record.receiver_username.clone(),
            new_balance: applied.sender_balance,
        })
    }

    /// Newest-first page of the account's history, shaped from the viewer's
    /// perspective.
    pub fn transactions(
        &self,
        uid: &AccountId,
        params: PageParams,
    ) -> Result<Page<TransactionView>, ApiError> {
        let page = self.ledger.transactions_for(uid, params)?;
        Ok(page.map(|record| record.view_for(uid)))
    }

    pub fn profile(&self, uid: &AccountId) -> Result<(Account, u64), ApiError> {
        let account = self.account(uid)?;
        let total = self.ledger.transaction_count(uid)?;
        Ok((account, total))
    }
}

/// Everything the handlers need, wired once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub gate: SessionGate,
    pub ledger: LedgerService,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let ledger: Arc<dyn LedgerStore> = Arc::new(InMemoryLedger::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let codec: Arc<dyn TokenCodec> = Arc::new(Hs256TokenCodec::new(config.jwt_secret.as_bytes()));

    AppServices {
        gate: SessionGate::new(Arc::clone(&ledger), sessions, codec),
        ledger: LedgerService::new(ledger),
    }
}
