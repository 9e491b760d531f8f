//! Account store + transaction log behind one transactional seam.
//!
//! `execute_transfer` is the only path that mutates balances. It re-validates
//! everything inside a single write-lock critical section, so debit, credit
//! and log append commit together or not at all, and two concurrent transfers
//! from the same account can never both pass the balance check.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use ferrobank_core::{AccountId, DomainError, Page, PageParams, TransactionId};
use ferrobank_ledger::{
    Account, TransactionRecord, TransactionStatus, transfer::validate_amount,
};

/// A transfer ready for execution: both parties already resolved.
#[derive(Debug, Clone)]
pub struct TransferCommand {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub amount: i64,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Outcome of a fully applied transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferApplied {
    pub record: TransactionRecord,
    pub sender_balance: i64,
}

/// Combined account store and append-only transaction log.
pub trait LedgerStore: Send + Sync {
    /// Insert a new account, enforcing case-insensitive username/email
    /// uniqueness.
    fn insert_account(&self, account: Account) -> Result<(), DomainError>;

    fn account(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Lookup by stored (lowercased) email.
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Resolve a transfer recipient by case-insensitive email OR username.
    fn resolve_recipient(&self, reference: &str) -> Result<Option<Account>, DomainError>;

    /// Apply debit + credit + log append as one unit.
    fn execute_transfer(&self, cmd: TransferCommand) -> Result<TransferApplied, DomainError>;

    /// Newest-first page of records where the account is sender or receiver.
    fn transactions_for(
        &self,
        account: &AccountId,
        params: PageParams,
    ) -> Result<Page<TransactionRecord>, DomainError>;

    fn transaction_count(&self, account: &AccountId) -> Result<u64, DomainError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn insert_account(&self, account: Account) -> Result<(), DomainError> {
        (**self).insert_account(account)
    }

    fn account(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        (**self).account(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        (**self).find_by_email(email)
    }

    fn resolve_recipient(&self, reference: &str) -> Result<Option<Account>, DomainError> {
        (**self).resolve_recipient(reference)
    }

    fn execute_transfer(&self, cmd: TransferCommand) -> Result<TransferApplied, DomainError> {
        (**self).execute_transfer(cmd)
    }

    fn transactions_for(
        &self,
        account: &AccountId,
        params: PageParams,
    ) -> Result<Page<TransactionRecord>, DomainError> {
        (**self).transactions_for(account, params)
    }

    fn transaction_count(&self, account: &AccountId) -> Result<u64, DomainError> {
        (**self).transaction_count(account)
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<AccountId, Account>,
    transactions: Vec<TransactionRecord>,
}

/// In-memory ledger for dev/test and the demo deployment.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, LedgerState>, DomainError> {
        self.inner
            .read()
            .map_err(|_| DomainError::internal("ledger store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, LedgerState>, DomainError> {
        self.inner
            .write()
            .map_err(|_| DomainError::internal("ledger store lock poisoned"))
    }
}

impl LedgerStore for InMemoryLedger {
    fn insert_account(&self, account: Account) -> Result<(), DomainError> {
        let mut state = self.write()?;

        for existing in state.accounts.values() {
            if existing.email == account.email {
                return Err(DomainError::conflict("Email already registered."));
            }
            if existing.username.eq_ignore_ascii_case(&account.username) {
                return Err(DomainError::conflict("Username already taken."));
            }
        }

        state.accounts.insert(account.id, account);
        Ok(())
    }

    fn account(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.read()?.accounts.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let email = email.trim().to_lowercase();
        let state = self.read()?;
        Ok(state.accounts.values().find(|a| a.email == email).cloned())
    }

    fn resolve_recipient(&self, reference: &str) -> Result<Option<Account>, DomainError> {
        let needle = reference.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        let state = self.read()?;
        Ok(state
            .accounts
            .values()
            .find(|a| a.email == needle || a.username.to_lowercase() == needle)
            .cloned())
    }

    fn execute_transfer(&self, cmd: TransferCommand) -> Result<TransferApplied, DomainError> {
        validate_amount(cmd.amount)?;

        let mut state = self.write()?;

        // All checks happen under the write lock; nothing is mutated until
        // every one of them has passed.
        let sender = state
            .accounts
            .get(&cmd.sender)
            .ok_or(DomainError::NotFound)?;
        let receiver = state
            .accounts
            .get(&cmd.receiver)
            .ok_or(DomainError::RecipientNotFound)?;

        if sender.id == receiver.id {
            return Err(DomainError::SelfTransfer);
        }
        if sender.balance < cmd.amount {
            return Err(DomainError::InsufficientFunds);
        }

        let record = TransactionRecord {
            id: TransactionId::new(),
            sender_uid: sender.id,
            sender_username: sender.username.clone(),
            receiver_uid: receiver.id,
            receiver_username: receiver.username.clone(),
            amount: cmd.amount,
            note: cmd.note,
            status: TransactionStatus::Completed,
            created_at: cmd.occurred_at,
        };

        // Presence was just verified under this same lock, so the lookups
        // below cannot fail; the ok_or keeps the path panic-free regardless.
        let sender_balance = {
            let sender = state
                .accounts
                .get_mut(&cmd.sender)
                .ok_or(DomainError::NotFound)?;
            sender.balance -= cmd.amount;
            sender.balance
        };
        {
            let receiver = state
                .accounts
                .get_mut(&cmd.receiver)
                .ok_or(DomainError::RecipientNotFound)?;
            receiver.balance += cmd.amount;
        }

        state.transactions.push(record.clone());

        tracing::debug!(
            transaction_id = %record.id,
            amount = record.amount,
            "transfer applied"
        );

        Ok(TransferApplied {
            record,
            sender_balance,
        })
    }

    fn transactions_for(
        &self,
        account: &AccountId,
        params: PageParams,
    ) -> Result<Page<TransactionRecord>, DomainError> {
        let state = self.read()?;
        let matching: Vec<&TransactionRecord> = state
            .transactions
            .iter()
            .rev()
            .filter(|t| t.involves(account))
            .collect();
        let total = matching.len() as u64;
        Ok(Page::slice(matching.into_iter().cloned(), total, params))
    }

    fn transaction_count(&self, account: &AccountId) -> Result<u64, DomainError> {
        let state = self.read()?;
        Ok(state.transactions.iter().filter(|t| t.involves(account)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrobank_ledger::NewAccount;

    fn open_account(ledger: &InMemoryLedger, username: &str, email: &str, balance: i64) -> Account {
        let new = NewAccount::parse(username, email, None).unwrap();
        let mut account = Account::open(new, "hash".into(), Utc::now());
        account.balance = balance;
        ledger.insert_account(account.clone()).unwrap();
        account
    }

    fn transfer(sender: AccountId, receiver: AccountId, amount: i64) -> TransferCommand {
        TransferCommand {
            sender,
            receiver,
            amount,
            note: String::new(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_email_is_a_conflict_case_insensitive() {
        let ledger = InMemoryLedger::new();
        open_account(&ledger, "alice", "alice@x.com", 100);

        let new = NewAccount::parse("other", "ALICE@X.COM", None).unwrap();
        let err = ledger
            .insert_account(Account::open(new, "hash".into(), Utc::now()))
            .unwrap_err();
        assert_eq!(err, DomainError::conflict("Email already registered."));
    }

    #[test]
    fn duplicate_username_is_a_conflict_case_insensitive() {
        let ledger = InMemoryLedger::new();
        open_account(&ledger, "alice", "alice@x.com", 100);

        let new = NewAccount::parse("ALICE", "other@x.com", None).unwrap();
        let err = ledger
            .insert_account(Account::open(new, "hash".into(), Utc::now()))
            .unwrap_err();
        assert_eq!(err, DomainError::conflict("Username already taken."));
    }

    #[test]
    fn recipient_resolves_by_email_or_username_case_insensitive() {
        let ledger = InMemoryLedger::new();
        let bob = open_account(&ledger, "Bob", "bob@x.com", 100);

        for reference in ["bob", "BOB", "bob@x.com", "BOB@X.COM", " bob "] {
            let found = ledger.resolve_recipient(reference).unwrap();
            assert_eq!(found.map(|a| a.id), Some(bob.id), "failed for {reference:?}");
        }
        assert!(ledger.resolve_recipient("nobody").unwrap().is_none());
        assert!(ledger.resolve_recipient("  ").unwrap().is_none());
    }

    #[test]
    fn transfer_conserves_funds_and_appends_one_record() {
        let ledger = InMemoryLedger::new();
        let alice = open_account(&ledger, "alice", "alice@x.com", 100_000);
        let bob = open_account(&ledger, "bob", "bob@x.com", 100_000);

        let applied = ledger.execute_transfer(transfer(alice.id, bob.id, 500)).unwrap();

        assert_eq!(applied.sender_balance, 99_500);
        assert_eq!(ledger.account(&alice.id).unwrap().unwrap().balance, 99_500);
        assert_eq!(ledger.account(&bob.id).unwrap().unwrap().balance, 100_500);
        assert_eq!(ledger.transaction_count(&alice.id).unwrap(), 1);
        assert_eq!(applied.record.amount, 500);
        assert_eq!(applied.record.sender_username, "alice");
        assert_eq!(applied.record.receiver_username, "bob");
    }

    #[test]
    fn insufficient_funds_leaves_everything_untouched() {
        let ledger = InMemoryLedger::new();
        let alice = open_account(&ledger, "alice", "alice@x.com", 100_000);
        let bob = open_account(&ledger, "bob", "bob@x.com", 100_000);

        let err = ledger
            .execute_transfer(transfer(alice.id, bob.id, 200_000))
            .unwrap_err();

        assert_eq!(err, DomainError::InsufficientFunds);
        assert_eq!(ledger.account(&alice.id).unwrap().unwrap().balance, 100_000);
        assert_eq!(ledger.account(&bob.id).unwrap().unwrap().balance, 100_000);
        assert_eq!(ledger.transaction_count(&alice.id).unwrap(), 0);
    }

    #[test]
    fn self_transfer_is_its_own_error_kind() {
        let ledger = InMemoryLedger::new();
        let alice = open_account(&ledger, "alice", "alice@x.com", 100_000);

        let err = ledger
            .execute_transfer(transfer(alice.id, alice.id, 100))
            .unwrap_err();
        assert_eq!(err, DomainError::SelfTransfer);
    }

    #[test]
    fn unknown_parties_map_to_distinct_errors() {
        let ledger = InMemoryLedger::new();
        let alice = open_account(&ledger, "alice", "alice@x.com", 100_000);

        let err = ledger
            .execute_transfer(transfer(AccountId::new(), alice.id, 100))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);

        let err = ledger
            .execute_transfer(transfer(alice.id, AccountId::new(), 100))
            .unwrap_err();
        assert_eq!(err, DomainError::RecipientNotFound);
    }

    #[test]
    fn history_pages_newest_first() {
        let ledger = InMemoryLedger::new();
        let alice = open_account(&ledger, "alice", "alice@x.com", 1_000_000);
        let bob = open_account(&ledger, "bob", "bob@x.com", 0);

        for amount in 1..=20 {
            ledger
                .execute_transfer(transfer(alice.id, bob.id, amount))
                .unwrap();
        }

        let page = ledger
            .transactions_for(&alice.id, PageParams::new(2, 15))
            .unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 20);
        assert_eq!(page.pages, 2);
        // Newest first: page 2 holds the oldest five transfers.
        assert_eq!(page.items[0].amount, 5);
        assert_eq!(page.items[4].amount, 1);
    }

    #[test]
    fn concurrent_transfers_never_overdraw() {
        let ledger = Arc::new(InMemoryLedger::new());
        let alice = open_account(&ledger, "alice", "alice@x.com", 1_000);
        let bob = open_account(&ledger, "bob", "bob@x.com", 0);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let ledger = Arc::clone(&ledger);
            let (sender, receiver) = (alice.id, bob.id);
            handles.push(std::thread::spawn(move || {
                let mut applied = 0u32;
                for _ in 0..50 {
                    if ledger
                        .execute_transfer(transfer(sender, receiver, 10))
                        .is_ok()
                    {
                        applied += 1;
                    }
                }
                applied
            }));
        }

        let applied: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        let alice_after = ledger.account(&alice.id).unwrap().unwrap().balance;
        let bob_after = ledger.account(&bob.id).unwrap().unwrap().balance;

        // Only as many transfers as the opening balance could cover.
        assert_eq!(applied, 100);
        assert_eq!(alice_after, 0);
        assert_eq!(bob_after, 1_000);
        assert!(alice_after >= 0);
        assert_eq!(alice_after + bob_after, 1_000);
        assert_eq!(ledger.transaction_count(&alice.id).unwrap(), 100);
    }
}
