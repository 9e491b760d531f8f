//! `ferrobank-ledger` — banking domain model.
//!
//! Accounts, immutable transfer records, and the pure validation rules for
//! registration and transfers. No IO; stores live in `ferrobank-infra`.

pub mod account;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountView, NewAccount, STARTING_BALANCE, validate_password};
pub use transaction::{Direction, TransactionRecord, TransactionStatus, TransactionView};
pub use transfer::{MAX_TRANSFER, MIN_TRANSFER, TransferReceipt, normalize_note, validate_amount};
