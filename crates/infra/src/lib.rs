//! `ferrobank-infra` — document-style stores.
//!
//! In-memory implementations behind traits; a real document database would
//! slot in behind the same seams. The ledger store is the single
//! synchronization point for balance mutation.

pub mod ledger_store;
pub mod session_store;

pub use ledger_store::{InMemoryLedger, LedgerStore, TransferApplied, TransferCommand};
pub use session_store::{InMemorySessionStore, SessionRecord, SessionStore};
