//! Immutable transfer records and their per-account directional views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferrobank_core::{AccountId, TransactionId};

/// Lifecycle status of a recorded transfer.
///
/// Only `Completed` is produced today; the other states are reserved for
/// multi-step settlement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// One committed transfer, append-only once created.
///
/// Usernames are denormalized snapshots taken at transfer time so history
/// stays stable even if account fields later change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub sender_uid: AccountId,
    pub sender_username: String,
    pub receiver_uid: AccountId,
    pub receiver_username: String,
    pub amount: i64,
    pub note: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Which side of a transfer the viewing account was on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }
}

/// A transfer as seen from one account: direction plus the counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub direction: Direction,
    pub amount: i64,
    pub counterparty: String,
    pub note: String,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn involves(&self, account: &AccountId) -> bool {
        self.sender_uid == *account || self.receiver_uid == *account
    }

    /// Map the record to the viewing account's perspective. The viewer must
    /// be one of the two parties; a sender sees `sent` plus the receiver as
    /// counterparty, and vice versa.
    pub fn view_for(&self, viewer: &AccountId) -> TransactionView {
        let (direction, counterparty) = if self.sender_uid == *viewer {
            (Direction::Sent, self.receiver_username.clone())
        } else {
            (Direction::Received, self.sender_username.clone())
        };

        TransactionView {
            id: self.id,
            direction,
            amount: self.amount,
            counterparty,
            note: self.note.clone(),
            status: self.status,
            date: self.created_at,
        }
    }
}
