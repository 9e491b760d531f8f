//! Transfer limits and input normalization.

use ferrobank_core::{DomainError, TransactionId};
use serde::Serialize;

/// Smallest transferable amount.
pub const MIN_TRANSFER: i64 = 1;
/// Largest transferable amount per transfer.
pub const MAX_TRANSFER: i64 = 1_000_000;
/// Free-text note cap.
pub const MAX_NOTE_CHARS: usize = 200;

/// Check the amount against the transfer limits.
pub fn validate_amount(amount: i64) -> Result<(), DomainError> {
    if amount < MIN_TRANSFER {
        return Err(DomainError::validation("Minimum transfer amount is ₹1."));
    }
    if amount > MAX_TRANSFER {
        return Err(DomainError::validation(
            "Maximum transfer limit is ₹10,00,000.",
        ));
    }
    Ok(())
}

/// Normalize an optional note: absent becomes empty, over-long is rejected.
pub fn normalize_note(note: Option<String>) -> Result<String, DomainError> {
    let note = note.unwrap_or_default();
    if note.chars().count() > MAX_NOTE_CHARS {
        return Err(DomainError::validation(
            "Note must be at most 200 characters.",
        ));
    }
    Ok(note)
}

/// Result of a fully applied transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub transaction_id: TransactionId,
    pub amount: i64,
    pub receiver: String,
    pub new_balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_bounds() {
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-5).is_err());
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(1_000_000).is_ok());
        assert!(validate_amount(1_000_001).is_err());
    }

    #[test]
    fn note_defaults_to_empty_and_caps_length() {
        assert_eq!(normalize_note(None).unwrap(), "");
        assert_eq!(normalize_note(Some("hi".into())).unwrap(), "hi");
        assert!(normalize_note(Some("x".repeat(201))).is_err());
        assert!(normalize_note(Some("x".repeat(200))).is_ok());
    }
}
