//! Request payloads and response shaping.
//!
//! Request fields are `Option` so that missing-field errors surface as the
//! handlers' own messages instead of a deserialization failure.

use ferrobank_infra::SessionRecord;
use ferrobank_ledger::{Account, AccountView, TransactionView};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub recipient: Option<String>,
    pub amount: Option<i64>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub fn account_view_json(view: &AccountView) -> Value {
    json!({
        "uid": view.uid,
        "username": view.username,
        "email": view.email,
        "role": view.role,
    })
}

pub fn balance_json(account: &Account) -> Value {
    json!({
        "uid": account.id,
        "username": account.username,
        "email": account.email,
        "balance": account.balance,
        "role": account.role,
    })
}

pub fn transaction_json(view: &TransactionView) -> Value {
    json!({
        "id": view.id,
        "type": view.direction,
        "amount": view.amount,
        "counterparty": view.counterparty,
        "note": view.note,
        "status": view.status,
        "date": view.date,
    })
}

pub fn profile_json(account: &Account, total_transactions: u64) -> Value {
    json!({
        "uid": account.id,
        "username": account.username,
        "email": account.email,
        "phone": account.phone.as_deref().unwrap_or("Not set"),
        "balance": account.balance,
        "role": account.role,
        "totalTransactions": total_transactions,
        "memberSince": account.created_at,
    })
}

pub fn session_json(record: &SessionRecord) -> Value {
    json!({
        "token": record.token,
        "maskedToken": mask_token(&record.token),
        "uid": record.uid,
        "expiry": record.expiry,
        "createdAt": record.created_at,
    })
}

/// Shortens a token for display: first 20 and last 10 characters. Session
/// tokens are ASCII, so byte indexing is safe.
pub fn mask_token(token: &str) -> String {
    if token.len() > 30 {
        format!("{}...{}", &token[..20], &token[token.len() - 10..])
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_tokens() {
        let token = "a".repeat(40);
        let masked = mask_token(&token);
        assert_eq!(masked.len(), 20 + 3 + 10);
        assert!(masked.contains("..."));
    }

    #[test]
    fn short_tokens_pass_through() {
        assert_eq!(mask_token("short"), "short");
    }
}
