//! Money movement and transaction history.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use ferrobank_core::PageParams;

use crate::app::{dto, errors, services::AppServices};
use crate::context::CurrentAccount;

pub async fn send_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<CurrentAccount>,
    Json(body): Json<dto::TransferRequest>,
) -> Response {
    let recipient = body
        .recipient
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let amount = body.amount.filter(|a| *a != 0);

    let (Some(recipient), Some(amount)) = (recipient, amount) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "Recipient and amount are required.",
        );
    };

    match services
        .ledger
        .transfer(&identity.uid, recipient, amount, body.note)
    {
        Ok(receipt) => errors::json_ok(
            StatusCode::OK,
            &format!("₹{} sent to {}!", receipt.amount, receipt.receiver),
            json!({
                "transactionId": receipt.transaction_id,
                "amount": receipt.amount,
                "receiver": receipt.receiver,
                "newBalance": receipt.new_balance,
            }),
        ),
        Err(err) => err.into_response(),
    }
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<CurrentAccount>,
    Query(query): Query<dto::HistoryQuery>,
) -> Response {
    let params = PageParams::new(
        query.page.unwrap_or(PageParams::DEFAULT_PAGE),
        query.limit.unwrap_or(PageParams::DEFAULT_LIMIT),
    );

    match services.ledger.transactions(&identity.uid, params) {
        Ok(page) => errors::ok_data(json!({
            "transactions": page.items.iter().map(dto::transaction_json).collect::<Vec<_>>(),
            "pagination": {
                "page": page.page,
                "limit": page.limit,
                "total": page.total,
                "pages": page.pages,
            },
        })),
        Err(err) => err.into_response(),
    }
}
