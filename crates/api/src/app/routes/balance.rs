//! Balance and profile reads for the authenticated account.

use std::sync::Arc;

use axum::{
    Extension,
    response::{IntoResponse, Response},
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::CurrentAccount;

pub async fn get_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<CurrentAccount>,
) -> Response {
    match services.ledger.account(&identity.uid) {
        Ok(account) => errors::ok_data(dto::balance_json(&account)),
        Err(err) => err.into_response(),
    }
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<CurrentAccount>,
) -> Response {
    match services.ledger.profile(&identity.uid) {
        Ok((account, total)) => errors::ok_data(dto::profile_json(&account, total)),
        Err(err) => err.into_response(),
    }
}
