//! Session introspection for the authenticated account.

use std::sync::Arc;

use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::CurrentAccount;

pub async fn get_token(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<CurrentAccount>,
) -> Response {
    match services.gate.active_session(&identity.uid) {
        Ok(Some(record)) => errors::ok_data(dto::session_json(&record)),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "No active token found."),
        Err(err) => err.into_response(),
    }
}
