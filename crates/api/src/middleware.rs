use axum::{
    extract::State,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::app::{cookies, errors, services::SessionGate};

#[derive(Clone)]
pub struct AuthState {
    pub gate: SessionGate,
}

/// Gate for all protected routes.
///
/// Extracts the session cookie, runs the full validation (signature, store
/// presence, stored expiry) and attaches the authenticated identity as a
/// request extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = cookies::session_token(req.headers()) else {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "Access denied. No token provided.",
        );
    };

    match state.gate.validate(&token, Utc::now()) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
