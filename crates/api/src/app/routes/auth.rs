//! Registration, login and logout.

use std::sync::Arc;

use axum::{
    Extension, Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::app::{
    AppConfig, cookies, dto,
    errors::{self, ApiError},
    services::{AppServices, SESSION_TTL_HOURS},
};

// Treats a whitespace-only field the same as an absent one.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> Response {
    let (Some(username), Some(email), Some(password)) = (
        present(&body.username),
        present(&body.email),
        present(&body.password),
    ) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "Username, email, and password are required.",
        );
    };

    match services
        .gate
        .register(username, email, password, body.phone.as_deref())
    {
        Ok(view) => errors::json_ok(
            StatusCode::CREATED,
            "Registration successful! Please login.",
            dto::account_view_json(&view),
        ),
        Err(err) => err.into_response(),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(config): Extension<Arc<AppConfig>>,
    Json(body): Json<dto::LoginRequest>,
) -> Response {
    let (Some(email), Some(password)) = (present(&body.email), present(&body.password)) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "Email and password are required.");
    };

    match services.gate.login(email, password, Utc::now()) {
        Ok((token, view)) => {
            let cookie = cookies::session_cookie(
                &token,
                SESSION_TTL_HOURS * 60 * 60,
                config.secure_cookies,
            );
            with_cookie(
                errors::json_ok(
                    StatusCode::OK,
                    "Login successful!",
                    dto::account_view_json(&view),
                ),
                &cookie,
            )
        }
        Err(err) => err.into_response(),
    }
}

/// Logout never fails: it drops whatever session cookie came along and
/// clears the cookie either way.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(config): Extension<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = cookies::session_token(&headers) {
        services.gate.revoke(&token);
    }

    with_cookie(
        errors::ok_message("Logged out successfully."),
        &cookies::clear_session_cookie(config.secure_cookies),
    )
}

fn with_cookie(mut response: Response, cookie: &str) -> Response {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
            response
        }
        // Tokens are base64url and our attributes are fixed, so this is
        // unreachable in practice.
        Err(_) => ApiError::internal("malformed session cookie").into_response(),
    }
}
