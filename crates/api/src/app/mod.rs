use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware::{AuthState, auth_middleware};

pub mod cookies;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Runtime configuration for the HTTP layer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HMAC secret for session tokens. Must be stable across restarts or
    /// every outstanding session dies with the process.
    pub jwt_secret: String,
    /// Mark the session cookie `Secure` (HTTPS-only deployments).
    pub secure_cookies: bool,
}

/// Assembles the full application router under `/api`.
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config));

    let auth_state = AuthState {
        gate: services.gate.clone(),
    };

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        auth_middleware,
    ));

    let api = routes::public_router().merge(protected).layer(
        ServiceBuilder::new()
            .layer(Extension(services))
            .layer(Extension(Arc::new(config))),
    );

    Router::new().nest("/api", api)
}
