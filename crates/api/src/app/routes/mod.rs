use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod balance;
pub mod system;
pub mod token;
pub mod transfer;

/// Routes reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/health", get(system::health))
}

/// Routes behind the session middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/balance", get(balance::get_balance))
        .route("/transfer", post(transfer::send_transfer))
        .route("/transactions", get(transfer::list_transactions))
        .route("/profile", get(balance::get_profile))
        .route("/token", get(token::get_token))
}
