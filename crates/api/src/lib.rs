//! `ferrobank-api`: HTTP surface for the demo bank.
//!
//! Axum router + cookie-based session middleware over the session gate and
//! ledger service. See `app::build_app` for the wiring.

pub mod app;
pub mod context;
pub mod middleware;
