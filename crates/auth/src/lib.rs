//! `ferrobank-auth` — pure authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models
//! session claims, signs/verifies tokens, and hashes credentials. Deciding
//! whether a verified token is still *live* (present in the session store)
//! is the caller's job.

pub mod claims;
pub mod password;
pub mod roles;
pub mod token;

pub use claims::SessionClaims;
pub use password::{PasswordError, hash_password, verify_password};
pub use roles::Role;
pub use token::{Hs256TokenCodec, TokenCodec, TokenError};
