//! `ferrobank-core` — shared domain primitives.
//!
//! Strongly-typed identifiers, the domain error taxonomy, and pagination
//! helpers. This crate has no IO and no HTTP types.

pub mod error;
pub mod id;
pub mod pagination;

pub use error::{DomainError, DomainResult};
pub use id::{AccountId, TransactionId};
pub use pagination::{Page, PageParams};
