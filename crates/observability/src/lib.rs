//! Tracing/logging initialization for the FerroBank processes.

pub mod tracing_init;

pub use tracing_init::init;
