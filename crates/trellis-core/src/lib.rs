//! # trellis-core
//!
//! Core crate for the Trellis extension platform. Contains configuration
//! schemas, the tracing setup helper, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Trellis crates.

pub mod config;
pub mod error;
pub mod result;
pub mod telemetry;

pub use error::AppError;
pub use result::AppResult;
