//! Diagnostics and error handling for the eligibility engine
//!
//! This crate provides the error handling infrastructure shared by the
//! criterion parser, the function resolver and the trial configuration
//! loader: error codes, diagnostics, and the top-level error type.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for eligibility engine operations
pub type Result<T> = std::result::Result<T, TrialError>;
