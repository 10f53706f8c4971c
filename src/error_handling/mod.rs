//! Error handling.
//!
//! This module provides:
//! - Typed startup errors
//! - Categorization of transport errors into human-readable causes
//!
//! Per-URL failures never surface as `Err`: they are folded into a failed
//! verdict carrying the message built here.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, describe_fetch_error};
pub use types::{FetchErrorKind, InitializationError};
