//! Error handling and processing statistics.
//!
//! This module provides:
//! - The per-URL failure taxonomy (`WalkError`) and initialization errors
//! - Categorization of transport errors into that taxonomy
//! - Processing statistics tracking (failure categories and info metrics)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{ErrorType, InfoType, InitializationError, WalkError};
