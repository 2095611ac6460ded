//! Shared server state and response bodies.

use serde::{Deserialize, Serialize};

use crate::fetch::ProcessingContext;

/// State shared by every handler.
///
/// Cloning is cheap: the HTTP client and the IP oracle (with its DNS cache)
/// are reference counted and live for the whole process.
#[derive(Clone)]
pub struct AppState {
    pub ctx: ProcessingContext,
}

/// Body of the `/test` liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}

impl ServiceStatus {
    pub fn operational() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Service operational".to_string(),
        }
    }
}
