//! Error type definitions.
//!
//! This module defines the per-URL failure taxonomy, initialization errors,
//! and the error/info categories counted by `ProcessingStats`.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// Error binding the server listener.
    #[error("Failed to bind {addr}: {source}")]
    ServerBindError {
        /// Address the listener tried to bind
        addr: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },
}

/// Why a single redirect walk failed.
///
/// The `Display` text of each variant is the human-readable comment reported
/// to the caller, so it must stay stable.
#[derive(Error, Debug)]
pub enum WalkError {
    /// A hop exceeded the per-request timeout (seconds).
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The final, non-redirect response had a status of 400 or above.
    #[error("HTTP Error: {status}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Effective URL of the failing response
        url: String,
    },

    /// Connection, DNS or transport failure.
    #[error("Request failed (Network/DNS error)")]
    Network(#[source] ReqwestError),

    /// A redirect status arrived without a `Location` header.
    #[error("Redirect missing location header")]
    MissingLocationHeader,

    /// A hop redirected to the URL it was fetched from.
    #[error("URL redirects to itself in a loop")]
    SelfRedirectLoop,

    /// The hop limit was reached while still redirecting.
    #[error("Too many redirects")]
    TooManyRedirects,

    /// Anything uncategorized (unparseable URL or `Location`, client errors).
    #[error("An unexpected error occurred")]
    Unexpected(String),
}

impl WalkError {
    /// Comment reported for this failure.
    pub fn comment(&self) -> String {
        self.to_string()
    }

    /// Statistics category of this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            WalkError::Timeout(_) => ErrorType::Timeout,
            WalkError::HttpStatus { .. } => ErrorType::HttpStatus,
            WalkError::Network(_) => ErrorType::Network,
            WalkError::MissingLocationHeader => ErrorType::MissingLocationHeader,
            WalkError::SelfRedirectLoop => ErrorType::SelfRedirectLoop,
            WalkError::TooManyRedirects => ErrorType::TooManyRedirects,
            WalkError::Unexpected(_) => ErrorType::Unexpected,
        }
    }
}

/// Categories of failed walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    Timeout,
    HttpStatus,
    Network,
    MissingLocationHeader,
    SelfRedirectLoop,
    TooManyRedirects,
    Unexpected,
}

/// Types of informational metrics recorded for completed walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Walk succeeded after at least one redirect
    RedirectChain,
    /// A hop redirected from `http://` to `https://`
    HttpsRedirect,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Timeout => "Request timeout",
            ErrorType::HttpStatus => "HTTP error status",
            ErrorType::Network => "Network/DNS error",
            ErrorType::MissingLocationHeader => "Redirect without Location",
            ErrorType::SelfRedirectLoop => "Self redirect loop",
            ErrorType::TooManyRedirects => "Too many redirects",
            ErrorType::Unexpected => "Unexpected error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::RedirectChain => "Redirect chain",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
        }
    }
}
