//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tokio::sync::Semaphore;

use crate::config::constants::{
    CONCURRENCY_LIMIT, DEFAULT_USER_AGENT, MAX_REDIRECTS, REQUEST_TIMEOUT_SECS,
    THROTTLE_DELAY, THROTTLE_THRESHOLD,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// DNS backend used by the IP range oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolverKind {
    /// hickory-resolver with its default upstream configuration
    Hickory,
    /// The operating system resolver (`getaddrinfo` on a blocking thread)
    System,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use redirect_audit::Config;
///
/// let config = Config {
///     max_concurrency: 10,
///     timeout_seconds: 15,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Address the WebSocket server binds to
    pub bind: String,

    /// Port the WebSocket server listens on
    pub port: u16,

    /// Maximum concurrent redirect walks per batch
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum number of hops recorded per URL
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Batches larger than this many distinct URLs are throttled
    pub throttle_threshold: usize,

    /// Delay before each walk of a throttled batch
    pub throttle_delay: Duration,

    /// DNS backend for the IP range oracle
    pub resolver: ResolverKind,
}

impl Config {
    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            bind: "127.0.0.1".to_string(),
            port: 8000,
            max_concurrency: CONCURRENCY_LIMIT,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            max_redirects: MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            throttle_threshold: THROTTLE_THRESHOLD,
            throttle_delay: THROTTLE_DELAY,
            resolver: ResolverKind::Hickory,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Serve the WebSocket interface on the default port
/// redirect_audit
///
/// # Audit a file of URLs once and print JSON Lines
/// redirect_audit --file urls.txt
///
/// # Read URLs from stdin
/// cat urls.txt | redirect_audit --file -
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "redirect_audit",
    about = "Resolves redirect chains for a list of URLs and fingerprints the server behind each hop."
)]
pub struct Opt {
    /// Run a single batch from this file ("-" for stdin) and print JSON Lines instead of serving
    #[arg(long, value_parser)]
    pub file: Option<PathBuf>,

    /// Address to bind the WebSocket server to
    #[arg(long, env = "REDIRECT_AUDIT_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// Port for the WebSocket server
    #[arg(long, env = "REDIRECT_AUDIT_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum concurrent redirect walks per batch
    #[arg(long, default_value_t = CONCURRENCY_LIMIT)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Throttle batches with more than this many distinct URLs
    #[arg(long, default_value_t = THROTTLE_THRESHOLD)]
    pub throttle_threshold: usize,

    /// Per-walk delay in milliseconds for throttled batches
    #[arg(long, default_value_t = THROTTLE_DELAY.as_millis() as u64)]
    pub throttle_delay_ms: u64,

    /// DNS backend used for CDN IP range checks
    #[arg(long, value_enum, default_value_t = ResolverKind::Hickory)]
    pub resolver: ResolverKind,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            log_level: opt.log_level,
            log_format: opt.log_format,
            bind: opt.bind,
            port: opt.port,
            max_concurrency: opt.max_concurrency.clamp(1, Semaphore::MAX_PERMITS),
            timeout_seconds: opt.timeout_seconds,
            max_redirects: MAX_REDIRECTS,
            user_agent: opt.user_agent,
            throttle_threshold: opt.throttle_threshold,
            throttle_delay: Duration::from_millis(opt.throttle_delay_ms),
            resolver: opt.resolver,
        }
    }
}
