//! redirect_audit library: redirect chain and edge server auditing
//!
//! This library walks the HTTP redirect chain of each URL in a batch, one
//! request per hop, and labels the infrastructure that answered every hop
//! (Akamai edge, Adobe Experience Manager dispatcher, or whatever the `Server`
//! header names).
//!
//! # Example
//!
//! ```no_run
//! use redirect_audit::initialization::init_context;
//! use redirect_audit::{run_batch, BatchMessage, Config};
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let ctx = init_context(&config)?;
//! let (tx, mut rx) = mpsc::channel(100);
//!
//! let printer = tokio::spawn(async move {
//!     while let Some(message) = rx.recv().await {
//!         if let BatchMessage::Result(result) = message {
//!             println!("{} {:?} {}", result.url, result.status, result.comment);
//!         }
//!     }
//! });
//!
//! let report = run_batch("example.com\nhttp://example.org", &ctx, tx).await;
//! printer.await?;
//! println!("{} URLs, {} failed", report.total, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod batch;
pub mod config;
mod dns;
mod error_handling;
mod fetch;
mod fingerprint;
pub mod initialization;
mod models;
pub mod server;

// Re-export public API
pub use batch::{normalize_batch, normalize_url, run_batch, AdmissionControl, BatchReport};
pub use config::{Config, LogFormat, LogLevel, Opt, ResolverKind};
pub use dns::{
    is_akamai_ip, preferred_address, CidrBlock, CidrParseError, HickoryResolver, HostResolver,
    IpOracle, StaticResolver, SystemResolver,
};
pub use error_handling::{ErrorType, InfoType, InitializationError, ProcessingStats, WalkError};
pub use fetch::{resolve_redirect_chain, walk_url, ProcessingContext};
pub use fingerprint::{classify_server, HeaderSignals};
pub use models::{BatchMessage, DoneMarker, HopRecord, ResultStatus, UrlResult};
pub use run::{read_input, run_file, write_json_lines};

// File mode: one batch from a file or stdin, printed as JSON Lines
mod run {
    use std::path::Path;

    use anyhow::{Context, Result};
    use log::info;
    use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
    use tokio::sync::mpsc;

    use crate::batch::{run_batch, BatchReport};
    use crate::fetch::ProcessingContext;
    use crate::models::BatchMessage;

    /// Reads the whole batch from `path`, or from stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub async fn read_input(path: &Path) -> Result<String> {
        let mut raw = String::new();
        if path.as_os_str() == "-" {
            info!("Reading URLs from stdin");
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read URLs from stdin")?;
        } else {
            raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
        }
        Ok(raw)
    }

    /// Writes each message as one line of JSON until the channel closes.
    ///
    /// # Errors
    ///
    /// Returns the first write error; the receiver is dropped with it, so the
    /// batch stops emitting.
    pub async fn write_json_lines<W>(mut rx: mpsc::Receiver<BatchMessage>, mut out: W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(message) = rx.recv().await {
            let mut line =
                serde_json::to_vec(&message).context("Failed to serialize result")?;
            line.push(b'\n');
            out.write_all(&line).await.context("Failed to write result")?;
        }
        out.flush().await.context("Failed to flush output")?;
        Ok(())
    }

    /// Runs one batch from `path` and writes the results to `out` in
    /// completion order, followed by the done marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the output cannot be
    /// written. Individual URL failures are reported in the output instead.
    pub async fn run_file<W>(ctx: &ProcessingContext, path: &Path, out: W) -> Result<BatchReport>
    where
        W: AsyncWrite + Unpin,
    {
        let raw = read_input(path).await?;
        let (tx, rx) = mpsc::channel(100);
        let (report, written) = tokio::join!(run_batch(&raw, ctx, tx), write_json_lines(rx, out));
        written?;
        Ok(report)
    }
}
