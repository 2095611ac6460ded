//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Choosing between file mode and the WebSocket server
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use redirect_audit::initialization::{init_context, init_crypto_provider, init_logger_with};
use redirect_audit::{run_file, server, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Settings such as REDIRECT_AUDIT_PORT may come from a .env file
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let file = opt.file.clone();
    let config = Config::from(opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;
    init_crypto_provider();

    let outcome = match file {
        Some(path) => {
            let ctx = init_context(&config).context("Failed to initialize processing context")?;
            run_file(&ctx, &path, tokio::io::stdout()).await.map(|report| {
                eprintln!(
                    "Checked {} URL{} ({} succeeded, {} failed) in {:.1}s",
                    report.total,
                    if report.total == 1 { "" } else { "s" },
                    report.succeeded,
                    report.failed,
                    report.elapsed.as_secs_f64()
                );
            })
        }
        None => server::serve(config).await,
    };

    if let Err(e) = outcome {
        eprintln!("redirect_audit error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
