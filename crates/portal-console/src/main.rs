//! Staff portal console entry point
//!
//! Run with:
//! ```bash
//! cargo run -p portal-console -- login Fatima123 --password Pixoul123
//! cargo run -p portal-console -- shifts week
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, Level};

use portal_common::{try_init_tracing_with_config, AppConfig, AppError, ErrorResponse, TracingConfig};
use portal_console::{execute, Cli};
use portal_service::ServiceContext;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            error!(error = %err, "Command failed");

            if json {
                let body = app_error.map_or_else(
                    || ErrorResponse {
                        code: "INTERNAL_ERROR".to_string(),
                        message: format!("{err:#}"),
                        details: None,
                    },
                    ErrorResponse::from,
                );
                match serde_json::to_string_pretty(&body) {
                    Ok(body) => println!("{body}"),
                    Err(_) => eprintln!("error: {err:#}"),
                }
            } else {
                eprintln!("error: {err:#}");
            }

            ExitCode::from(app_error.map_or(1, AppError::exit_code))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    let mut tracing = TracingConfig::from_settings(&config.app);
    if let Some(level) = verbosity(cli.verbose) {
        tracing = tracing.with_level(level);
    }
    if let Err(e) = try_init_tracing_with_config(&tracing) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        storage = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "Configuration loaded"
    );

    let ctx = ServiceContext::from_config(&config)
        .map_err(AppError::from)
        .context("Failed to open portal storage")?;

    let output = execute(&ctx, cli.command).await?;

    // Let pending notifications reach their listeners before exiting
    ctx.flush_events().await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(output.json())?);
    } else {
        println!("{}", output.text());
    }
    Ok(())
}

fn verbosity(count: u8) -> Option<Level> {
    match count {
        0 => None,
        1 => Some(Level::INFO),
        2 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}
