use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use council_bot_core::config::Config;
use council_bot_core::kernel::BotDeps;
use council_bot_core::pipeline::run_once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,council_bot_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Config first: it names the log file
    let config = Config::from_env()?;
    init_tracing(config.log_file.as_deref())?;

    tracing::info!(council_url = %config.council_url, "Starting council agenda bot");

    let deps = BotDeps::from_config(&config).context("Failed to build service clients")?;

    match run_once(&config, &deps).await? {
        Some(report) => tracing::info!(
            discovered = report.discovered,
            recorded = report.recorded,
            failed = report.failed,
            "Run complete"
        ),
        None => tracing::warn!("Run interrupted"),
    }

    Ok(())
}
