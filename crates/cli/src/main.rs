//! Terminal entry point for the reading companion.
mod commands;
mod dirs;
mod render;

use anyhow::Result;
use clap::Parser;
use companion_runtime::{ReadingTracker, RuntimeConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Command;

/// Reading companion: log books, grow a character, raise a pet
#[derive(Parser)]
#[command(name = "readself")]
#[command(about = "Track your reading and watch your companion grow", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env();
    if config.data_dir.is_none() {
        config.data_dir = Some(dirs::data_dir());
    }

    let _guard = setup_logging(&config)?;

    let mut tracker = ReadingTracker::from_config(&config)?;
    cli.command.execute(&mut tracker)
}

/// Logs go to a file in the data directory so terminal output stays clean.
fn setup_logging(
    config: &RuntimeConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(data_dir) = config.data_dir.as_ref().filter(|_| config.persist) else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "readself.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::debug!("Logging to {}", log_dir.display());

    Ok(Some(guard))
}
