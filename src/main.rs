//! Aptus - portal dump and maintenance tool
//!
//! Main entry point for the Aptus CLI.

mod cli;
mod cmd_dump;
mod cmd_manage;
mod prompt;

use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aptus_browser::{BrowserManager, BrowserManagerConfig};
use aptus_config::{aptus_home, BrowserConfig, Config, ConfigLoader, ConfigValidator};

use cli::{Cli, Commands};

/// Initialize tracing with console and daily rolling file output.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = aptus_home().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("aptus")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load and validate the configuration file.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    info!("Loading config from {}", cli.config.display());
    let config = ConfigLoader::load(&cli.config)?;

    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    Ok(config)
}

/// Browser manager settings derived from the `[browser]` section.
pub(crate) fn browser_manager_config(config: &BrowserConfig) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: config.debug_port,
        profile_dir: Some(config.profile_dir_or_default()),
        headless: config.headless,
        implicit_wait: Duration::from_millis(config.implicit_wait_ms),
        ..Default::default()
    }
}

/// Start (or attach to) Chrome and open a page.
pub(crate) async fn open_browser(config: &BrowserConfig) -> Result<BrowserManager, Box<dyn std::error::Error>> {
    let manager = BrowserManager::new(browser_manager_config(config));

    if let Err(e) = manager.connect().await {
        if let Err(close_err) = manager.shutdown().await {
            warn!("Failed to shut down browser: {}", close_err);
        }
        return Err(e.into());
    }

    Ok(manager)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;

    match cli.command {
        None => cmd_dump::handle_dump_command(&config, cli.dump).await,
        Some(Commands::Dump(args)) => cmd_dump::handle_dump_command(&config, args).await,
        Some(Commands::Manage { action, file, yes }) => {
            cmd_manage::handle_manage_command(&config, action, &file, yes).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Aptus failed: {}", e);
        return Err(e);
    }

    Ok(())
}
