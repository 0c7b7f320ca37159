//! Folio - terminal portfolio
//!
//! Shows the owner's profile, projects and posts, downloads the resume with
//! progress reporting and relays contact messages.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::branding::{APP_BINARY_NAME, APP_DISPLAY_NAME, LOG_FILE_NAME, STORAGE_FILE_NAME};
use folio::config::Config;
use folio::contact::EmailJsRelay;
use folio::download::{DirectorySaveAction, HttpFetcher};
use folio::services::JsonFileStore;
use folio::tui::{self, AppServices, AppState, OsColorScheme};

/// Folio - terminal portfolio with resume download and contact form
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the default configuration and exit
    #[arg(long)]
    init: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_file_path()?,
    };
    // Storage and log live next to the config file
    let data_dir = config_path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    if cli.init {
        return write_default_config(&config_path);
    }

    init_logging(&data_dir, cli.verbose)?;

    let config = Config::load_from(&config_path)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "Starting {APP_DISPLAY_NAME}"
    );

    let services = AppServices {
        fetcher: Arc::new(HttpFetcher::new(config.resume.timeout())?),
        saver: Box::new(DirectorySaveAction::new(config.resume.resolved_save_dir())),
        store: Box::new(JsonFileStore::new(data_dir.join(STORAGE_FILE_NAME))),
        relay: Arc::new(EmailJsRelay::new(&config.contact)?),
        color_scheme: Box::new(OsColorScheme),
    };
    let mut state = AppState::new(config, services);

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;

    info!("Exiting");
    result
}

fn write_default_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!(
            "Configuration already exists at {} (not overwritten)",
            config_path.display()
        );
        return Ok(());
    }

    Config::new().save_to(config_path)?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

/// Log to a file so the alternate screen is left alone.
fn init_logging(data_dir: &Path, verbose: bool) -> Result<()> {
    fs::create_dir_all(data_dir).context(format!(
        "Failed to create data directory: {}",
        data_dir.display()
    ))?;

    let log_path = data_dir.join(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file: {}", log_path.display()))?;

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}
