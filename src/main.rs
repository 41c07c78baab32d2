use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::panic;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tvheat::config::Config;
use tvheat::lookup::LookupOptions;
use tvheat::tmdb::{TmdbApi, TmdbClient};
use tvheat::tui::{self, app::App};

// The terminal belongs to the UI, so logs go to a file.
fn init_tracing(log_file: &Path) -> Result<()> {
    if let Some(dir) = log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).context("Failed to create logs directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let dotenv_result = dotenv();
    let config = Config::from_env()?;
    init_tracing(&config.log_file)?;
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::new(&config)?);
    let options = LookupOptions {
        include_specials: config.include_specials,
    };
    let mut app = App::new(tmdb, runtime.handle().clone(), options);

    // Install panic hook that restores the terminal before printing the panic.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = ratatui::restore();
        default_hook(info);
    }));

    info!("Starting UI at {} fps", config.fps);
    let mut terminal = ratatui::init();
    let result = tui::run(&mut terminal, &mut app, config.frame_interval());
    ratatui::restore();
    result.context("Terminal UI failed")?;

    info!("Exiting");
    Ok(())
}
