//! scanlens - terminal QR code scanner

mod tui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scanlens_core::camera::{self, NokhwaDevice};
use scanlens_core::{RqrrDecoder, ScanConfig, ScanSession, SessionOptions};

#[derive(Debug, Parser)]
#[command(name = "scanlens", about = "Terminal QR code scanner", version)]
struct Cli {
    /// Camera device index (overrides config)
    #[arg(long)]
    device: Option<u32>,

    /// Sampling interval in milliseconds (overrides config)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Path to a config file (defaults to ~/.config/scanlens/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List cameras and exit
    #[arg(long)]
    list_devices: bool,

    /// Write logs to this file instead of the default location
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_devices {
        return print_devices();
    }

    init_logging(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::load_default()?,
    };
    if let Some(device) = cli.device {
        config.device = Some(device);
    }
    if let Some(interval) = cli.interval_ms {
        config.tick_interval_ms = interval;
    }
    tracing::info!(?config, "starting");

    let options = SessionOptions {
        tick_interval: config.tick_interval(),
        constraints: config.constraints(),
        inversion: config.inversion,
    };
    let (session, events) = ScanSession::new(
        Arc::new(NokhwaDevice::new()),
        Arc::new(RqrrDecoder::new()),
        options,
    );

    tui::run(session, events).await
}

fn print_devices() -> Result<()> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras detected.");
        return Ok(());
    }
    for info in devices {
        println!("{:>3}  {}  ({})", info.index, info.name, info.description);
    }
    Ok(())
}

/// The TUI owns stdout, so logs go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("scanlens")
        .join("scanlens.log")
}
