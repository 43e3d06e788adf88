//! NetUI server - Main entry point
//!
//! Serves the calibration/object API and the built dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use netui_server::config;
use netui_server::state::AppState;
use netui_server::store::CalibrationStore;

#[derive(Parser, Debug)]
#[command(name = "netui-server")]
#[command(about = "MaxKernel calibration and object inspection service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "netui.toml")]
    config: PathBuf,

    /// Bind address for web server
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite calibration database
    #[arg(long)]
    database: Option<PathBuf>,

    /// Directory with the built dashboard
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    netui_server::init_tracing(&args.log_level);
    info!("NetUI server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config::load_config(&args.config)
        .with_context(|| format!("Failed to load {:?}", args.config))?;

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(database) = args.database {
        config.server.database = Some(database);
    }
    if let Some(static_dir) = args.static_dir {
        config.server.static_dir = static_dir;
    }

    let db_path = config.server.database_path();
    let startup_config = config.clone();
    let state = tokio::task::spawn_blocking(move || -> Result<_> {
        let store = CalibrationStore::open(&db_path)
            .with_context(|| format!("Failed to open calibration database {:?}", db_path))?;
        Ok(AppState::new(&startup_config, store)?)
    })
    .await
    .context("Startup task panicked")??;

    netui_server::server::run(state, &config.server.bind, &config.server.static_dir).await?;
    Ok(())
}
