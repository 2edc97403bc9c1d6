//! ZoneForge Web Server Binary
//!
//! This binary starts the ZoneForge web server that provides a REST API
//! for a browser-based screen layout editor.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3002, uses the configured layouts directory)
//! zoneforge-web
//!
//! # Specify port and workspace
//! zoneforge-web --port 8080 --workspace ~/pos-layouts
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoneforge::config::Config;
use zoneforge::web;

/// ZoneForge Web Server - REST API for the screen layout editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3002")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Workspace directory containing layout files.
    /// Defaults to `paths.layouts_dir` from the config file, or the
    /// platform-specific layouts directory:
    /// - Linux: ~/.config/ZoneForge/layouts/
    /// - macOS: ~/Library/Application Support/ZoneForge/layouts/
    /// - Windows: %APPDATA%\ZoneForge\layouts\
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Gets the configured layouts directory, creating it if it doesn't exist.
fn get_default_layouts_dir(config: &Config) -> anyhow::Result<PathBuf> {
    let layouts_dir = config.layouts_dir()?;

    if !layouts_dir.exists() {
        std::fs::create_dir_all(&layouts_dir).context(format!(
            "Failed to create layouts directory: {}",
            layouts_dir.display()
        ))?;
    }

    Ok(layouts_dir)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().unwrap_or_default();

    let workspace_root = match args.workspace {
        Some(path) => path,
        None => get_default_layouts_dir(&config)?,
    };

    info!("Workspace root: {}", workspace_root.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, workspace_root, addr).await
}
