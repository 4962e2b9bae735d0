//! # Landsea
//!
//! Runs a survival-sailing session without a window. The first argument is
//! an optional path to a TOML config file; `landsea.toml` in the working
//! directory is used otherwise. Set `RUST_LOG` to adjust logging.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use landsea_engine::config::{LandseaConfig, CONFIG_FILE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the snapshot.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("landsea=info".parse()?))
        .init();

    info!("Landsea starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = LandseaConfig::load_from(&path);

    landsea_engine::app::run(&config)?;

    info!("Landsea shutdown complete");
    Ok(())
}
