//! xraise / xlower
//!
//! Raises (or lowers) the X11 client window under the mouse pointer.
//! Invoked as `xlower` (a symlink to `xraise`), or under any name containing
//! "lower", it lowers.

mod config;
mod error;
mod wm;

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use wm::connection::X11Server;

fn run(config: &Config) -> Result<()> {
    let server = X11Server::connect(&config.display)
        .with_context(|| format!("Failed to open display {}", config.display))?;

    wm::raise_under_pointer(&server, config.mode)
        .with_context(|| format!("Failed to {} window under pointer", config.mode.verb()))?;

    Ok(())
}

fn main() -> ExitCode {
    let config = Config::from_env();

    // Diagnostics go to stderr only
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting xraise in {:?} mode on {}", config.mode, config.display);

    ExitCode::from(report(run(&config)))
}

/// Exit status for a finished run: 0 on success, 1 after logging the failure
fn report(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("Application error: {:#}", e);
            1
        }
    }
}
