//! Invocation configuration for xraise / xlower
//!
//! Everything comes from the process environment: the display address,
//! the raise/lower mode (picked from the program name) and the log filter.
//! No configuration file is read.

use std::env;
use std::ffi::OsString;
use tracing::debug;

/// Display address used when `DISPLAY` is unset
pub const DEFAULT_DISPLAY: &str = ":0";

/// Log filter used when neither `XRAISE_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Which way to move the client window in the stacking order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Raise,
    Lower,
}

impl Mode {
    /// Any invocation name containing "lower" lowers, including its directory part.
    pub fn from_program_name(program: &str) -> Self {
        if program.contains("lower") {
            Mode::Lower
        } else {
            Mode::Raise
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Mode::Raise => "raise",
            Mode::Lower => "lower",
        }
    }
}

/// `argv[0]` as text; invalid UTF-8 is replaced rather than rejected
fn program_name(arg0: Option<OsString>) -> String {
    arg0.map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Display address handed to the X connection
    pub display: String,
    /// Raise or lower
    pub mode: Mode,
    /// `tracing-subscriber` EnvFilter directive
    pub log_filter: String,
}

impl Config {
    /// Build the configuration from `DISPLAY`, `XRAISE_LOG`/`RUST_LOG` and `argv[0]`
    pub fn from_env() -> Self {
        let program = program_name(env::args_os().next());
        let log_filter = env::var("XRAISE_LOG").or_else(|_| env::var("RUST_LOG")).ok();

        Self::from_parts(env::var("DISPLAY").ok(), &program, log_filter)
    }

    pub fn from_parts(display: Option<String>, program: &str, log_filter: Option<String>) -> Self {
        let config = Self {
            display: display
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY.to_string()),
            mode: Mode::from_program_name(program),
            log_filter: log_filter
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        debug!("Config: {:?}", config);
        config
    }
}
