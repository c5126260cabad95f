// src/logging.rs

//! `tracing` subscriber setup.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to the whole process;
//! 2. `TASKWEAVE_LOG`, any `EnvFilter` directive string
//!    (`debug`, `taskweave::tree=trace,warn`, ...);
//! 3. `info`.
//!
//! Output goes to stderr; stdout only carries the task listing.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable read when `--log-level` is absent.
pub const LOG_ENV: &str = "TASKWEAVE_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directives = filter_directives(cli_level, std::env::var(LOG_ENV).ok().as_deref());

    fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Directive string for the subscriber's `EnvFilter`.
fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.as_directive().to_string();
    }

    env.map(str::trim)
        .filter(|s| !s.is_empty() && EnvFilter::try_new(s).is_ok())
        .unwrap_or("info")
        .to_string()
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
