//! Tracing subscriber setup.
//!
//! The terminal belongs to the editor while it runs, so log output never
//! goes to stdout or stderr: it is written to `--log-file` when one is given
//! and discarded otherwise.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Directive that lets `--perf` timings through a WARN default.
pub const PERF_DIRECTIVE: &str = "screenmd::perf=info";

/// Filter from `RUST_LOG`-style `directives`, WARN when they are empty.
///
/// With `perf` set, timing events from [`crate::perf`] are enabled on top.
pub fn env_filter(directives: &str, perf: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives);
    if !perf {
        return filter;
    }
    match PERF_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(err) => {
            tracing::debug!(%err, "invalid perf directive");
            filter
        }
    }
}

/// Where log lines go: `log_file` if given, nowhere otherwise.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn log_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(io::sink)),
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init(log_file: Option<&Path>, perf: bool) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&directives, perf))
        .with_ansi(false)
        .with_writer(log_writer(log_file)?)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize logging: {err}"))
}
