//! Tracing initialization and subscriber setup.
//!
//! Sets up the tracing subscriber used by both surface threads: an env-filter
//! level taken from configuration and a plain formatted layer appending to a
//! log file in the crate's data directory. Observability is optional: every
//! failure to set it up degrades to a silent no-op, and a host without a
//! writable filesystem still runs.

use crate::infrastructure::paths;
use crate::Config;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-backed output.
///
/// The filter level comes from `config.trace_level` (default `"info"`); the
/// log file from `config.trace_file`, falling back to
/// `<data_dir>/navsurface.log`.
///
/// Idempotent: only the first successful call per process installs a
/// subscriber, later calls are no-ops. Directory or file creation failures
/// are swallowed and leave tracing uninitialized.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let path = match &config.trace_file {
        Some(file) => PathBuf::from(file),
        None => {
            let data_dir = paths::data_dir();
            if std::fs::create_dir_all(&data_dir).is_err() {
                return;
            }
            data_dir.join("navsurface.log")
        }
    };

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(file_layer);

    let _ = subscriber.try_init();
}
