//! Logging setup for the CLI.
//!
//! Two sinks:
//! - stderr, human-readable, warnings and errors unless `-v` is given
//! - a JSONL file, written on a background thread, filtered by `RUST_LOG`,
//!   `-q`/`-v`, or the configured `log_level`
//!
//! The log file is `TERMLINT_LOG_PATH` if set, otherwise `termlint.jsonl` in
//! `TERMLINT_LOG_DIR`, the configured `log_dir`, or the platform data dir.
//! If the directory cannot be created, file logging is skipped.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "TERMLINT_LOG_PATH";
const LOG_DIR_ENV: &str = "TERMLINT_LOG_DIR";
const LOG_FILE_NAME: &str = "termlint.jsonl";

/// Where log output should go.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Exact log file path.
    pub log_path: Option<PathBuf>,
    /// Directory for the default log file.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read log locations from the environment, falling back to `config_log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            log_dir: std::env::var_os(LOG_DIR_ENV)
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }

    /// Directory and file name of the log file, if one can be determined.
    fn log_file(&self) -> Option<(PathBuf, String)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir, name));
        }
        let dir = self.log_dir.clone().or_else(|| {
            termlint_core::config::user_data_local_dir()
                .map(|dir| dir.join("logs").into_std_path_buf())
        })?;
        Some((dir, LOG_FILE_NAME.to_string()))
    }
}

/// Build the file log filter. `RUST_LOG` wins over flags and config.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Level shown on stderr.
pub const fn stderr_level(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else if verbose > 0 {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process so buffered
/// file output is flushed on exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
    stderr_level: LevelFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(stderr_level);

    let (file_layer, guard) = match config.log_file() {
        Some((dir, name)) if std::fs::create_dir_all(&dir).is_ok() => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
