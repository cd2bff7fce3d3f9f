//! Structured Logger
//!
//! Wraps `tracing` with a console layer (plain or JSON), an optional rolling
//! NDJSON file, and `RUST_LOG`-style level control.

use std::path::PathBuf;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Base name of the daily log file: `krishimitra.log.YYYY-MM-DD`.
pub const LOG_FILE_NAME: &str = "krishimitra.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter used when `RUST_LOG` is unset (e.g. "info", "krishimitra_gateway=debug").
    pub level: String,
    /// Directory for the rolling file. `None` logs to the console only.
    pub dir: Option<PathBuf>,
    /// Emit JSON on the console instead of human-readable lines.
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Initialize the global subscriber. Later calls are no-ops.
///
/// Fails, before anything is installed, when the log directory cannot be
/// created or written.
pub fn init_logger(options: &LogOptions) -> Result<(), InitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    let file_layer = match &options.dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_NAME)
                .build(dir)?;
            Some(fmt::layer().json().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    let json_console = options
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stdout));

    let plain_console = (!options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(plain_console)
        .with(json_console)
        .with(file_layer)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_log_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("krishimitra.log");
        std::fs::write(&not_a_dir, "occupied").unwrap();

        let options = LogOptions {
            dir: Some(not_a_dir),
            ..LogOptions::default()
        };
        assert!(init_logger(&options).is_err());
    }
}
