//! Subscriber setup for the `tracing` feature.
//!
//! Environment variables:
//! - `RUST_LOG`: Filter directives (e.g., `algolab=debug,algolab::graph=trace`)
//! - `ALGOLAB_LOG_DIR`: Log directory (default: `logs/`)
//! - `ALGOLAB_LOG_CONSOLE`: Set to "0" to disable console output
//!
//! Logs are written to `logs/algolab.jsonl` as newline-delimited JSON.
//!
//! ```bash
//! # Show only warnings from the hash maps
//! cat logs/algolab.jsonl | jq 'select(.level == "WARN" and (.target | startswith("algolab::hash")))'
//! ```

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

static INIT: Once = Once::new();

/// Configuration for tracing setup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Log file name.
    pub log_file: String,
    /// Enable console output.
    pub console_enabled: bool,
    /// Default log level if `RUST_LOG` is not set.
    pub default_level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file: "algolab.jsonl".to_string(),
            console_enabled: true,
            default_level: Level::INFO,
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("ALGOLAB_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if env::var("ALGOLAB_LOG_CONSOLE").is_ok_and(|v| v == "0") {
            config.console_enabled = false;
        }

        config
    }
}

/// Initialize the global subscriber with console and file logging.
///
/// Safe to call multiple times; only the first call takes effect. If the log
/// file cannot be opened, only the console layer is installed.
pub fn init_tracing() {
    INIT.call_once(|| {
        setup_tracing(&TracingConfig::from_env());
    });
}

fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

fn setup_tracing(config: &TracingConfig) {
    let console_layer = config.console_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_thread_ids(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .compact()
            .with_filter(make_filter(config.default_level))
    });

    let file = std::fs::create_dir_all(&config.log_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_dir.join(&config.log_file))
    });

    let file_layer = match file {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_thread_ids(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(make_filter(config.default_level)),
        ),
        Err(e) => {
            eprintln!(
                "algolab: cannot open log file in {}: {e}",
                config.log_dir.display()
            );
            None
        }
    };

    // try_init: a host binary may already own the global subscriber
    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_logs_dir() {
        let config = TracingConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_file, "algolab.jsonl");
        assert!(config.console_enabled);
        assert_eq!(config.default_level, Level::INFO);
    }

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::debug!(value = 42, "second init was a no-op");
    }
}
