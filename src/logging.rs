use crate::config::EngineSettings;
use crate::models::{LogLevel, LoggingConfig};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// How a host process wants its logs written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Directory for log files (e.g., "logs")
    pub log_dir: Utf8PathBuf,

    /// Prefix for log files (e.g., "ragconf")
    pub log_prefix: String,

    pub level: LogLevel,

    /// Also log to stderr with ANSI colors
    pub console: bool,

    /// Write the file log as JSON lines instead of plain text
    pub json: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            log_dir: Utf8PathBuf::from("logs"),
            log_prefix: crate::APP_NAME.to_string(),
            level: LogLevel::Info,
            console: false,
            json: false,
        }
    }
}

impl LoggingOptions {
    /// Options for a resolved processing config's `logging` group.
    ///
    /// `settings.debug` forces the debug level. Detailed logs are written as
    /// JSON so per-format fields stay machine-readable.
    pub fn from_settings(settings: &EngineSettings, logging: &LoggingConfig) -> Self {
        Self {
            log_dir: settings.log_dir.clone(),
            level: if settings.debug {
                LogLevel::Debug
            } else {
                logging.level
            },
            console: settings.debug,
            json: logging.detailed_logs,
            ..Self::default()
        }
    }
}

/// `EnvFilter` directive for a level.
pub fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.to_string())
}

/// Setup logging with a daily rotating file appender.
///
/// # Arguments
/// * `options` - Log directory, file prefix, level and optional console/JSON output
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active.
/// Fails if the directory cannot be created or a global subscriber is already set.
pub fn init_logging(options: &LoggingOptions) -> Result<WorkerGuard> {
    // Create log directory if it doesn't exist
    if !options.log_dir.exists() {
        fs::create_dir_all(&options.log_dir)
            .with_context(|| format!("Failed to create log directory: {}", options.log_dir))?;
    }

    let file_appender = rolling::daily(&options.log_dir, &options.log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json_layer = options.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking.clone())
            .with_target(true)
            .with_thread_ids(true)
    });

    let text_layer = (!options.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking.clone())
            .with_ansi(false) // No ANSI codes in log files
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });

    let console_layer = options.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter_for(options.level))
        .with(json_layer)
        .with(text_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, level={}, console={}, json={}",
        options.log_dir,
        options.log_prefix,
        options.level,
        options.console,
        options.json
    );

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_logging_creates_directory_once() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = Utf8PathBuf::try_from(temp_dir.path().join("logs")).unwrap();
        let options = LoggingOptions {
            log_dir: log_dir.clone(),
            log_prefix: "test".to_string(),
            ..LoggingOptions::default()
        };

        let first = init_logging(&options);
        assert!(log_dir.exists());
        assert!(first.is_ok());

        // A second global subscriber is refused, not a panic
        assert!(init_logging(&options).is_err());
    }

    #[test]
    fn test_options_from_settings() {
        let logging = LoggingConfig {
            level: LogLevel::Warn,
            detailed_logs: false,
            ..LoggingConfig::default()
        };

        let quiet = LoggingOptions::from_settings(&EngineSettings::default(), &logging);
        assert_eq!(quiet.level, LogLevel::Warn);
        assert!(!quiet.console);
        assert!(!quiet.json);

        let debug_settings = EngineSettings {
            debug: true,
            ..EngineSettings::default()
        };
        let loud = LoggingOptions::from_settings(&debug_settings, &LoggingConfig::default());
        assert_eq!(loud.level, LogLevel::Debug);
        assert!(loud.console);
        assert!(loud.json);
    }
}
