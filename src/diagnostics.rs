// Diagnostics sink
//
// Every fail-open recovery in the engine is reported through a `DiagnosticSink`
// that the caller hands in. Nothing in the crate logs through a global on its own.

use crate::models::FileFormat;
use std::fmt;
use std::sync::Mutex;
use thiserror::Error;

/// Which external document a [`ConfigWarning::SourceUnavailable`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    BaseConfig,
    Overrides,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseConfig => f.write_str("base config"),
            Self::Overrides => f.write_str("environment overrides"),
        }
    }
}

/// A recoverable condition the engine worked around.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    #[error("Unknown region {0}, using fallback regional defaults")]
    UnknownRegion(String),

    #[error("Unknown environment {0}, keeping base settings")]
    UnknownEnvironment(String),

    #[error("Format {0} is not configured, strategy left unchanged")]
    FormatNotConfigured(FileFormat),

    #[error("{kind} unavailable, using defaults: {reason}")]
    SourceUnavailable { kind: SourceKind, reason: String },

    #[error("Format {0} had flags inconsistent with its strategy and was normalized")]
    FormatNormalized(FileFormat),
}

/// Receiver for engine diagnostics.
///
/// Implementations must be cheap and must not panic; the engine calls them
/// from inside otherwise pure functions.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, warning: &ConfigWarning);

    fn info(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, warning: &ConfigWarning) {
        tracing::warn!("{}", warning);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _warning: &ConfigWarning) {}

    fn info(&self, _message: &str) {}
}

/// Keeps warnings in memory so callers can inspect them as data.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<ConfigWarning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings recorded so far.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, warning: &ConfigWarning) {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(warning.clone());
    }

    fn info(&self, _message: &str) {}
}
