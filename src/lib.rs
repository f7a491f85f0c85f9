// ragconf - Configuration resolution for multi-region RAG deployments
//
// This library crate resolves per-region/per-environment feature toggles with compliance
// metadata, and per-format document-conversion strategies with their validation and reporting.
// There is no binary; host processes call `ConfigManager` or the pure functions in `services`.

pub mod config;
pub mod diagnostics;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, EngineSettings, SourceError};
pub use diagnostics::{ConfigWarning, DiagnosticSink, TracingSink};
pub use models::{
    Environment, FileFormat, GlobalConfig, PartialProcessingConfig, ProcessingConfig,
    ProcessingStrategy,
};
pub use services::{ProcessingReport, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
