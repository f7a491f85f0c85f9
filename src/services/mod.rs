//! Services module - Pure decision logic over the configuration models.
//!
//! Everything here is a synchronous function from input values to a freshly built output value.
//! No service keeps state between calls, so callers may use them from any number of threads.
//! Functions that can recover from bad input (unknown region, unknown environment, unknown
//! format) take a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) and report the recovery
//! there instead of failing.
//!
//! # Components
//!
//! - [`compliance`]: region code → set of [`ComplianceRegulation`](crate::models::ComplianceRegulation)
//! - [`environment`]: regional defaults, per-environment feature tables, and
//!   [`resolve_global_config`]
//! - [`merge`](mod@merge): group-wise merge of a base processing config with a partial override
//! - [`strategy`]: per-format questions (`uses_primary`, `execution_order`, `needs_comparison`, ...)
//! - [`validation`]: full list of [`Violation`]s for a processing config
//! - [`mutation`]: invariant-preserving strategy changes ([`with_strategy`], [`with_strategies`])
//! - [`report`]: per-strategy counts and per-format rows ([`summarize`])
//!
//! # Usage Example
//!
//! ```ignore
//! use ragconf::diagnostics::TracingSink;
//! use ragconf::models::{FileFormat, ProcessingConfig, ProcessingStrategy};
//! use ragconf::services::{execution_order, summarize, validate, with_strategy};
//!
//! let config = ProcessingConfig::default();
//! let config = with_strategy(&config, FileFormat::Pdf, ProcessingStrategy::PrimaryFirst, &TracingSink);
//!
//! assert!(validate(&config).is_empty());
//! let order = execution_order(&config, FileFormat::Pdf);
//! summarize(&config).log_summary(&TracingSink);
//! ```

pub mod compliance;
pub mod environment;
pub mod merge;
pub mod mutation;
pub mod report;
pub mod strategy;
pub mod validation;

pub use compliance::regulations_for;
pub use environment::{apply_environment, regional_defaults, resolve_global_config};
pub use merge::{Overlay, merge};
pub use mutation::{with_strategies, with_strategy};
pub use report::{FormatReportRow, ProcessingReport, ReportSummary, summarize};
pub use strategy::{
    execution_order, is_file_size_valid, is_format_enabled, needs_comparison, uses_primary,
    uses_secondary,
};
pub use validation::{Violation, validate};
