//! Declarative data for the resolution engine.
//!
//! This module holds the value types and the hand-authored tables the services operate on:
//! - [`ProcessingStrategy`] and its [`StrategyBehavior`] rows: the single source of truth for
//!   which conversion methods a strategy uses
//! - [`FileFormat`] and [`FormatCategory`]: the closed set of supported formats, their size
//!   limits and recommended strategies
//! - [`ProcessingConfig`]: document-conversion settings, with [`PartialProcessingConfig`] as the
//!   shape of an override document
//! - [`Environment`] and [`EnvironmentOverrides`]: deployment stages and per-stage overrides
//! - [`GlobalConfig`], [`FeatureSet`], [`Region`] and [`ComplianceRegulation`]: platform-level
//!   configuration per region and environment
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: every config struct derives `Serialize`/`Deserialize` for YAML/JSON documents
//! - **Closed**: strategies, formats, environments and regions are enums, so a new variant is a
//!   compile-time change everywhere it is matched
//! - **Values**: nothing here holds shared state; resolution always builds fresh values

pub mod environment;
pub mod format;
pub mod global;
pub mod processing;
pub mod strategy;

pub use environment::{Environment, EnvironmentOverrides};
pub use format::{FileFormat, FormatCategory};
pub use global::{
    ComplianceConfig, ComplianceRegulation, DataProtection, DataRetention, FeatureSet,
    GlobalConfig, Region, RegionProfile, RegionalDefaults, fallback_regulations,
};
pub use processing::{
    FallbackConfig, FormatConfig, LogLevel, LoggingConfig, PartialFallbackConfig,
    PartialFormatConfig, PartialLoggingConfig, PartialPerformanceConfig, PartialProcessingConfig,
    PartialQualityConfig, PartialSecurityConfig, PerformanceConfig, ProcessingConfig,
    QualityConfig, QualityLevel, SecurityConfig,
};
pub use strategy::{ConversionMethod, ProcessingStrategy, StrategyBehavior};
