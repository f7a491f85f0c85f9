pub mod settings;
pub mod source;

pub use settings::EngineSettings;
use source::BaseDocument;
pub use source::{
    BuiltinOverrides, FileOverrides, OverrideLoader, OverrideSource, SourceError, StaticOverrides,
    load_base_config, read_document, try_load_base_config,
};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::models::{
    ComplianceRegulation, Environment, FileFormat, GlobalConfig, PartialProcessingConfig,
    ProcessingConfig, ProcessingStrategy, RegionalDefaults,
};
use crate::services::{self, ProcessingReport, Violation};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::str::FromStr;
use std::sync::Arc;

const BASE_TEMPLATE_HEADER: &str = "\
# Base document-conversion settings.
#
# strategy: primary-only | secondary-only | primary-first | secondary-first | both-compare | auto-select
# uses_primary / uses_secondary are derived from the strategy and corrected on load.
# comparison_enabled is only honored for both-compare.
# Per-environment changes belong in the override document (dev / staging / prod keys).
";

/// Entry point for resolving configuration from on-disk documents.
///
/// Manages two read-only documents:
/// - Base config (`processing.yaml`): the full processing config under the `processing` key
/// - Override config (`processing-overrides.yaml`): partial processing configs keyed by
///   `dev` / `staging` / `prod`
///
/// Documents are re-read on every resolution, so edits take effect without
/// rebuilding the manager. The manager holds no mutable state and can be
/// shared across threads (it is `Clone`, `Send` and `Sync`).
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    base_config_path: Utf8PathBuf,
    overrides: Arc<dyn OverrideSource>,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("config_dir", &self.config_dir)
            .field("base_config_path", &self.base_config_path)
            .field("overrides", &self.overrides.describe())
            .finish_non_exhaustive()
    }
}

impl ConfigManager {
    /// Create a ConfigManager reading the default document names from `config_dir`.
    ///
    /// The directory does not have to exist; missing documents resolve to the
    /// built-in defaults.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing `processing.yaml` and `processing-overrides.yaml`
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        Self::from_settings(&EngineSettings {
            config_dir: config_dir.as_ref().to_path_buf(),
            ..EngineSettings::default()
        })
    }

    /// Create a ConfigManager from loaded [`EngineSettings`].
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let overrides: Arc<dyn OverrideSource> = if settings.builtin_overrides {
            Arc::new(BuiltinOverrides)
        } else {
            Arc::new(FileOverrides::new(settings.override_path()))
        };

        Self {
            config_dir: settings.config_dir.clone(),
            base_config_path: settings.base_config_path(),
            overrides,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink (defaults to [`TracingSink`]).
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace where environment overrides come from.
    pub fn with_override_source(mut self, overrides: Arc<dyn OverrideSource>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load the base processing config, distinguishing "absent" from "broken".
    ///
    /// # Returns
    /// `Ok(None)` if the document or its `processing` key is missing
    pub fn try_load_base_config(&self) -> Result<Option<ProcessingConfig>, SourceError> {
        try_load_base_config(&self.base_config_path)
    }

    /// Load the base processing config.
    ///
    /// # Returns
    /// The loaded config with format entries normalized, or the built-in
    /// default if the document is missing or unreadable
    pub fn load_base_config(&self) -> ProcessingConfig {
        load_base_config(&self.base_config_path, self.sink.as_ref())
    }

    /// Write a commented base document holding the built-in defaults.
    ///
    /// Creates the configuration directory if needed and overwrites any
    /// existing base document.
    pub fn write_base_template(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("Failed to create config directory: {}", self.config_dir)
            })?;
        }

        let document = BaseDocument {
            processing: Some(ProcessingConfig::default()),
        };
        let yaml_string = serde_yaml_ng::to_string(&document)
            .context("Failed to serialize base config template to YAML")?;

        fs::write(
            &self.base_config_path,
            format!("{}{}", BASE_TEMPLATE_HEADER, yaml_string),
        )
        .with_context(|| format!("Failed to write base config: {}", self.base_config_path))?;

        self.sink.info(&format!(
            "Wrote base config template to {}",
            self.base_config_path
        ));
        Ok(())
    }

    /// Load the partial override for `environment`, or an empty one.
    pub fn load_overrides(&self, environment: Option<&str>) -> PartialProcessingConfig {
        OverrideLoader::new(self.overrides.as_ref()).load(environment, self.sink.as_ref())
    }

    /// Resolve the processing config for an environment.
    ///
    /// Base document (or built-in default) merged with the environment's
    /// override. Never fails.
    ///
    /// # Arguments
    /// * `environment` - `dev`, `staging` or `prod`; `None` or anything else applies no override
    pub fn resolve_processing_config(&self, environment: Option<&str>) -> ProcessingConfig {
        let base = self.load_base_config();
        let overrides = self.load_overrides(environment);

        if overrides.is_empty() {
            return base;
        }

        services::merge(&base, &overrides)
    }

    /// Resolve the global config for a region and environment.
    ///
    /// The document-conversion feature flag follows the processing config
    /// resolved for the same environment. An unknown environment name is
    /// reported once, by the feature resolver, and no override is applied.
    pub fn resolve_global_config(
        &self,
        environment: &str,
        region: &str,
        project_name: &str,
    ) -> GlobalConfig {
        let known = Environment::from_str(environment).is_ok();
        let processing = self.resolve_processing_config(known.then_some(environment));
        services::resolve_global_config(
            environment,
            region,
            project_name,
            &processing,
            self.sink.as_ref(),
        )
    }

    pub fn regional_defaults(&self, region: &str) -> RegionalDefaults {
        services::regional_defaults(region, self.sink.as_ref())
    }

    pub fn regulations_for(&self, region: &str) -> BTreeSet<ComplianceRegulation> {
        services::regulations_for(region, self.sink.as_ref())
    }

    pub fn with_strategy(
        &self,
        config: &ProcessingConfig,
        format: FileFormat,
        strategy: ProcessingStrategy,
    ) -> ProcessingConfig {
        services::with_strategy(config, format, strategy, self.sink.as_ref())
    }

    pub fn with_strategies<I>(&self, config: &ProcessingConfig, updates: I) -> ProcessingConfig
    where
        I: IntoIterator<Item = (FileFormat, ProcessingStrategy)>,
    {
        services::with_strategies(config, updates, self.sink.as_ref())
    }

    pub fn validate(&self, config: &ProcessingConfig) -> Vec<Violation> {
        services::validate(config)
    }

    /// Build the processing report and log its summary through the sink.
    pub fn summarize(&self, config: &ProcessingConfig) -> ProcessingReport {
        let report = services::summarize(config);
        report.log_summary(self.sink.as_ref());
        report
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn base_config_path(&self) -> &Utf8Path {
        &self.base_config_path
    }
}
