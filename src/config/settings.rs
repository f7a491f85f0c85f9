use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use serde::Deserialize;
use std::collections::HashMap;

/// Prefix of the environment variables read by [`EngineSettings::load`].
pub const ENV_PREFIX: &str = "RAGCONF";

/// Where the engine finds its documents and how it logs.
///
/// Every field can be set from a `RAGCONF_<FIELD>` environment variable,
/// e.g. `RAGCONF_CONFIG_DIR=/etc/ragconf` or `RAGCONF_BUILTIN_OVERRIDES=true`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    /// Directory holding the base and override documents
    pub config_dir: Utf8PathBuf,

    /// Base document name, relative to `config_dir`
    pub base_file: String,

    /// Override document name, relative to `config_dir`
    pub override_file: String,

    /// Use the compiled-in override set instead of `override_file`
    pub builtin_overrides: bool,

    /// Directory for rotating log files
    pub log_dir: Utf8PathBuf,

    pub debug: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            config_dir: Utf8PathBuf::from("config"),
            base_file: "processing.yaml".to_string(),
            override_file: "processing-overrides.yaml".to_string(),
            builtin_overrides: false,
            log_dir: Utf8PathBuf::from("logs"),
            debug: false,
        }
    }
}

impl EngineSettings {
    /// Load settings from defaults overlaid with `RAGCONF_*` process
    /// environment variables.
    pub fn load() -> Result<Self> {
        Self::build(None)
    }

    /// Load settings from defaults overlaid with the given variables instead
    /// of the process environment. Keys use the same `RAGCONF_*` names.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::build(Some(vars))
    }

    fn build(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("config_dir", defaults.config_dir.as_str())?
            .set_default("base_file", defaults.base_file)?
            .set_default("override_file", defaults.override_file)?
            .set_default("builtin_overrides", defaults.builtin_overrides)?
            .set_default("log_dir", defaults.log_dir.as_str())?
            .set_default("debug", defaults.debug)?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .context("Failed to assemble engine settings")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize engine settings")
    }

    /// Full path of the base document.
    pub fn base_config_path(&self) -> Utf8PathBuf {
        self.config_dir.join(&self.base_file)
    }

    /// Full path of the override document.
    pub fn override_path(&self) -> Utf8PathBuf {
        self.config_dir.join(&self.override_file)
    }
}
