//! Reading base and override documents.
//!
//! Every reader here has two layers:
//! - a `try_*` function returning `Result<Option<T>, SourceError>`, where `Ok(None)` means the
//!   document (or the requested key) is simply not there and `Err` means it is there but could not
//!   be read or parsed
//! - a fail-open wrapper that turns any of those outcomes into the documented default and reports
//!   a [`ConfigWarning::SourceUnavailable`] for the error case

use crate::diagnostics::{ConfigWarning, DiagnosticSink, SourceKind};
use crate::models::{Environment, EnvironmentOverrides, PartialProcessingConfig, ProcessingConfig};
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::str::FromStr;
use thiserror::Error;

/// Why a document that exists could not be used.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: Utf8PathBuf, message: String },
}

/// Read and deserialize a YAML (or, for `.json` files, JSON) document.
///
/// A missing file is `Ok(None)`.
pub fn read_document<T: DeserializeOwned>(path: &Utf8Path) -> Result<Option<T>, SourceError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SourceError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let parse_error = |message: String| SourceError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let document = if is_json {
        serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
    } else {
        serde_yaml_ng::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
    };

    Ok(Some(document))
}

/// Shape of the base document: the full processing config under `processing`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct BaseDocument {
    pub(crate) processing: Option<ProcessingConfig>,
}

/// Load the base processing config from `path`.
///
/// `Ok(None)` when the file or its `processing` key is absent.
pub fn try_load_base_config(path: &Utf8Path) -> Result<Option<ProcessingConfig>, SourceError> {
    Ok(read_document::<BaseDocument>(path)?.and_then(|doc| doc.processing))
}

/// Load the base processing config, falling back to
/// [`ProcessingConfig::default`] on any problem.
///
/// Format entries whose flags disagree with their strategy are normalized and
/// reported as [`ConfigWarning::FormatNormalized`].
pub fn load_base_config(path: &Utf8Path, sink: &dyn DiagnosticSink) -> ProcessingConfig {
    let mut config = match try_load_base_config(path) {
        Ok(Some(config)) => {
            sink.info(&format!("Loaded base processing config from {}", path));
            config
        }
        Ok(None) => {
            sink.info(&format!(
                "No base processing config at {}, using built-in defaults",
                path
            ));
            ProcessingConfig::default()
        }
        Err(e) => {
            sink.warn(&ConfigWarning::SourceUnavailable {
                kind: SourceKind::BaseConfig,
                reason: e.to_string(),
            });
            ProcessingConfig::default()
        }
    };

    for (format, format_config) in config.formats.iter_mut() {
        if format_config.normalize() {
            sink.warn(&ConfigWarning::FormatNormalized(*format));
        }
    }

    config
}

/// Where per-environment overrides come from.
#[cfg_attr(test, mockall::automock)]
pub trait OverrideSource: Send + Sync {
    /// The whole override document, or `Ok(None)` if there is none.
    fn overrides(&self) -> Result<Option<EnvironmentOverrides>, SourceError>;

    /// Human-readable origin for log messages.
    fn describe(&self) -> String;
}

/// Overrides read from a YAML/JSON file on every call.
#[derive(Debug, Clone)]
pub struct FileOverrides {
    path: Utf8PathBuf,
}

impl FileOverrides {
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl OverrideSource for FileOverrides {
    fn overrides(&self) -> Result<Option<EnvironmentOverrides>, SourceError> {
        read_document(&self.path)
    }

    fn describe(&self) -> String {
        self.path.to_string()
    }
}

/// The override set compiled into the crate
/// ([`EnvironmentOverrides::builtin`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOverrides;

impl OverrideSource for BuiltinOverrides {
    fn overrides(&self) -> Result<Option<EnvironmentOverrides>, SourceError> {
        Ok(Some(EnvironmentOverrides::builtin()))
    }

    fn describe(&self) -> String {
        "built-in overrides".to_string()
    }
}

/// An override document supplied directly by the caller.
#[derive(Debug, Clone, Default)]
pub struct StaticOverrides(pub EnvironmentOverrides);

impl OverrideSource for StaticOverrides {
    fn overrides(&self) -> Result<Option<EnvironmentOverrides>, SourceError> {
        Ok(Some(self.0.clone()))
    }

    fn describe(&self) -> String {
        "caller-supplied overrides".to_string()
    }
}

/// Looks up the partial override for one environment.
pub struct OverrideLoader<'a> {
    source: &'a dyn OverrideSource,
}

impl<'a> OverrideLoader<'a> {
    pub fn new(source: &'a dyn OverrideSource) -> Self {
        Self { source }
    }

    /// The override for `environment`, `Ok(None)` if the document or the key
    /// is absent.
    pub fn try_load(
        &self,
        environment: Environment,
    ) -> Result<Option<PartialProcessingConfig>, SourceError> {
        Ok(self
            .source
            .overrides()?
            .and_then(|doc| doc.for_environment(environment).cloned()))
    }

    /// Fail-open lookup: any missing piece (no environment given, unknown
    /// environment name, no document, no key) or read error yields an empty
    /// override.
    pub fn load(
        &self,
        environment: Option<&str>,
        sink: &dyn DiagnosticSink,
    ) -> PartialProcessingConfig {
        let Some(name) = environment else {
            return PartialProcessingConfig::default();
        };

        let Ok(environment) = Environment::from_str(name) else {
            sink.warn(&ConfigWarning::UnknownEnvironment(name.to_string()));
            return PartialProcessingConfig::default();
        };

        match self.try_load(environment) {
            Ok(Some(partial)) => {
                sink.info(&format!(
                    "Applying {} processing overrides from {}",
                    environment,
                    self.source.describe()
                ));
                partial
            }
            Ok(None) => PartialProcessingConfig::default(),
            Err(e) => {
                sink.warn(&ConfigWarning::SourceUnavailable {
                    kind: SourceKind::Overrides,
                    reason: e.to_string(),
                });
                PartialProcessingConfig::default()
            }
        }
    }
}
