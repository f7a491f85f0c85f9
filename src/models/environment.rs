use super::processing::{
    LogLevel, PartialLoggingConfig, PartialPerformanceConfig, PartialProcessingConfig,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Deployment stage a configuration is resolved for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

/// Per-environment processing overrides, as stored in the override document.
///
/// ```yaml
/// dev:
///   logging:
///     level: debug
/// prod:
///   performance:
///     max_concurrent_processes: 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<PartialProcessingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<PartialProcessingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod: Option<PartialProcessingConfig>,
}

impl EnvironmentOverrides {
    pub fn for_environment(&self, environment: Environment) -> Option<&PartialProcessingConfig> {
        match environment {
            Environment::Dev => self.dev.as_ref(),
            Environment::Staging => self.staging.as_ref(),
            Environment::Prod => self.prod.as_ref(),
        }
    }

    /// Override set shipped with the engine: verbose and small in dev,
    /// quiet and wide in prod.
    pub fn builtin() -> Self {
        const MIB: u64 = 1024 * 1024;

        let tier = |level: LogLevel,
                    detailed_logs: bool,
                    max_mib: u64,
                    memory_mb: u32,
                    parallel: bool,
                    processes: u32| {
            PartialProcessingConfig {
                logging: Some(PartialLoggingConfig {
                    level: Some(level),
                    detailed_logs: Some(detailed_logs),
                    performance_logs: Some(true),
                    error_tracking: Some(true),
                }),
                performance: Some(PartialPerformanceConfig {
                    max_file_size_bytes: Some(max_mib * MIB),
                    memory_limit_mb: Some(memory_mb),
                    parallel_processing: Some(parallel),
                    max_concurrent_processes: Some(processes),
                }),
                ..Default::default()
            }
        };

        Self {
            dev: Some(tier(LogLevel::Debug, true, 5, 512, false, 1)),
            staging: Some(tier(LogLevel::Info, true, 10, 1024, true, 2)),
            prod: Some(tier(LogLevel::Warn, false, 50, 3008, true, 5)),
        }
    }
}
