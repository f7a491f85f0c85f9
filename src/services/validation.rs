use crate::models::{
    FileFormat, FormatConfig, ProcessingConfig, ProcessingStrategy,
    processing::{
        CONCURRENCY_RANGE, MAX_FILE_SIZE_BYTES, MAX_FORMAT_TIMEOUT_SECONDS, MAX_MEMORY_LIMIT_MB,
        MAX_TEMP_FILE_RETENTION_MINUTES,
    },
};
use thiserror::Error;

/// A rule a [`ProcessingConfig`] breaks.
///
/// `enabled` being a boolean is guaranteed by the type and is not checked here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{format}: timeout must be between 1 and {max} seconds, got {value}", max = MAX_FORMAT_TIMEOUT_SECONDS)]
    TimeoutOutOfRange { format: FileFormat, value: u32 },

    #[error("performance.max_file_size_bytes must be positive")]
    NonPositiveFileSize,

    #[error("performance.max_file_size_bytes {0} exceeds 500MiB")]
    FileSizeLimitExceeded(u64),

    #[error("performance.memory_limit_mb must be positive")]
    NonPositiveMemoryLimit,

    #[error("performance.memory_limit_mb {0} exceeds {max}MB", max = MAX_MEMORY_LIMIT_MB)]
    MemoryLimitExceeded(u32),

    #[error("performance.max_concurrent_processes must be between 1 and 10, got {0}")]
    ConcurrencyOutOfRange(u32),

    #[error("security.temp_file_retention_minutes {0} exceeds {max} minutes", max = MAX_TEMP_FILE_RETENTION_MINUTES)]
    RetentionTooLong(u32),

    #[error("{format}: uses_primary={actual} does not match strategy {strategy}")]
    PrimaryFlagMismatch {
        format: FileFormat,
        strategy: ProcessingStrategy,
        actual: bool,
    },

    #[error("{format}: uses_secondary={actual} does not match strategy {strategy}")]
    SecondaryFlagMismatch {
        format: FileFormat,
        strategy: ProcessingStrategy,
        actual: bool,
    },

    #[error("{format}: quality comparison is only allowed with both-compare, strategy is {strategy}")]
    ComparisonNotAllowed {
        format: FileFormat,
        strategy: ProcessingStrategy,
    },
}

impl Violation {
    /// `true` for violations of the strategy-flag invariants, as opposed to
    /// range checks.
    pub fn is_strategy_inconsistency(&self) -> bool {
        matches!(
            self,
            Self::PrimaryFlagMismatch { .. }
                | Self::SecondaryFlagMismatch { .. }
                | Self::ComparisonNotAllowed { .. }
        )
    }
}

/// Check every rule and return all violations found. An empty list means
/// the config is valid.
pub fn validate(config: &ProcessingConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (format, format_config) in &config.formats {
        validate_format(*format, format_config, &mut violations);
    }

    let performance = &config.performance;
    if performance.max_file_size_bytes == 0 {
        violations.push(Violation::NonPositiveFileSize);
    } else if performance.max_file_size_bytes > MAX_FILE_SIZE_BYTES {
        violations.push(Violation::FileSizeLimitExceeded(
            performance.max_file_size_bytes,
        ));
    }

    if performance.memory_limit_mb == 0 {
        violations.push(Violation::NonPositiveMemoryLimit);
    } else if performance.memory_limit_mb > MAX_MEMORY_LIMIT_MB {
        violations.push(Violation::MemoryLimitExceeded(performance.memory_limit_mb));
    }

    if !CONCURRENCY_RANGE.contains(&performance.max_concurrent_processes) {
        violations.push(Violation::ConcurrencyOutOfRange(
            performance.max_concurrent_processes,
        ));
    }

    if config.security.temp_file_retention_minutes > MAX_TEMP_FILE_RETENTION_MINUTES {
        violations.push(Violation::RetentionTooLong(
            config.security.temp_file_retention_minutes,
        ));
    }

    violations
}

fn validate_format(format: FileFormat, config: &FormatConfig, violations: &mut Vec<Violation>) {
    if config.timeout_seconds == 0 || config.timeout_seconds > MAX_FORMAT_TIMEOUT_SECONDS {
        violations.push(Violation::TimeoutOutOfRange {
            format,
            value: config.timeout_seconds,
        });
    }

    let behavior = config.strategy.behavior();

    if config.uses_primary != behavior.uses_primary {
        violations.push(Violation::PrimaryFlagMismatch {
            format,
            strategy: config.strategy,
            actual: config.uses_primary,
        });
    }

    if config.uses_secondary != behavior.uses_secondary {
        violations.push(Violation::SecondaryFlagMismatch {
            format,
            strategy: config.strategy,
            actual: config.uses_secondary,
        });
    }

    if config.comparison_enabled && !behavior.requires_comparison {
        violations.push(Violation::ComparisonNotAllowed {
            format,
            strategy: config.strategy,
        });
    }
}
