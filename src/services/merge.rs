//! Group-wise merge of a base [`ProcessingConfig`] with a partial override.
//!
//! Each group (`formats`, `performance`, `fallback`, `security`, `logging`,
//! `quality`) is overlaid independently: only the keys the override sets are
//! replaced, everything else keeps the base value. Format entries are merged
//! field by field and then normalized, so a merged config always satisfies
//! the strategy-flag invariants.

use crate::models::{
    FallbackConfig, FormatConfig, LoggingConfig, PartialFallbackConfig, PartialFormatConfig,
    PartialLoggingConfig, PartialPerformanceConfig, PartialProcessingConfig, PartialQualityConfig,
    PartialSecurityConfig, PerformanceConfig, ProcessingConfig, QualityConfig, SecurityConfig,
};

/// A partial value that knows how to write its set fields onto a full one.
pub trait Overlay<T> {
    /// Write every field that is `Some` onto `target`, leave the rest alone.
    fn overlay(&self, target: &mut T);
}

/// Copy each `Some` field of `$partial` onto the same-named field of `$target`.
macro_rules! overlay_fields {
    ($partial:expr, $target:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = &$partial.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

impl Overlay<PerformanceConfig> for PartialPerformanceConfig {
    fn overlay(&self, target: &mut PerformanceConfig) {
        overlay_fields!(
            self,
            target,
            [
                max_file_size_bytes,
                memory_limit_mb,
                parallel_processing,
                max_concurrent_processes,
            ]
        );
    }
}

impl Overlay<FallbackConfig> for PartialFallbackConfig {
    fn overlay(&self, target: &mut FallbackConfig) {
        overlay_fields!(
            self,
            target,
            [
                enabled,
                use_secondary_on_failure,
                retry_attempts,
                retry_delay_ms
            ]
        );
    }
}

impl Overlay<SecurityConfig> for PartialSecurityConfig {
    fn overlay(&self, target: &mut SecurityConfig) {
        overlay_fields!(
            self,
            target,
            [
                validate_file_type,
                validate_file_size,
                encrypt_temp_files,
                auto_delete_temp_files,
                temp_file_retention_minutes,
                enable_malware_scan,
                allowed_mime_types,
            ]
        );
    }
}

impl Overlay<LoggingConfig> for PartialLoggingConfig {
    fn overlay(&self, target: &mut LoggingConfig) {
        overlay_fields!(
            self,
            target,
            [level, detailed_logs, performance_logs, error_tracking]
        );
    }
}

impl Overlay<QualityConfig> for PartialQualityConfig {
    fn overlay(&self, target: &mut QualityConfig) {
        overlay_fields!(
            self,
            target,
            [
                ocr_accuracy,
                text_extraction_quality,
                preserve_formatting,
                preserve_images
            ]
        );
    }
}

impl Overlay<FormatConfig> for PartialFormatConfig {
    fn overlay(&self, target: &mut FormatConfig) {
        overlay_fields!(self, target, [enabled, timeout_seconds, description]);

        if self.ocr_enabled.is_some() {
            target.ocr_enabled = self.ocr_enabled;
        }
        if let Some(strategy) = self.strategy {
            target.apply_strategy(strategy);
        }
        if let Some(comparison) = self.comparison_enabled {
            target.comparison_enabled = comparison;
        }

        target.normalize();
    }
}

impl Overlay<ProcessingConfig> for PartialProcessingConfig {
    fn overlay(&self, target: &mut ProcessingConfig) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }

        if let Some(formats) = &self.formats {
            for (format, partial) in formats {
                let entry = target
                    .formats
                    .entry(*format)
                    .or_insert_with(|| FormatConfig::recommended(*format));
                partial.overlay(entry);
            }
        }

        if let Some(performance) = &self.performance {
            performance.overlay(&mut target.performance);
        }
        if let Some(fallback) = &self.fallback {
            fallback.overlay(&mut target.fallback);
        }
        if let Some(security) = &self.security {
            security.overlay(&mut target.security);
        }
        if let Some(logging) = &self.logging {
            logging.overlay(&mut target.logging);
        }
        if let Some(quality) = &self.quality {
            quality.overlay(&mut target.quality);
        }
    }
}

/// Merge `override_config` onto a copy of `base`.
pub fn merge(
    base: &ProcessingConfig,
    override_config: &PartialProcessingConfig,
) -> ProcessingConfig {
    let mut merged = base.clone();
    override_config.overlay(&mut merged);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileFormat, LogLevel, ProcessingStrategy};
    use indexmap::IndexMap;

    #[test]
    fn test_empty_override_is_identity() {
        let base = ProcessingConfig::default();
        assert_eq!(merge(&base, &PartialProcessingConfig::default()), base);
    }

    #[test]
    fn test_untouched_groups_survive() {
        let base = ProcessingConfig::default();
        let override_config = PartialProcessingConfig {
            performance: Some(PartialPerformanceConfig {
                max_file_size_bytes: Some(42_000),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge(&base, &override_config);

        assert_eq!(merged.performance.max_file_size_bytes, 42_000);
        assert_eq!(
            merged.performance.memory_limit_mb,
            base.performance.memory_limit_mb
        );
        assert_eq!(merged.formats[&FileFormat::Pdf].timeout_seconds, 120);
        assert_eq!(merged.formats, base.formats);
        assert_eq!(merged.logging, base.logging);
    }

    #[test]
    fn test_enabled_is_overwritten_wholesale() {
        let base = ProcessingConfig::default();
        let override_config = PartialProcessingConfig {
            enabled: Some(false),
            ..Default::default()
        };

        let merged = merge(&base, &override_config);

        assert!(!merged.enabled);
        assert_eq!(merged.formats, base.formats);
    }

    #[test]
    fn test_format_override_merges_fields() {
        let base = ProcessingConfig::default();
        let mut formats = IndexMap::new();
        formats.insert(
            FileFormat::Pdf,
            PartialFormatConfig {
                timeout_seconds: Some(300),
                ..Default::default()
            },
        );
        let override_config = PartialProcessingConfig {
            formats: Some(formats),
            ..Default::default()
        };

        let merged = merge(&base, &override_config);
        let pdf = &merged.formats[&FileFormat::Pdf];

        assert_eq!(pdf.timeout_seconds, 300);
        assert_eq!(pdf.strategy, ProcessingStrategy::BothCompare);
        assert!(pdf.comparison_enabled);
        assert_eq!(
            merged.formats[&FileFormat::Docx],
            base.formats[&FileFormat::Docx]
        );
    }

    #[test]
    fn test_strategy_override_rederives_flags() {
        let base = ProcessingConfig::default();
        let mut formats = IndexMap::new();
        formats.insert(
            FileFormat::Csv,
            PartialFormatConfig {
                strategy: Some(ProcessingStrategy::PrimaryOnly),
                comparison_enabled: Some(true),
                ..Default::default()
            },
        );
        let override_config = PartialProcessingConfig {
            formats: Some(formats),
            ..Default::default()
        };

        let csv = merge(&base, &override_config).formats[&FileFormat::Csv].clone();

        assert!(csv.uses_primary);
        assert!(!csv.uses_secondary);
        assert!(
            !csv.comparison_enabled,
            "comparison is only allowed for both-compare"
        );
    }

    #[test]
    fn test_format_missing_from_base_starts_from_recommendation() {
        let mut base = ProcessingConfig::default();
        base.formats.shift_remove(&FileFormat::Gif);

        let mut formats = IndexMap::new();
        formats.insert(
            FileFormat::Gif,
            PartialFormatConfig {
                timeout_seconds: Some(45),
                ..Default::default()
            },
        );
        let override_config = PartialProcessingConfig {
            formats: Some(formats),
            ..Default::default()
        };

        let merged = merge(&base, &override_config);
        let gif = &merged.formats[&FileFormat::Gif];

        assert_eq!(gif.timeout_seconds, 45);
        assert_eq!(gif.strategy, ProcessingStrategy::PrimaryOnly);
        assert_eq!(gif.ocr_enabled, Some(true));
    }

    #[test]
    fn test_logging_partial_keeps_other_keys() {
        let base = ProcessingConfig::default();
        let override_config = PartialProcessingConfig {
            logging: Some(PartialLoggingConfig {
                level: Some(LogLevel::Debug),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge(&base, &override_config);

        assert_eq!(merged.logging.level, LogLevel::Debug);
        assert_eq!(merged.logging.detailed_logs, base.logging.detailed_logs);
        assert_eq!(merged.logging.error_tracking, base.logging.error_tracking);
    }
}
