//! Per-format questions asked of a resolved [`ProcessingConfig`].

use crate::models::{
    ConversionMethod, FileFormat, FormatCategory, ProcessingConfig, ProcessingStrategy,
};

/// `true` when the format is configured, enabled, and processing is enabled
/// globally.
pub fn is_format_enabled(config: &ProcessingConfig, format: FileFormat) -> bool {
    config.enabled
        && config
            .formats
            .get(&format)
            .is_some_and(|format_config| format_config.enabled)
}

/// Accept `size_bytes` if it fits both the format's own limit and the
/// configured global limit.
pub fn is_file_size_valid(config: &ProcessingConfig, format: FileFormat, size_bytes: u64) -> bool {
    size_bytes
        <= format
            .size_limit_bytes()
            .min(config.performance.max_file_size_bytes)
}

/// Should the primary method run for this format?
///
/// Gated on the global `enabled` flag as well as the format's own flag.
pub fn uses_primary(config: &ProcessingConfig, format: FileFormat) -> bool {
    config.enabled
        && config
            .formats
            .get(&format)
            .is_some_and(|format_config| format_config.enabled && format_config.uses_primary)
}

/// Should the secondary method run for this format?
///
/// Only the format-level `enabled` flag is consulted here, not the global
/// one. Callers that switch processing off globally still see `true` for
/// formats that use the secondary method.
// TODO: decide with the report and harness owners whether the global gate
// should apply here too, then align with `uses_primary`.
pub fn uses_secondary(config: &ProcessingConfig, format: FileFormat) -> bool {
    config
        .formats
        .get(&format)
        .is_some_and(|format_config| format_config.enabled && format_config.uses_secondary)
}

/// Order in which the conversion methods should be attempted.
///
/// A missing or disabled format yields an empty list. `auto-select` ignores
/// the per-format flags and orders by [`FormatCategory`].
pub fn execution_order(config: &ProcessingConfig, format: FileFormat) -> Vec<ConversionMethod> {
    use ConversionMethod::{Primary, Secondary};

    let Some(format_config) = config.formats.get(&format).filter(|fc| fc.enabled) else {
        return Vec::new();
    };

    let flagged = |method: ConversionMethod| match method {
        Primary => format_config.uses_primary,
        Secondary => format_config.uses_secondary,
    };
    let filtered = |order: [ConversionMethod; 2]| -> Vec<ConversionMethod> {
        order.into_iter().filter(|m| flagged(*m)).collect()
    };

    match format_config.strategy {
        ProcessingStrategy::PrimaryOnly => {
            if format_config.uses_primary {
                vec![Primary]
            } else {
                Vec::new()
            }
        }
        ProcessingStrategy::SecondaryOnly => {
            if format_config.uses_secondary {
                vec![Secondary]
            } else {
                Vec::new()
            }
        }
        ProcessingStrategy::PrimaryFirst | ProcessingStrategy::BothCompare => {
            filtered([Primary, Secondary])
        }
        ProcessingStrategy::SecondaryFirst => filtered([Secondary, Primary]),
        ProcessingStrategy::AutoSelect => auto_selected_order(format),
    }
}

fn auto_selected_order(format: FileFormat) -> Vec<ConversionMethod> {
    use ConversionMethod::{Primary, Secondary};

    match format.category() {
        FormatCategory::Office => vec![Primary, Secondary],
        FormatCategory::Image => vec![Primary],
        FormatCategory::Data => vec![Secondary],
        FormatCategory::Document => vec![Secondary, Primary],
    }
}

/// Should both methods' outputs be compared for quality?
pub fn needs_comparison(config: &ProcessingConfig, format: FileFormat) -> bool {
    config.formats.get(&format).is_some_and(|format_config| {
        format_config.comparison_enabled
            && format_config.strategy == ProcessingStrategy::BothCompare
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormatConfig;
    use ConversionMethod::{Primary, Secondary};

    fn config_with(format: FileFormat, strategy: ProcessingStrategy) -> ProcessingConfig {
        let mut config = ProcessingConfig::default();
        config
            .formats
            .insert(format, FormatConfig::from_strategy(strategy, 30, "test", false));
        config
    }

    #[test]
    fn test_csv_defaults_to_secondary() {
        let config = ProcessingConfig::default();
        assert_eq!(execution_order(&config, FileFormat::Csv), vec![Secondary]);
    }

    #[test]
    fn test_explicit_orders() {
        let config = config_with(FileFormat::Html, ProcessingStrategy::PrimaryFirst);
        assert_eq!(
            execution_order(&config, FileFormat::Html),
            vec![Primary, Secondary]
        );

        let config = config_with(FileFormat::Html, ProcessingStrategy::SecondaryFirst);
        assert_eq!(
            execution_order(&config, FileFormat::Html),
            vec![Secondary, Primary]
        );

        let config = config_with(FileFormat::Html, ProcessingStrategy::BothCompare);
        assert_eq!(
            execution_order(&config, FileFormat::Html),
            vec![Primary, Secondary]
        );
    }

    #[test]
    fn test_order_filters_by_flags() {
        let mut config = config_with(FileFormat::Xml, ProcessingStrategy::SecondaryFirst);
        config.formats[&FileFormat::Xml].uses_primary = false;
        assert_eq!(execution_order(&config, FileFormat::Xml), vec![Secondary]);

        let mut config = config_with(FileFormat::Png, ProcessingStrategy::PrimaryOnly);
        config.formats[&FileFormat::Png].uses_primary = false;
        assert!(execution_order(&config, FileFormat::Png).is_empty());
    }

    #[test]
    fn test_auto_select_by_category() {
        let cases = [
            (FileFormat::Pptx, vec![Primary, Secondary]),
            (FileFormat::Jpg, vec![Primary]),
            (FileFormat::Tsv, vec![Secondary]),
            (FileFormat::Pdf, vec![Secondary, Primary]),
        ];

        for (format, expected) in cases {
            let config = config_with(format, ProcessingStrategy::AutoSelect);
            assert_eq!(
                execution_order(&config, format),
                expected,
                "auto-select order for {}",
                format
            );
        }
    }

    #[test]
    fn test_disabled_or_missing_format_has_no_order() {
        let mut config = ProcessingConfig::default();
        config.formats[&FileFormat::Docx].enabled = false;
        config.formats.shift_remove(&FileFormat::Gif);

        assert!(execution_order(&config, FileFormat::Docx).is_empty());
        assert!(execution_order(&config, FileFormat::Gif).is_empty());
        assert!(!uses_primary(&config, FileFormat::Gif));
        assert!(!uses_secondary(&config, FileFormat::Gif));
    }

    #[test]
    fn test_global_gate_applies_to_primary_only() {
        let mut config = ProcessingConfig::default();
        config.enabled = false;

        assert!(!uses_primary(&config, FileFormat::Docx));
        assert!(uses_secondary(&config, FileFormat::Docx));
        assert!(!is_format_enabled(&config, FileFormat::Docx));
    }

    #[test]
    fn test_needs_comparison() {
        let config = ProcessingConfig::default();
        assert!(needs_comparison(&config, FileFormat::Pdf));
        assert!(!needs_comparison(&config, FileFormat::Docx));

        let mut config = ProcessingConfig::default();
        config.formats[&FileFormat::Docx].comparison_enabled = true;
        assert!(
            !needs_comparison(&config, FileFormat::Docx),
            "flag alone is not enough without both-compare"
        );
    }

    #[test]
    fn test_file_size_limits() {
        let mut config = ProcessingConfig::default();
        config.performance.max_file_size_bytes = 500 * 1024 * 1024;

        assert!(is_file_size_valid(&config, FileFormat::Html, 5 * 1024 * 1024));
        assert!(!is_file_size_valid(
            &config,
            FileFormat::Html,
            5 * 1024 * 1024 + 1
        ));

        config.performance.max_file_size_bytes = 1024;
        assert!(!is_file_size_valid(&config, FileFormat::Pptx, 2048));
    }
}
