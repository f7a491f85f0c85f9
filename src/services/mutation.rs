use crate::diagnostics::{ConfigWarning, DiagnosticSink};
use crate::models::{FileFormat, ProcessingConfig, ProcessingStrategy};

/// Return a copy of `config` with `format` switched to `strategy`.
///
/// The format's method flags are re-derived from the strategy table and
/// comparison is enabled exactly for `both-compare`, so the result satisfies
/// the strategy-flag invariants for that format. A format missing from
/// `config.formats` leaves the copy unchanged and warns.
pub fn with_strategy(
    config: &ProcessingConfig,
    format: FileFormat,
    strategy: ProcessingStrategy,
    sink: &dyn DiagnosticSink,
) -> ProcessingConfig {
    let mut updated = config.clone();
    apply_in_place(&mut updated, format, strategy, sink);
    updated
}

/// Apply several strategy changes, one [`with_strategy`] per entry.
///
/// Each entry touches a different format key, so the order of `updates` does
/// not affect the result.
pub fn with_strategies<I>(
    config: &ProcessingConfig,
    updates: I,
    sink: &dyn DiagnosticSink,
) -> ProcessingConfig
where
    I: IntoIterator<Item = (FileFormat, ProcessingStrategy)>,
{
    let mut updated = config.clone();
    let mut count = 0usize;

    for (format, strategy) in updates {
        apply_in_place(&mut updated, format, strategy, sink);
        count += 1;
    }

    sink.info(&format!("Processed {} strategy update(s)", count));
    updated
}

fn apply_in_place(
    config: &mut ProcessingConfig,
    format: FileFormat,
    strategy: ProcessingStrategy,
    sink: &dyn DiagnosticSink,
) {
    match config.formats.get_mut(&format) {
        Some(format_config) => {
            format_config.apply_strategy(strategy);
            sink.info(&format!("Set {} strategy to {}", format, strategy));
        }
        None => sink.warn(&ConfigWarning::FormatNotConfigured(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, NullSink};
    use crate::services::validate;
    use indexmap::IndexMap;

    #[test]
    fn test_switch_pdf_to_both_compare() {
        let mut config = ProcessingConfig::default();
        config.formats[&FileFormat::Pdf].apply_strategy(ProcessingStrategy::SecondaryOnly);

        let updated = with_strategy(
            &config,
            FileFormat::Pdf,
            ProcessingStrategy::BothCompare,
            &NullSink,
        );
        let pdf = &updated.formats[&FileFormat::Pdf];

        assert!(pdf.uses_primary);
        assert!(pdf.uses_secondary);
        assert!(pdf.comparison_enabled);
        assert_eq!(
            config.formats[&FileFormat::Pdf].strategy,
            ProcessingStrategy::SecondaryOnly,
            "input config must not change"
        );
    }

    #[test]
    fn test_missing_format_is_a_warning() {
        let mut config = ProcessingConfig::default();
        config.formats.shift_remove(&FileFormat::Tsv);
        let sink = CollectingSink::new();

        let updated = with_strategy(
            &config,
            FileFormat::Tsv,
            ProcessingStrategy::PrimaryOnly,
            &sink,
        );

        assert_eq!(updated, config);
        assert_eq!(
            sink.warnings(),
            vec![ConfigWarning::FormatNotConfigured(FileFormat::Tsv)]
        );
    }

    #[test]
    fn test_idempotent() {
        let config = ProcessingConfig::default();
        let once = with_strategy(
            &config,
            FileFormat::Docx,
            ProcessingStrategy::SecondaryOnly,
            &NullSink,
        );
        let twice = with_strategy(
            &once,
            FileFormat::Docx,
            ProcessingStrategy::SecondaryOnly,
            &NullSink,
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_batch_updates() {
        let config = ProcessingConfig::default();
        let mut updates = IndexMap::new();
        updates.insert(FileFormat::Csv, ProcessingStrategy::BothCompare);
        updates.insert(FileFormat::Png, ProcessingStrategy::AutoSelect);
        updates.insert(FileFormat::Html, ProcessingStrategy::PrimaryOnly);

        let updated = with_strategies(&config, updates, &NullSink);

        assert_eq!(
            updated.formats[&FileFormat::Csv].strategy,
            ProcessingStrategy::BothCompare
        );
        assert!(updated.formats[&FileFormat::Csv].comparison_enabled);
        assert!(updated.formats[&FileFormat::Png].uses_secondary);
        assert!(!updated.formats[&FileFormat::Html].uses_secondary);
        assert!(validate(&updated).is_empty());
    }
}
