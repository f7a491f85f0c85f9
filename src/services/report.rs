// Processing method report
//
// Aggregates a resolved processing config into per-strategy counts and one row per format.

use crate::diagnostics::DiagnosticSink;
use crate::models::{FileFormat, ProcessingConfig, ProcessingStrategy};
use serde::{Deserialize, Serialize};

/// Counts over all configured formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_formats: usize,

    /// Formats that use the primary method and not the secondary one
    pub primary_only_formats: usize,

    /// Formats that use the secondary method and not the primary one
    pub secondary_only_formats: usize,

    /// Formats that use both methods
    pub hybrid_formats: usize,

    /// Formats with quality comparison switched on
    pub comparison_formats: usize,
}

/// One row per format, in config order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatReportRow {
    pub format: FileFormat,
    pub strategy: ProcessingStrategy,
    pub uses_primary: bool,
    pub uses_secondary: bool,
    pub comparison_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub summary: ReportSummary,
    pub details: Vec<FormatReportRow>,
}

/// Build the report for `config`.
pub fn summarize(config: &ProcessingConfig) -> ProcessingReport {
    let details: Vec<FormatReportRow> = config
        .formats
        .iter()
        .map(|(format, format_config)| FormatReportRow {
            format: *format,
            strategy: format_config.strategy,
            uses_primary: format_config.uses_primary,
            uses_secondary: format_config.uses_secondary,
            comparison_enabled: format_config.comparison_enabled,
        })
        .collect();

    let count = |predicate: fn(&FormatReportRow) -> bool| {
        details.iter().filter(|row| predicate(row)).count()
    };

    let summary = ReportSummary {
        total_formats: details.len(),
        primary_only_formats: count(|d| d.uses_primary && !d.uses_secondary),
        secondary_only_formats: count(|d| !d.uses_primary && d.uses_secondary),
        hybrid_formats: count(|d| d.uses_primary && d.uses_secondary),
        comparison_formats: count(|d| d.comparison_enabled),
    };

    ProcessingReport { summary, details }
}

impl ProcessingReport {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Log report summary
    pub fn log_summary(&self, sink: &dyn DiagnosticSink) {
        let summary = &self.summary;
        sink.info("=== Processing Method Report ===");
        sink.info(&format!(
            "Formats: {} total, {} primary only, {} secondary only, {} hybrid",
            summary.total_formats,
            summary.primary_only_formats,
            summary.secondary_only_formats,
            summary.hybrid_formats
        ));
        sink.info(&format!(
            "Quality comparison: {} format(s)",
            summary.comparison_formats
        ));
        for row in &self.details {
            sink.info(&format!(
                "  {}: {} (primary={}, secondary={}, compare={})",
                row.format,
                row.strategy,
                row.uses_primary,
                row.uses_secondary,
                row.comparison_enabled
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_report_counts() {
        let report = summarize(&ProcessingConfig::default());

        assert_eq!(report.summary.total_formats, FileFormat::iter().count());
        // png, jpg, jpeg, gif
        assert_eq!(report.summary.primary_only_formats, 4);
        // csv, tsv
        assert_eq!(report.summary.secondary_only_formats, 2);
        // docx, xlsx, pptx, pdf, html, xml
        assert_eq!(report.summary.hybrid_formats, 6);
        assert_eq!(report.summary.comparison_formats, 1);
    }

    #[test]
    fn test_details_follow_config_order() {
        let report = summarize(&ProcessingConfig::default());
        let formats: Vec<FileFormat> = report.details.iter().map(|d| d.format).collect();
        let expected: Vec<FileFormat> = ProcessingConfig::default()
            .formats
            .keys()
            .copied()
            .collect();
        assert_eq!(formats, expected);
    }

    #[test]
    fn test_empty_config_report() {
        let mut config = ProcessingConfig::default();
        config.formats.clear();

        let report = summarize(&config);

        assert_eq!(report.summary, ReportSummary::default());
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_json_rendering() {
        let report = summarize(&ProcessingConfig::default());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"total_formats\": 12"));
        assert!(json.contains("\"strategy\": \"both-compare\""));
    }
}
