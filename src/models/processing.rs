use super::format::FileFormat;
use super::strategy::ProcessingStrategy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Hard ceiling for `performance.max_file_size_bytes` (500 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 500 * 1024 * 1024;
/// Hard ceiling for `performance.memory_limit_mb`.
pub const MAX_MEMORY_LIMIT_MB: u32 = 3008;
/// Inclusive bounds for `performance.max_concurrent_processes`.
pub const CONCURRENCY_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
/// Per-format timeout ceiling in seconds.
pub const MAX_FORMAT_TIMEOUT_SECONDS: u32 = 900;
/// Temp files may not outlive a day.
pub const MAX_TEMP_FILE_RETENTION_MINUTES: u32 = 1440;
/// Timeout given to formats that only appear in an override document.
pub const DEFAULT_FORMAT_TIMEOUT_SECONDS: u32 = 30;

/// Resolved document-conversion configuration.
///
/// Built from the base document (or [`ProcessingConfig::default`]) merged
/// with an optional per-environment override. Values are never mutated in
/// place by the engine; see [`crate::services::with_strategy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub enabled: bool,
    pub formats: IndexMap<FileFormat, FormatConfig>,
    pub performance: PerformanceConfig,
    pub fallback: FallbackConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub quality: QualityConfig,
}

/// Settings for one file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    pub enabled: bool,
    pub timeout_seconds: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_enabled: Option<bool>,
    pub strategy: ProcessingStrategy,
    #[serde(default)]
    pub uses_primary: bool,
    #[serde(default)]
    pub uses_secondary: bool,
    #[serde(default)]
    pub comparison_enabled: bool,
}

impl FormatConfig {
    /// Build an enabled entry whose flags agree with `strategy`.
    pub fn from_strategy(
        strategy: ProcessingStrategy,
        timeout_seconds: u32,
        description: impl Into<String>,
        ocr_enabled: bool,
    ) -> Self {
        let behavior = strategy.behavior();
        Self {
            enabled: true,
            timeout_seconds,
            description: description.into(),
            ocr_enabled: ocr_enabled.then_some(true),
            strategy,
            uses_primary: behavior.uses_primary,
            uses_secondary: behavior.uses_secondary,
            comparison_enabled: behavior.requires_comparison,
        }
    }

    /// Entry used for a format that has no configuration yet.
    pub fn recommended(format: FileFormat) -> Self {
        Self::from_strategy(
            format.recommended_strategy(),
            DEFAULT_FORMAT_TIMEOUT_SECONDS,
            format.to_string(),
            format.supports_ocr(),
        )
    }

    /// Switch to `strategy`, re-deriving every flag from the strategy table.
    ///
    /// Comparison is switched on exactly when the new strategy is
    /// `both-compare`.
    pub fn apply_strategy(&mut self, strategy: ProcessingStrategy) {
        let behavior = strategy.behavior();
        self.strategy = strategy;
        self.uses_primary = behavior.uses_primary;
        self.uses_secondary = behavior.uses_secondary;
        self.comparison_enabled = behavior.requires_comparison;
    }

    /// Repair the method flags and the comparison flag so they agree with the
    /// current strategy. Returns `true` when anything changed.
    ///
    /// Unlike [`apply_strategy`](Self::apply_strategy) this never switches
    /// comparison on; it only clears it where the strategy forbids it.
    pub fn normalize(&mut self) -> bool {
        let behavior = self.strategy.behavior();
        let before = (
            self.uses_primary,
            self.uses_secondary,
            self.comparison_enabled,
        );

        self.uses_primary = behavior.uses_primary;
        self.uses_secondary = behavior.uses_secondary;
        self.comparison_enabled = self.comparison_enabled && behavior.requires_comparison;

        before
            != (
                self.uses_primary,
                self.uses_secondary,
                self.comparison_enabled,
            )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub max_file_size_bytes: u64,
    pub memory_limit_mb: u32,
    #[serde(default = "default_parallel_processing")]
    pub parallel_processing: bool,
    pub max_concurrent_processes: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            memory_limit_mb: 1024,
            parallel_processing: true,
            max_concurrent_processes: 3,
        }
    }
}

fn default_parallel_processing() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub enabled: bool,
    pub use_secondary_on_failure: bool,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_secondary_on_failure: true,
            retry_attempts: 2,
            retry_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub validate_file_type: bool,
    pub validate_file_size: bool,
    pub encrypt_temp_files: bool,
    pub auto_delete_temp_files: bool,
    pub temp_file_retention_minutes: u32,
    #[serde(default)]
    pub enable_malware_scan: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            validate_file_type: true,
            validate_file_size: true,
            encrypt_temp_files: true,
            auto_delete_temp_files: true,
            temp_file_retention_minutes: 30,
            enable_malware_scan: false,
            allowed_mime_types: Vec::new(),
        }
    }
}

/// Verbosity requested for the conversion pipeline's own logs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub detailed_logs: bool,
    pub performance_logs: bool,
    pub error_tracking: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            detailed_logs: true,
            performance_logs: true,
            error_tracking: true,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QualityLevel {
    Low,
    Medium,
    #[default]
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityConfig {
    pub ocr_accuracy: QualityLevel,
    pub text_extraction_quality: QualityLevel,
    pub preserve_formatting: bool,
    pub preserve_images: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            ocr_accuracy: QualityLevel::High,
            text_extraction_quality: QualityLevel::High,
            preserve_formatting: true,
            preserve_images: false,
        }
    }
}

impl Default for ProcessingConfig {
    /// The hard-coded base configuration, used whenever the base document is
    /// missing or unreadable.
    fn default() -> Self {
        Self {
            enabled: true,
            formats: default_formats(),
            performance: PerformanceConfig::default(),
            fallback: FallbackConfig::default(),
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

fn default_formats() -> IndexMap<FileFormat, FormatConfig> {
    use FileFormat::*;

    [
        (Docx, 30, "Microsoft Word document"),
        (Xlsx, 45, "Microsoft Excel workbook"),
        (Pptx, 60, "Microsoft PowerPoint presentation"),
        (Pdf, 120, "PDF document (OCR capable)"),
        (Png, 90, "PNG image (OCR capable)"),
        (Jpg, 90, "JPEG image (OCR capable)"),
        (Jpeg, 90, "JPEG image (OCR capable)"),
        (Gif, 90, "GIF image (OCR capable)"),
        (Html, 30, "HTML document"),
        (Xml, 30, "XML document"),
        (Csv, 15, "CSV data"),
        (Tsv, 15, "TSV data"),
    ]
    .into_iter()
    .map(|(format, timeout, description)| {
        let config = FormatConfig::from_strategy(
            format.recommended_strategy(),
            timeout,
            description,
            format.supports_ocr(),
        );
        (format, config)
    })
    .collect()
}

/// Partial processing configuration as found in an override document.
///
/// Every field is optional; absent groups and absent keys inside a group
/// leave the base value untouched when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialProcessingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<IndexMap<FileFormat, PartialFormatConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PartialPerformanceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<PartialFallbackConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<PartialSecurityConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<PartialLoggingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<PartialQualityConfig>,
}

impl PartialProcessingConfig {
    /// `true` when the override would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Override for one format entry. The method flags are not overridable;
/// they always follow the strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialFormatConfig {
    pub enabled: Option<bool>,
    pub timeout_seconds: Option<u32>,
    pub description: Option<String>,
    pub ocr_enabled: Option<bool>,
    pub strategy: Option<ProcessingStrategy>,
    pub comparison_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialPerformanceConfig {
    pub max_file_size_bytes: Option<u64>,
    pub memory_limit_mb: Option<u32>,
    pub parallel_processing: Option<bool>,
    pub max_concurrent_processes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialFallbackConfig {
    pub enabled: Option<bool>,
    pub use_secondary_on_failure: Option<bool>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSecurityConfig {
    pub validate_file_type: Option<bool>,
    pub validate_file_size: Option<bool>,
    pub encrypt_temp_files: Option<bool>,
    pub auto_delete_temp_files: Option<bool>,
    pub temp_file_retention_minutes: Option<u32>,
    pub enable_malware_scan: Option<bool>,
    pub allowed_mime_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialLoggingConfig {
    pub level: Option<LogLevel>,
    pub detailed_logs: Option<bool>,
    pub performance_logs: Option<bool>,
    pub error_tracking: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialQualityConfig {
    pub ocr_accuracy: Option<QualityLevel>,
    pub text_extraction_quality: Option<QualityLevel>,
    pub preserve_formatting: Option<bool>,
    pub preserve_images: Option<bool>,
}
