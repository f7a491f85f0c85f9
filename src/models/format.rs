use super::strategy::ProcessingStrategy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

const MIB: u64 = 1024 * 1024;

/// File formats the conversion pipeline accepts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileFormat {
    Docx,
    Xlsx,
    Pptx,
    Pdf,
    Png,
    Jpg,
    Jpeg,
    Gif,
    Html,
    Xml,
    Csv,
    Tsv,
}

/// Coarse grouping of formats, used for strategy recommendation and
/// `auto-select` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FormatCategory {
    Office,
    Document,
    Image,
    Data,
}

impl FileFormat {
    pub const fn category(self) -> FormatCategory {
        match self {
            Self::Docx | Self::Xlsx | Self::Pptx => FormatCategory::Office,
            Self::Pdf | Self::Html | Self::Xml => FormatCategory::Document,
            Self::Png | Self::Jpg | Self::Jpeg | Self::Gif => FormatCategory::Image,
            Self::Csv | Self::Tsv => FormatCategory::Data,
        }
    }

    /// Hard upper bound on input size for this format, independent of the
    /// configured `performance.max_file_size_bytes`.
    pub const fn size_limit_bytes(self) -> u64 {
        match self {
            Self::Docx => 50 * MIB,
            Self::Xlsx => 100 * MIB,
            Self::Pptx => 200 * MIB,
            Self::Pdf => 100 * MIB,
            Self::Png | Self::Jpg | Self::Jpeg => 20 * MIB,
            Self::Gif => 10 * MIB,
            Self::Html | Self::Xml => 5 * MIB,
            Self::Csv | Self::Tsv => 50 * MIB,
        }
    }

    /// Strategy a fresh configuration assigns to this format.
    pub const fn recommended_strategy(self) -> ProcessingStrategy {
        match (self, self.category()) {
            (_, FormatCategory::Office) => ProcessingStrategy::PrimaryFirst,
            (_, FormatCategory::Image) => ProcessingStrategy::PrimaryOnly,
            (_, FormatCategory::Data) => ProcessingStrategy::SecondaryOnly,
            (Self::Pdf, _) => ProcessingStrategy::BothCompare,
            _ => ProcessingStrategy::SecondaryFirst,
        }
    }

    /// Whether OCR is meaningful for this format (scanned PDFs and images).
    pub const fn supports_ocr(self) -> bool {
        matches!(self, Self::Pdf) || matches!(self.category(), FormatCategory::Image)
    }

    /// Resolve a file extension such as `"PDF"` or `".docx"`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let trimmed = extension.trim().trim_start_matches('.');
        Self::from_str(&trimmed.to_ascii_lowercase()).ok()
    }
}
