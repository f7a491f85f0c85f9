use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which conversion method(s) a file format uses, and in what order.
///
/// The primary method is the built-in Markdown converter, the secondary
/// method is the loader-based converter. The engine never calls either of
/// them; it only decides which ones a format should go through.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProcessingStrategy {
    PrimaryOnly,
    SecondaryOnly,
    PrimaryFirst,
    SecondaryFirst,
    BothCompare,
    AutoSelect,
}

/// Fixed behavior flags attached to a [`ProcessingStrategy`].
///
/// [`ProcessingStrategy::behavior`] is the only place these rows are defined;
/// the validator and the mutator both read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyBehavior {
    pub uses_primary: bool,
    pub uses_secondary: bool,
    pub requires_comparison: bool,
    pub priority: u8,
    pub description: &'static str,
}

impl ProcessingStrategy {
    /// Look up the behavior row for this strategy.
    pub const fn behavior(self) -> StrategyBehavior {
        match self {
            Self::PrimaryOnly => StrategyBehavior {
                uses_primary: true,
                uses_secondary: false,
                requires_comparison: false,
                priority: 1,
                description: "Convert with the primary method only",
            },
            Self::SecondaryOnly => StrategyBehavior {
                uses_primary: false,
                uses_secondary: true,
                requires_comparison: false,
                priority: 1,
                description: "Convert with the secondary method only",
            },
            Self::PrimaryFirst => StrategyBehavior {
                uses_primary: true,
                uses_secondary: true,
                requires_comparison: false,
                priority: 2,
                description: "Primary method first, secondary method on failure",
            },
            Self::SecondaryFirst => StrategyBehavior {
                uses_primary: true,
                uses_secondary: true,
                requires_comparison: false,
                priority: 2,
                description: "Secondary method first, primary method on failure",
            },
            Self::BothCompare => StrategyBehavior {
                uses_primary: true,
                uses_secondary: true,
                requires_comparison: true,
                priority: 3,
                description: "Run both methods and keep the better result",
            },
            Self::AutoSelect => StrategyBehavior {
                uses_primary: true,
                uses_secondary: true,
                requires_comparison: false,
                priority: 4,
                description: "Pick methods from the file format category",
            },
        }
    }

    pub const fn uses_primary(self) -> bool {
        self.behavior().uses_primary
    }

    pub const fn uses_secondary(self) -> bool {
        self.behavior().uses_secondary
    }

    pub const fn requires_comparison(self) -> bool {
        self.behavior().requires_comparison
    }
}

/// One of the two interchangeable document-conversion backends.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConversionMethod {
    Primary,
    Secondary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_strategy_names_round_trip_through_strings() {
        assert_eq!(ProcessingStrategy::BothCompare.to_string(), "both-compare");
        assert_eq!(
            ProcessingStrategy::from_str("secondary-first").unwrap(),
            ProcessingStrategy::SecondaryFirst
        );
        assert!(ProcessingStrategy::from_str("markdown-only").is_err());
    }

    #[test]
    fn test_only_both_compare_requires_comparison() {
        for strategy in ProcessingStrategy::iter() {
            assert_eq!(
                strategy.requires_comparison(),
                strategy == ProcessingStrategy::BothCompare,
                "unexpected comparison flag for {}",
                strategy
            );
        }
    }

    #[test]
    fn test_single_method_strategies() {
        let primary = ProcessingStrategy::PrimaryOnly.behavior();
        assert!(primary.uses_primary);
        assert!(!primary.uses_secondary);

        let secondary = ProcessingStrategy::SecondaryOnly.behavior();
        assert!(!secondary.uses_primary);
        assert!(secondary.uses_secondary);
    }

    #[test]
    fn test_priorities() {
        assert_eq!(ProcessingStrategy::PrimaryOnly.behavior().priority, 1);
        assert_eq!(ProcessingStrategy::SecondaryFirst.behavior().priority, 2);
        assert_eq!(ProcessingStrategy::BothCompare.behavior().priority, 3);
        assert_eq!(ProcessingStrategy::AutoSelect.behavior().priority, 4);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let yaml = serde_yaml_ng::to_string(&ProcessingStrategy::AutoSelect).unwrap();
        assert_eq!(yaml.trim(), "auto-select");
        let parsed: ProcessingStrategy = serde_yaml_ng::from_str("primary-first").unwrap();
        assert_eq!(parsed, ProcessingStrategy::PrimaryFirst);
    }
}
