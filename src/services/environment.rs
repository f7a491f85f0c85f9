//! Region and environment resolution for [`GlobalConfig`].
//!
//! ```text
//! regional_defaults(region)        RegionProfile + compliance + baseline features
//!          │
//!          ▼
//! apply_environment(features, env) total per-environment overwrite (fail-open on unknown env)
//!          │
//!          ▼
//! resolve_global_config(..)        + project name, document-conversion flag
//! ```

use super::compliance::regulations_for;
use crate::diagnostics::{ConfigWarning, DiagnosticSink};
use crate::models::{
    ComplianceConfig, Environment, FeatureSet, GlobalConfig, ProcessingConfig, Region,
    RegionProfile, RegionalDefaults,
};
use std::str::FromStr;

/// Region-level defaults before any environment is applied.
///
/// Unknown region codes inherit the fallback profile's residency, timezone
/// and features. Regulations always come from [`regulations_for`], which also
/// reports the unknown region.
pub fn regional_defaults(region: &str, sink: &dyn DiagnosticSink) -> RegionalDefaults {
    let (profile, timezone) = match Region::from_str(region) {
        Ok(known) => (known.profile(), known.timezone()),
        Err(_) => (RegionProfile::FALLBACK, RegionProfile::FALLBACK.timezone()),
    };
    let regulations = regulations_for(region, sink);

    RegionalDefaults {
        region: region.to_string(),
        profile,
        data_residency: profile.data_residency().to_string(),
        timezone: timezone.to_string(),
        compliance: ComplianceConfig::with_regulations(regulations),
        features: FeatureSet::regional_baseline(),
    }
}

/// Overwrite every toggle with the table for `environment`.
///
/// There is no per-leaf merging: a recognised environment replaces the whole
/// tree. An unrecognised name returns `base` untouched and warns.
pub fn apply_environment(
    base: &FeatureSet,
    environment: &str,
    sink: &dyn DiagnosticSink,
) -> FeatureSet {
    match Environment::from_str(environment) {
        Ok(known) => FeatureSet::for_environment(known),
        Err(_) => {
            sink.warn(&ConfigWarning::UnknownEnvironment(environment.to_string()));
            *base
        }
    }
}

/// Build the [`GlobalConfig`] for one region and environment.
///
/// `processing` is the processing config already resolved for the same
/// environment; only its `enabled` flag is read.
pub fn resolve_global_config(
    environment: &str,
    region: &str,
    project_name: &str,
    processing: &ProcessingConfig,
    sink: &dyn DiagnosticSink,
) -> GlobalConfig {
    let defaults = regional_defaults(region, sink);

    let mut features = apply_environment(&defaults.features, environment, sink);
    features.ai.document_conversion = processing.enabled;

    let config = GlobalConfig {
        project_name: project_name.to_string(),
        environment: Environment::from_str(environment).ok(),
        region: defaults.region,
        data_residency: defaults.data_residency,
        timezone: defaults.timezone,
        features,
        compliance: defaults.compliance,
    };

    let regulations: Vec<String> = config
        .compliance
        .regulations
        .iter()
        .map(ToString::to_string)
        .collect();
    sink.info(&format!(
        "Resolved global config: project={}, environment={}, region={}, compliance={}, features={}/{}",
        config.project_name,
        environment,
        config.region,
        regulations.join(", "),
        config.features.enabled_count(),
        config.features.leaves().len()
    ));

    config
}
