//! Integration tests for region/environment resolution of GlobalConfig

use camino::Utf8PathBuf;
use ragconf::diagnostics::{CollectingSink, ConfigWarning, NullSink};
use ragconf::{ConfigManager, FileFormat};
use ragconf::models::{ComplianceRegulation, Environment, FeatureSet, ProcessingConfig};
use ragconf::services::{
    apply_environment, regional_defaults, regulations_for, resolve_global_config, summarize,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tempfile::TempDir;

#[test]
fn test_xray_follows_environment() {
    let processing = ProcessingConfig::default();

    let dev = resolve_global_config("dev", "us-east-1", "demo", &processing, &NullSink);
    let prod = resolve_global_config("prod", "us-east-1", "demo", &processing, &NullSink);

    assert!(!dev.features.monitoring.xray);
    assert!(prod.features.monitoring.xray);
}

#[test]
fn test_report_counts_every_format() {
    let report = summarize(&ProcessingConfig::default());
    assert_eq!(report.summary.total_formats, FileFormat::iter().count());
}

#[test]
fn test_unknown_region_gets_documented_fallback() {
    let sink = CollectingSink::new();

    let regulations = regulations_for("unknown-region", &sink);

    assert!(!regulations.is_empty());
    assert_eq!(regulations, BTreeSet::from([ComplianceRegulation::Gdpr]));
    assert_eq!(
        sink.warnings(),
        vec![ConfigWarning::UnknownRegion("unknown-region".to_string())]
    );
}

#[test]
fn test_known_regions_map_to_their_regimes() {
    assert_eq!(
        regulations_for("ap-northeast-1", &NullSink),
        BTreeSet::from([ComplianceRegulation::Fisc])
    );
    assert_eq!(
        regulations_for("eu-west-3", &NullSink),
        BTreeSet::from([ComplianceRegulation::Gdpr])
    );
    assert_eq!(
        regulations_for("us-west-2", &NullSink),
        BTreeSet::from([ComplianceRegulation::Sox, ComplianceRegulation::Hipaa])
    );
}

#[test]
fn test_regional_defaults_for_frankfurt() {
    let defaults = regional_defaults("eu-central-1", &NullSink);

    assert_eq!(defaults.data_residency, "EU");
    assert_eq!(defaults.timezone, "Europe/Berlin");
    assert!(defaults.compliance.audit_logging);
    assert!(defaults.compliance.data_protection.encryption_at_rest);
}

#[test]
fn test_unknown_environment_keeps_regional_features() {
    let sink = CollectingSink::new();
    let processing = ProcessingConfig::default();

    let config = resolve_global_config("qa", "ap-northeast-1", "demo", &processing, &sink);

    assert_eq!(config.environment, None);
    let mut expected = FeatureSet::regional_baseline();
    expected.ai.document_conversion = processing.enabled;
    assert_eq!(config.features, expected);
    assert_eq!(
        sink.warnings(),
        vec![ConfigWarning::UnknownEnvironment("qa".to_string())]
    );
}

#[test]
fn test_environment_tables_are_total_overwrites() {
    let mut base = FeatureSet::regional_baseline();
    base.enterprise.billing = true;
    base.monitoring.xray = true;

    for environment in Environment::iter() {
        let applied = apply_environment(&base, &environment.to_string(), &NullSink);
        assert_eq!(applied, FeatureSet::for_environment(environment));
    }
}

#[test]
fn test_prod_enables_enterprise_features_staging_does_not() {
    let staging = FeatureSet::for_environment(Environment::Staging);
    let prod = FeatureSet::for_environment(Environment::Prod);

    assert!(!staging.enterprise.multi_tenant);
    assert!(!staging.enterprise.billing);
    assert!(prod.enterprise.multi_tenant);
    assert!(prod.enterprise.billing);
    assert!(prod.enabled_count() >= staging.enabled_count());
}

#[test]
fn test_disabled_processing_turns_off_document_conversion() {
    let processing = ProcessingConfig {
        enabled: false,
        ..ProcessingConfig::default()
    };

    let config = resolve_global_config("prod", "us-east-1", "demo", &processing, &NullSink);

    assert!(!config.features.ai.document_conversion);
    assert_eq!(config.project_name, "demo");
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.data_residency, "US");
}

#[test]
fn test_manager_reports_unknown_environment_once() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let sink = Arc::new(CollectingSink::new());
    let manager = ConfigManager::new(&config_path).with_sink(sink.clone());

    let config = manager.resolve_global_config("qa", "us-east-1", "demo");

    assert_eq!(config.environment, None);
    assert_eq!(
        sink.warnings(),
        vec![ConfigWarning::UnknownEnvironment("qa".to_string())]
    );
}

#[test]
fn test_manager_reports_unknown_region_once() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let sink = Arc::new(CollectingSink::new());
    let manager = ConfigManager::new(&config_path).with_sink(sink.clone());

    let config = manager.resolve_global_config("prod", "sa-east-1", "demo");

    assert_eq!(
        config.compliance.regulations,
        BTreeSet::from([ComplianceRegulation::Gdpr])
    );
    assert_eq!(
        sink.warnings(),
        vec![ConfigWarning::UnknownRegion("sa-east-1".to_string())]
    );
}
