use crate::diagnostics::{ConfigWarning, DiagnosticSink};
use crate::models::{ComplianceRegulation, Region, fallback_regulations};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Regulations that apply to a region code.
///
/// Total over all inputs: a code outside [`Region`] yields
/// [`fallback_regulations`] (GDPR) and a [`ConfigWarning::UnknownRegion`].
pub fn regulations_for(
    region: &str,
    sink: &dyn DiagnosticSink,
) -> BTreeSet<ComplianceRegulation> {
    match Region::from_str(region) {
        Ok(known) => known.profile().regulations(),
        Err(_) => {
            sink.warn(&ConfigWarning::UnknownRegion(region.to_string()));
            fallback_regulations()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[test]
    fn test_known_regions() {
        let sink = CollectingSink::new();

        assert_eq!(
            regulations_for("ap-northeast-3", &sink),
            BTreeSet::from([ComplianceRegulation::Fisc])
        );
        assert_eq!(
            regulations_for("eu-west-3", &sink),
            BTreeSet::from([ComplianceRegulation::Gdpr])
        );
        assert_eq!(
            regulations_for("us-east-2", &sink),
            BTreeSet::from([ComplianceRegulation::Sox, ComplianceRegulation::Hipaa])
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_region_falls_back_to_gdpr() {
        let sink = CollectingSink::new();

        let regulations = regulations_for("unknown-region", &sink);

        assert_eq!(regulations, BTreeSet::from([ComplianceRegulation::Gdpr]));
        assert_eq!(
            sink.warnings(),
            vec![ConfigWarning::UnknownRegion("unknown-region".to_string())]
        );
    }

    #[test]
    fn test_region_codes_are_case_sensitive() {
        let sink = CollectingSink::new();
        let regulations = regulations_for("US-EAST-1", &sink);
        assert_eq!(regulations, fallback_regulations());
        assert_eq!(sink.warnings().len(), 1);
    }
}
