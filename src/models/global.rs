use super::environment::Environment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumIter, EnumString};

/// Region codes with a hand-authored base configuration.
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
pub enum Region {
    #[serde(rename = "ap-northeast-1")]
    #[strum(serialize = "ap-northeast-1")]
    ApNortheast1,
    #[serde(rename = "ap-northeast-3")]
    #[strum(serialize = "ap-northeast-3")]
    ApNortheast3,
    #[serde(rename = "eu-central-1")]
    #[strum(serialize = "eu-central-1")]
    EuCentral1,
    #[serde(rename = "eu-west-1")]
    #[strum(serialize = "eu-west-1")]
    EuWest1,
    #[serde(rename = "eu-west-2")]
    #[strum(serialize = "eu-west-2")]
    EuWest2,
    #[serde(rename = "eu-west-3")]
    #[strum(serialize = "eu-west-3")]
    EuWest3,
    #[serde(rename = "us-east-1")]
    #[strum(serialize = "us-east-1")]
    UsEast1,
    #[serde(rename = "us-east-2")]
    #[strum(serialize = "us-east-2")]
    UsEast2,
    #[serde(rename = "us-west-2")]
    #[strum(serialize = "us-west-2")]
    UsWest2,
}

/// Base configuration a region inherits from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RegionProfile {
    Tokyo,
    Frankfurt,
    Virginia,
}

/// Regulatory regime attached to a region.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ComplianceRegulation {
    Fisc,
    Gdpr,
    Sox,
    Hipaa,
}

impl Region {
    pub const fn profile(self) -> RegionProfile {
        match self {
            Self::ApNortheast1 | Self::ApNortheast3 => RegionProfile::Tokyo,
            Self::EuCentral1 | Self::EuWest1 | Self::EuWest2 | Self::EuWest3 => {
                RegionProfile::Frankfurt
            }
            Self::UsEast1 | Self::UsEast2 | Self::UsWest2 => RegionProfile::Virginia,
        }
    }

    pub const fn timezone(self) -> &'static str {
        match self {
            Self::ApNortheast1 | Self::ApNortheast3 => "Asia/Tokyo",
            Self::EuCentral1 => "Europe/Berlin",
            Self::EuWest1 => "Europe/Dublin",
            Self::EuWest2 => "Europe/London",
            Self::EuWest3 => "Europe/Paris",
            Self::UsEast1 | Self::UsEast2 => "America/New_York",
            Self::UsWest2 => "America/Los_Angeles",
        }
    }
}

impl RegionProfile {
    /// Profile used for region codes that are not in [`Region`].
    pub const FALLBACK: Self = Self::Tokyo;

    pub fn regulations(self) -> BTreeSet<ComplianceRegulation> {
        match self {
            Self::Tokyo => BTreeSet::from([ComplianceRegulation::Fisc]),
            Self::Frankfurt => BTreeSet::from([ComplianceRegulation::Gdpr]),
            Self::Virginia => {
                BTreeSet::from([ComplianceRegulation::Sox, ComplianceRegulation::Hipaa])
            }
        }
    }

    pub const fn data_residency(self) -> &'static str {
        match self {
            Self::Tokyo => "JP",
            Self::Frankfurt => "EU",
            Self::Virginia => "US",
        }
    }

    pub const fn timezone(self) -> &'static str {
        match self {
            Self::Tokyo => "Asia/Tokyo",
            Self::Frankfurt => "Europe/Berlin",
            Self::Virginia => "America/New_York",
        }
    }
}

/// Regulations applied when a region code is not recognised.
pub fn fallback_regulations() -> BTreeSet<ComplianceRegulation> {
    BTreeSet::from([ComplianceRegulation::Gdpr])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRetention {
    pub default_retention_days: u32,
    pub personal_data_retention_days: u32,
    pub log_retention_days: u32,
    pub backup_retention_days: u32,
}

impl Default for DataRetention {
    fn default() -> Self {
        Self {
            default_retention_days: 365,
            personal_data_retention_days: 365,
            log_retention_days: 365,
            backup_retention_days: 365,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataProtection {
    pub encryption_at_rest: bool,
    pub encryption_in_transit: bool,
    pub data_classification: bool,
    pub access_logging: bool,
    pub data_retention: DataRetention,
}

impl Default for DataProtection {
    fn default() -> Self {
        Self {
            encryption_at_rest: true,
            encryption_in_transit: true,
            data_classification: true,
            access_logging: true,
            data_retention: DataRetention::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    pub regulations: BTreeSet<ComplianceRegulation>,
    pub data_protection: DataProtection,
    pub audit_logging: bool,
}

impl ComplianceConfig {
    pub fn with_regulations(regulations: BTreeSet<ComplianceRegulation>) -> Self {
        Self {
            regulations,
            data_protection: DataProtection::default(),
            audit_logging: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkingFeatures {
    pub vpc: bool,
    pub load_balancer: bool,
    pub cdn: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFeatures {
    pub waf: bool,
    pub cognito: bool,
    pub encryption: bool,
    pub compliance: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFeatures {
    pub fsx: bool,
    pub s3: bool,
    pub backup: bool,
    pub lifecycle: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseFeatures {
    pub dynamodb: bool,
    pub opensearch: bool,
    pub rds: bool,
    pub migration: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeFeatures {
    pub lambda: bool,
    pub ecs: bool,
    pub scaling: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFeatures {
    pub rest_api: bool,
    pub graphql: bool,
    pub websocket: bool,
    pub frontend: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiFeatures {
    pub bedrock: bool,
    pub embedding: bool,
    pub rag: bool,
    pub model_management: bool,
    /// Mirrors `enabled` of the processing config resolved for the same
    /// environment.
    pub document_conversion: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringFeatures {
    pub cloudwatch: bool,
    pub xray: bool,
    pub alarms: bool,
    pub dashboards: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseFeatures {
    pub multi_tenant: bool,
    pub billing: bool,
    pub compliance: bool,
    pub governance: bool,
}

/// Tree of boolean platform toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub networking: NetworkingFeatures,
    pub security: SecurityFeatures,
    pub storage: StorageFeatures,
    pub database: DatabaseFeatures,
    pub compute: ComputeFeatures,
    pub api: ApiFeatures,
    pub ai: AiFeatures,
    pub monitoring: MonitoringFeatures,
    pub enterprise: EnterpriseFeatures,
}

impl FeatureSet {
    /// Defaults every region starts from before an environment is applied.
    /// Optional services (RDS, ECS, GraphQL, WebSocket, multi-tenancy,
    /// billing) are off.
    pub fn regional_baseline() -> Self {
        Self {
            networking: NetworkingFeatures {
                vpc: true,
                load_balancer: true,
                cdn: true,
            },
            security: SecurityFeatures {
                waf: true,
                cognito: true,
                encryption: true,
                compliance: true,
            },
            storage: StorageFeatures {
                fsx: true,
                s3: true,
                backup: true,
                lifecycle: true,
            },
            database: DatabaseFeatures {
                dynamodb: true,
                opensearch: true,
                rds: false,
                migration: true,
            },
            compute: ComputeFeatures {
                lambda: true,
                ecs: false,
                scaling: true,
            },
            api: ApiFeatures {
                rest_api: true,
                graphql: false,
                websocket: false,
                frontend: true,
            },
            ai: AiFeatures {
                bedrock: true,
                embedding: true,
                rag: true,
                model_management: true,
                document_conversion: true,
            },
            monitoring: MonitoringFeatures {
                cloudwatch: true,
                xray: true,
                alarms: true,
                dashboards: true,
            },
            enterprise: EnterpriseFeatures {
                multi_tenant: false,
                billing: false,
                compliance: true,
                governance: true,
            },
        }
    }

    /// Complete toggle assignment for `environment`.
    ///
    /// dev switches off everything that costs money to keep running, staging
    /// matches prod apart from the optional services and multi-tenancy and
    /// billing, prod switches everything on.
    pub const fn for_environment(environment: Environment) -> Self {
        // (non-dev, prod-only)
        let (standard, premium) = match environment {
            Environment::Dev => (false, false),
            Environment::Staging => (true, false),
            Environment::Prod => (true, true),
        };

        Self {
            networking: NetworkingFeatures {
                vpc: true,
                load_balancer: standard,
                cdn: standard,
            },
            security: SecurityFeatures {
                waf: standard,
                cognito: true,
                encryption: true,
                compliance: true,
            },
            storage: StorageFeatures {
                fsx: true,
                s3: true,
                backup: standard,
                lifecycle: standard,
            },
            database: DatabaseFeatures {
                dynamodb: true,
                opensearch: true,
                rds: premium,
                migration: true,
            },
            compute: ComputeFeatures {
                lambda: true,
                ecs: premium,
                scaling: standard,
            },
            api: ApiFeatures {
                rest_api: true,
                graphql: premium,
                websocket: premium,
                frontend: true,
            },
            ai: AiFeatures {
                bedrock: true,
                embedding: true,
                rag: true,
                model_management: true,
                document_conversion: true,
            },
            monitoring: MonitoringFeatures {
                cloudwatch: true,
                xray: standard,
                alarms: standard,
                dashboards: true,
            },
            enterprise: EnterpriseFeatures {
                multi_tenant: premium,
                billing: premium,
                compliance: standard,
                governance: standard,
            },
        }
    }

    /// Flatten the tree into `("group.leaf", value)` pairs.
    pub fn leaves(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("networking.vpc", self.networking.vpc),
            ("networking.load_balancer", self.networking.load_balancer),
            ("networking.cdn", self.networking.cdn),
            ("security.waf", self.security.waf),
            ("security.cognito", self.security.cognito),
            ("security.encryption", self.security.encryption),
            ("security.compliance", self.security.compliance),
            ("storage.fsx", self.storage.fsx),
            ("storage.s3", self.storage.s3),
            ("storage.backup", self.storage.backup),
            ("storage.lifecycle", self.storage.lifecycle),
            ("database.dynamodb", self.database.dynamodb),
            ("database.opensearch", self.database.opensearch),
            ("database.rds", self.database.rds),
            ("database.migration", self.database.migration),
            ("compute.lambda", self.compute.lambda),
            ("compute.ecs", self.compute.ecs),
            ("compute.scaling", self.compute.scaling),
            ("api.rest_api", self.api.rest_api),
            ("api.graphql", self.api.graphql),
            ("api.websocket", self.api.websocket),
            ("api.frontend", self.api.frontend),
            ("ai.bedrock", self.ai.bedrock),
            ("ai.embedding", self.ai.embedding),
            ("ai.rag", self.ai.rag),
            ("ai.model_management", self.ai.model_management),
            ("ai.document_conversion", self.ai.document_conversion),
            ("monitoring.cloudwatch", self.monitoring.cloudwatch),
            ("monitoring.xray", self.monitoring.xray),
            ("monitoring.alarms", self.monitoring.alarms),
            ("monitoring.dashboards", self.monitoring.dashboards),
            ("enterprise.multi_tenant", self.enterprise.multi_tenant),
            ("enterprise.billing", self.enterprise.billing),
            ("enterprise.compliance", self.enterprise.compliance),
            ("enterprise.governance", self.enterprise.governance),
        ]
    }

    pub fn enabled_count(&self) -> usize {
        self.leaves().iter().filter(|(_, on)| *on).count()
    }
}

/// Region-level defaults, before any environment is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalDefaults {
    pub region: String,
    pub profile: RegionProfile,
    pub data_residency: String,
    pub timezone: String,
    pub compliance: ComplianceConfig,
    pub features: FeatureSet,
}

/// Fully resolved platform configuration for one region and environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub project_name: String,
    /// `None` when the caller asked for an environment name the engine does
    /// not know; the features are then the regional defaults.
    pub environment: Option<Environment>,
    pub region: String,
    pub data_residency: String,
    pub timezone: String,
    pub features: FeatureSet,
    pub compliance: ComplianceConfig,
}
