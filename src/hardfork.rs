//! Hard-fork feature activation
//!
//! Each protocol feature switches on once the chain's hard-fork version
//! reaches a per-network threshold, or never if it is disabled there. The
//! table is a compile-time constant and safe to read from any thread.

use crate::error::CheckpointError;
use crate::network::NetworkType;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardForkFeature {
    PowCnHeavy,
    PowCnGpu,
    DevFundV2,
    DevFundV3,
    FixedFee,
    DiffV2,
    RingsizeInc,
    RingsizeIncReq,
    Bulletproofs,
    BulletproofsReq,
    StrictTxSemantics,
    UniformIds,
    UniformIdsReq,
}

impl HardForkFeature {
    pub const ALL: [HardForkFeature; 13] = [
        HardForkFeature::PowCnHeavy,
        HardForkFeature::PowCnGpu,
        HardForkFeature::DevFundV2,
        HardForkFeature::DevFundV3,
        HardForkFeature::FixedFee,
        HardForkFeature::DiffV2,
        HardForkFeature::RingsizeInc,
        HardForkFeature::RingsizeIncReq,
        HardForkFeature::Bulletproofs,
        HardForkFeature::BulletproofsReq,
        HardForkFeature::StrictTxSemantics,
        HardForkFeature::UniformIds,
        HardForkFeature::UniformIdsReq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HardForkFeature::PowCnHeavy => "pow_cn_heavy",
            HardForkFeature::PowCnGpu => "pow_cn_gpu",
            HardForkFeature::DevFundV2 => "dev_fund_v2",
            HardForkFeature::DevFundV3 => "dev_fund_v3",
            HardForkFeature::FixedFee => "fixed_fee",
            HardForkFeature::DiffV2 => "diff_v2",
            HardForkFeature::RingsizeInc => "ringsize_inc",
            HardForkFeature::RingsizeIncReq => "ringsize_inc_req",
            HardForkFeature::Bulletproofs => "bulletproofs",
            HardForkFeature::BulletproofsReq => "bulletproofs_req",
            HardForkFeature::StrictTxSemantics => "strict_tx_semantics",
            HardForkFeature::UniformIds => "uniform_ids",
            HardForkFeature::UniformIdsReq => "uniform_ids_req",
        }
    }
}

impl fmt::Display for HardForkFeature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HardForkFeature {
    type Err = CheckpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        HardForkFeature::ALL
            .iter()
            .copied()
            .find(|feature| feature.as_str() == wanted)
            .ok_or_else(|| CheckpointError::Parse(format!("Unknown hard-fork feature: {}", s)))
    }
}

/// Minimum hard-fork version activating a feature on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkVersion {
    Version(u8),
    Disabled,
}

impl ForkVersion {
    /// Whether a chain at hard-fork `version` has this feature switched on.
    pub fn is_active_at(&self, version: u8) -> bool {
        match self {
            ForkVersion::Version(required) => version >= *required,
            ForkVersion::Disabled => false,
        }
    }
}

impl fmt::Display for ForkVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForkVersion::Version(v) => write!(f, "v{}", v),
            ForkVersion::Disabled => f.write_str("disabled"),
        }
    }
}

pub struct HardForkConf {
    pub feature: HardForkFeature,
    pub primary: ForkVersion,
    pub test: ForkVersion,
    pub staging: ForkVersion,
}

use ForkVersion::{Disabled, Version};

const fn row(
    feature: HardForkFeature,
    primary: ForkVersion,
    test: ForkVersion,
    staging: ForkVersion,
) -> HardForkConf {
    HardForkConf {
        feature,
        primary,
        test,
        staging,
    }
}

pub static FORK_CONFIG: &[HardForkConf] = &[
    row(HardForkFeature::DiffV2, Version(2), Version(2), Version(1)),
    row(HardForkFeature::PowCnHeavy, Version(3), Version(3), Version(1)),
    row(HardForkFeature::PowCnGpu, Disabled, Disabled, Disabled),
    row(HardForkFeature::DevFundV2, Version(4), Version(4), Version(1)),
    row(HardForkFeature::DevFundV3, Version(5), Version(4), Version(1)),
    row(HardForkFeature::FixedFee, Version(5), Disabled, Disabled),
    row(HardForkFeature::StrictTxSemantics, Disabled, Disabled, Disabled),
    row(HardForkFeature::RingsizeInc, Version(5), Disabled, Disabled),
    row(HardForkFeature::RingsizeIncReq, Disabled, Disabled, Disabled),
    row(HardForkFeature::Bulletproofs, Version(5), Disabled, Disabled),
    row(HardForkFeature::BulletproofsReq, Disabled, Disabled, Disabled),
    row(HardForkFeature::UniformIds, Disabled, Disabled, Disabled),
    row(HardForkFeature::UniformIdsReq, Disabled, Disabled, Disabled),
];

/// Hard-fork version at which `feature` activates on `network`.
///
/// Local chains follow the staging column. An undefined network never
/// activates anything.
pub fn required_version(network: NetworkType, feature: HardForkFeature) -> ForkVersion {
    let Some(conf) = FORK_CONFIG.iter().find(|conf| conf.feature == feature) else {
        // Every feature has a row; see test_table_is_total.
        return Disabled;
    };

    match network {
        NetworkType::Primary => conf.primary,
        NetworkType::Test => conf.test,
        NetworkType::Staging | NetworkType::Local => conf.staging,
        NetworkType::Undefined => Disabled,
    }
}

pub fn is_fork_active(network: NetworkType, feature: HardForkFeature, version: u8) -> bool {
    required_version(network, feature).is_active_at(version)
}
