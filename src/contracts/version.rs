//! Supported Safe contract versions and the features each one carries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A released Safe contract version
///
/// Versions are ordered, so feature checks read as `version >= SafeVersion::V1_3_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SafeVersion {
    V1_0_0,
    V1_1_1,
    V1_2_0,
    V1_3_0,
    #[default]
    V1_4_1,
}

/// Behaviour that differs between Safe versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeFeature {
    /// `safeTxGas` may be zero
    SafeTxGasOptional,
    /// Transaction guards
    SafeTxGuards,
    /// Fallback handler configurable in `setup`
    SafeFallbackHandler,
    /// `eth_sign` signatures (v > 30)
    EthSign,
    /// `safeTxGas` must be set
    RequiredTxGas,
    /// `StorageAccessible`: `getStorageAt` and `simulateAndRevert`
    SimulateAndRevert,
}

impl SafeVersion {
    /// All supported versions, oldest first
    pub const ALL: [SafeVersion; 5] = [
        SafeVersion::V1_0_0,
        SafeVersion::V1_1_1,
        SafeVersion::V1_2_0,
        SafeVersion::V1_3_0,
        SafeVersion::V1_4_1,
    ];

    /// Returns the semantic version string
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeVersion::V1_0_0 => "1.0.0",
            SafeVersion::V1_1_1 => "1.1.1",
            SafeVersion::V1_2_0 => "1.2.0",
            SafeVersion::V1_3_0 => "1.3.0",
            SafeVersion::V1_4_1 => "1.4.1",
        }
    }

    /// Whether contracts of this version implement `feature`
    pub fn has_feature(&self, feature: SafeFeature) -> bool {
        match feature {
            SafeFeature::SafeTxGasOptional
            | SafeFeature::SafeTxGuards
            | SafeFeature::SimulateAndRevert => *self >= SafeVersion::V1_3_0,
            SafeFeature::SafeFallbackHandler | SafeFeature::EthSign => *self >= SafeVersion::V1_1_1,
            SafeFeature::RequiredTxGas => *self <= SafeVersion::V1_2_0,
        }
    }

    /// Whether the EIP-712 domain includes the chain id
    pub fn domain_has_chain_id(&self) -> bool {
        *self >= SafeVersion::V1_3_0
    }

    /// Name of the refund gas field of `SafeTx`
    pub fn base_gas_field(&self) -> &'static str {
        match self {
            SafeVersion::V1_0_0 => "dataGas",
            _ => "baseGas",
        }
    }
}

impl fmt::Display for SafeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeVersion {
    type Err = Error;

    /// Parses `"1.3.0"`, also accepting a leading `v` and the `+L2` build suffix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let trimmed = trimmed.split('+').next().unwrap_or(trimmed);

        SafeVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == trimmed)
            .ok_or_else(|| Error::UnsupportedVersion(s.to_string()))
    }
}

impl TryFrom<String> for SafeVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SafeVersion> for String {
    fn from(version: SafeVersion) -> Self {
        version.as_str().to_string()
    }
}
