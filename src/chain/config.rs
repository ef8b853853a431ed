//! Chain configuration for Safe contract addresses

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::contracts::SafeVersion;

/// Canonical Safe contract addresses for one contract version
///
/// These addresses are the same across all chains that use the singleton
/// factory (CREATE2 deployment). Contracts that do not exist for a version are
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAddresses {
    /// Safe singleton address
    pub safe_singleton: Address,
    /// Safe singleton emitting L2 events
    pub safe_l2_singleton: Option<Address>,
    /// Safe proxy factory address
    pub proxy_factory: Address,
    /// MultiSend contract address
    pub multi_send: Address,
    /// MultiSendCallOnly contract address
    pub multi_send_call_only: Option<Address>,
    /// Default fallback handler
    pub fallback_handler: Option<Address>,
    /// CreateCall library address
    pub create_call: Option<Address>,
    /// SignMessageLib address
    pub sign_message_lib: Option<Address>,
}

impl Default for ChainAddresses {
    fn default() -> Self {
        Self::v1_4_1()
    }
}

impl ChainAddresses {
    /// Returns the canonical addresses for `version`
    pub fn for_version(version: SafeVersion) -> Self {
        match version {
            SafeVersion::V1_0_0 => Self::v1_0_0(),
            SafeVersion::V1_1_1 => Self::v1_1_1(),
            SafeVersion::V1_2_0 => Self::v1_2_0(),
            SafeVersion::V1_3_0 => Self::v1_3_0(),
            SafeVersion::V1_4_1 => Self::v1_4_1(),
        }
    }

    /// Returns the canonical Safe v1.4.1 addresses
    pub fn v1_4_1() -> Self {
        Self {
            safe_singleton: address!("41675C099F32341bf84BFc5382aF534df5C7461a"),
            safe_l2_singleton: Some(address!("29fcB43b46531BcA003ddC8FCB67FFE91900C762")),
            proxy_factory: address!("4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67"),
            multi_send: address!("38869bf66a61cF6bDB996A6aE40D5853Fd43B526"),
            multi_send_call_only: Some(address!("9641d764fc13c8B624c04430C7356C1C7C8102e2")),
            fallback_handler: Some(address!("fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99")),
            create_call: Some(address!("9b35Af71d77eaf8d7e40252370304687390A1A52")),
            sign_message_lib: Some(address!("d53cd0aB83D845Ac265BE939c57F53AD838012c9")),
        }
    }

    /// Returns the canonical Safe v1.3.0 addresses
    pub fn v1_3_0() -> Self {
        Self {
            safe_singleton: address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552"),
            safe_l2_singleton: Some(address!("3E5c63644E683549055b9Be8653de26E0B4CD36E")),
            proxy_factory: address!("a6B71E26C5e0845f74c812102Ca7114b6a896AB2"),
            multi_send: address!("A238CBeb142c10Ef7Ad8442C6D1f9E89e07e7761"),
            multi_send_call_only: Some(address!("40A2aCCbd92BCA938b02010E17A5b8929b49130D")),
            fallback_handler: Some(address!("f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4")),
            create_call: Some(address!("7cbB62EaA69F79e6873cD1ecB2392971036cFAa4")),
            sign_message_lib: Some(address!("A65387F16B013cf2Af4605Ad8aA5ec25a2cbA3a2")),
        }
    }

    /// Returns the canonical Safe v1.2.0 addresses
    pub fn v1_2_0() -> Self {
        Self {
            safe_singleton: address!("6851D6fDFAfD08c0295C392436245E5bc78B0185"),
            ..Self::v1_1_1()
        }
    }

    /// Returns the canonical Safe v1.1.1 addresses
    pub fn v1_1_1() -> Self {
        Self {
            safe_singleton: address!("34CfAC646f301356fAa8B21e94227e3583Fe3F5F"),
            safe_l2_singleton: None,
            proxy_factory: address!("76E2cFc1F5Fa8F6a5b3fC4c8F4788F0116861F9B"),
            multi_send: address!("8D29bE29923b68abfDD21e541b9374737B49cdAD"),
            multi_send_call_only: None,
            fallback_handler: Some(address!("d5D82B6aDDc9027B22dCA772Aa68D5d74cdBdF44")),
            create_call: Some(address!("8538FcBccba7f5303d2C679Fa5d7A629A8c9bf4A")),
            sign_message_lib: None,
        }
    }

    /// Returns the canonical Safe v1.0.0 addresses
    ///
    /// v1.0.0 has no MultiSend or CreateCall of its own; the v1.1.1 libraries are used.
    pub fn v1_0_0() -> Self {
        Self {
            safe_singleton: address!("b6029EA3B2c51D09a50B53CA8012FeEB05bDa35A"),
            proxy_factory: address!("12302fE9c02ff50939BaAaaf415fc226C078613C"),
            fallback_handler: None,
            ..Self::v1_1_1()
        }
    }

    /// Creates a custom address configuration
    pub fn custom(safe_singleton: Address, proxy_factory: Address, multi_send: Address) -> Self {
        Self {
            safe_singleton,
            safe_l2_singleton: None,
            proxy_factory,
            multi_send,
            multi_send_call_only: None,
            fallback_handler: None,
            create_call: None,
            sign_message_lib: None,
        }
    }
}

/// Chain configuration: chain ID, contract version and the addresses to bind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Safe contract version the wrappers bind to
    pub version: SafeVersion,
    /// Contract addresses
    pub addresses: ChainAddresses,
    /// Use the L1 singleton even where an L2 singleton exists
    pub l1_singleton: bool,
}

impl ChainConfig {
    /// Creates a new chain configuration with canonical v1.4.1 addresses
    pub fn new(chain_id: u64) -> Self {
        Self::with_version(chain_id, SafeVersion::default())
    }

    /// Creates a chain configuration with the canonical addresses of `version`
    pub fn with_version(chain_id: u64, version: SafeVersion) -> Self {
        Self {
            chain_id,
            version,
            addresses: ChainAddresses::for_version(version),
            l1_singleton: true,
        }
    }

    /// Creates a chain configuration with custom addresses
    pub fn with_addresses(chain_id: u64, version: SafeVersion, addresses: ChainAddresses) -> Self {
        Self {
            chain_id,
            version,
            addresses,
            l1_singleton: true,
        }
    }

    /// Prefer the L2 singleton (emits events per transaction) when one exists
    pub fn l2(mut self) -> Self {
        self.l1_singleton = false;
        self
    }

    /// The singleton new Safes should point at
    pub fn singleton(&self) -> Address {
        match (self.l1_singleton, self.addresses.safe_l2_singleton) {
            (false, Some(l2)) => l2,
            _ => self.addresses.safe_singleton,
        }
    }

    /// Returns configuration for Ethereum mainnet
    pub fn mainnet() -> Self {
        Self::new(chain_ids::MAINNET)
    }

    /// Returns configuration for Sepolia testnet
    pub fn sepolia() -> Self {
        Self::new(chain_ids::SEPOLIA)
    }

    /// Returns configuration for Arbitrum
    pub fn arbitrum() -> Self {
        Self::new(chain_ids::ARBITRUM).l2()
    }

    /// Returns configuration for Optimism
    pub fn optimism() -> Self {
        Self::new(chain_ids::OPTIMISM).l2()
    }

    /// Returns configuration for Base
    pub fn base() -> Self {
        Self::new(chain_ids::BASE).l2()
    }

    /// Returns configuration for Polygon
    pub fn polygon() -> Self {
        Self::new(chain_ids::POLYGON).l2()
    }

    /// Returns configuration for Gnosis Chain
    pub fn gnosis() -> Self {
        Self::new(chain_ids::GNOSIS).l2()
    }
}

/// Well-known chain IDs
pub mod chain_ids {
    pub const MAINNET: u64 = 1;
    pub const SEPOLIA: u64 = 11155111;
    pub const ARBITRUM: u64 = 42161;
    pub const OPTIMISM: u64 = 10;
    pub const BASE: u64 = 8453;
    pub const POLYGON: u64 = 137;
    pub const BSC: u64 = 56;
    pub const AVALANCHE: u64 = 43114;
    pub const GNOSIS: u64 = 100;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_4_1_addresses() {
        let addrs = ChainAddresses::v1_4_1();
        assert_eq!(
            addrs.safe_singleton,
            address!("41675C099F32341bf84BFc5382aF534df5C7461a")
        );
        assert_eq!(
            addrs.multi_send_call_only,
            Some(address!("9641d764fc13c8B624c04430C7356C1C7C8102e2"))
        );
    }

    #[test]
    fn test_older_versions_lack_call_only() {
        assert!(ChainAddresses::v1_2_0().multi_send_call_only.is_none());
        assert!(ChainAddresses::v1_0_0().fallback_handler.is_none());
        assert_eq!(
            ChainAddresses::v1_0_0().multi_send,
            ChainAddresses::v1_1_1().multi_send
        );
    }

    #[test]
    fn test_for_version_matches_named_tables() {
        assert_eq!(
            ChainAddresses::for_version(SafeVersion::V1_3_0),
            ChainAddresses::v1_3_0()
        );
        assert_eq!(ChainAddresses::default(), ChainAddresses::v1_4_1());
    }

    #[test]
    fn test_singleton_selection() {
        let mainnet = ChainConfig::mainnet();
        assert_eq!(mainnet.chain_id, 1);
        assert_eq!(mainnet.singleton(), ChainAddresses::v1_4_1().safe_singleton);

        let base = ChainConfig::base();
        assert_eq!(base.singleton(), ChainAddresses::v1_4_1().safe_l2_singleton.unwrap());

        let old = ChainConfig::with_version(100, SafeVersion::V1_1_1).l2();
        assert_eq!(old.singleton(), ChainAddresses::v1_1_1().safe_singleton);
    }
}
