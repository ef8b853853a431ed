//! Contract kinds a [`Contract`](super::Contract) can be bound to

use alloy::primitives::Address;

use super::SafeVersion;
use crate::chain::ChainConfig;

/// One of the Safe contracts
///
/// A kind names its canonical deployment in a [`ChainConfig`] and the first
/// Safe release that ships it. The ABI it speaks is picked by the methods
/// implemented on `Contract<Kind, _>`.
pub trait ContractKind: Send + Sync + 'static {
    /// Human readable contract name
    const NAME: &'static str;

    /// First release that ships this contract
    const SINCE: SafeVersion = SafeVersion::V1_0_0;

    /// Canonical address in `config`, if deployed
    fn default_address(config: &ChainConfig) -> Option<Address>;
}

/// The Safe singleton, or any Safe proxy delegating to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeSingleton;

impl ContractKind for SafeSingleton {
    const NAME: &'static str = "Safe";

    fn default_address(config: &ChainConfig) -> Option<Address> {
        Some(config.singleton())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeProxyFactory;

impl ContractKind for SafeProxyFactory {
    const NAME: &'static str = "SafeProxyFactory";

    fn default_address(config: &ChainConfig) -> Option<Address> {
        Some(config.addresses.proxy_factory)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiSend;

impl ContractKind for MultiSend {
    const NAME: &'static str = "MultiSend";

    fn default_address(config: &ChainConfig) -> Option<Address> {
        Some(config.addresses.multi_send)
    }
}

/// MultiSend variant that refuses delegate calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiSendCallOnly;

impl ContractKind for MultiSendCallOnly {
    const NAME: &'static str = "MultiSendCallOnly";
    const SINCE: SafeVersion = SafeVersion::V1_3_0;

    fn default_address(config: &ChainConfig) -> Option<Address> {
        config.addresses.multi_send_call_only
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateCall;

impl ContractKind for CreateCall {
    const NAME: &'static str = "CreateCall";

    fn default_address(config: &ChainConfig) -> Option<Address> {
        config.addresses.create_call
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignMessageLib;

impl ContractKind for SignMessageLib {
    const NAME: &'static str = "SignMessageLib";
    const SINCE: SafeVersion = SafeVersion::V1_3_0;

    fn default_address(config: &ChainConfig) -> Option<Address> {
        config.addresses.sign_message_lib
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityFallbackHandler;

impl ContractKind for CompatibilityFallbackHandler {
    const NAME: &'static str = "CompatibilityFallbackHandler";
    const SINCE: SafeVersion = SafeVersion::V1_1_1;

    fn default_address(config: &ChainConfig) -> Option<Address> {
        config.addresses.fallback_handler
    }
}
