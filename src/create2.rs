//! Counterfactual Safe deployment
//!
//! The proxy factory deploys proxies with CREATE2, so the address of a new
//! Safe follows from its singleton, its `setup` call and a salt nonce before
//! anything is sent.

use alloy::primitives::{keccak256, Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::chain::ChainConfig;
use crate::client::ChainClient;
use crate::contracts::{ISafeSetup, SafeFeature, SafeProxyFactoryContract};
use crate::error::{Error, Result};

/// Owners and threshold of a Safe to deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeAccountConfig {
    pub owners: Vec<Address>,
    pub threshold: u64,
    /// Defaults to the canonical handler of the configured version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_handler: Option<Address>,
}

impl SafeAccountConfig {
    pub fn new(owners: Vec<Address>, threshold: u64) -> Self {
        Self {
            owners,
            threshold,
            fallback_handler: None,
        }
    }

    /// Sets the fallback handler
    pub fn with_fallback_handler(mut self, handler: Address) -> Self {
        self.fallback_handler = Some(handler);
        self
    }
}

/// Encodes the `setup` call used as the proxy initializer
///
/// The v1.0.0 `setup` has no fallback handler argument and is not supported.
pub fn encode_setup_call(config: &ChainConfig, account: &SafeAccountConfig) -> Result<Bytes> {
    if !config.version.has_feature(SafeFeature::SafeFallbackHandler) {
        return Err(Error::UnsupportedFunction {
            function: "setup",
            version: config.version,
        });
    }
    if account.threshold == 0 || account.threshold as usize > account.owners.len() {
        return Err(Error::InvalidThreshold {
            threshold: account.threshold,
            owners: account.owners.len(),
        });
    }

    let fallback_handler = account
        .fallback_handler
        .or(config.addresses.fallback_handler)
        .unwrap_or(Address::ZERO);

    let setup_call = ISafeSetup::setupCall {
        _owners: account.owners.clone(),
        _threshold: U256::from(account.threshold),
        to: Address::ZERO,
        data: Bytes::new(),
        fallbackHandler: fallback_handler,
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
    };

    Ok(setup_call.abi_encode().into())
}

/// Computes the CREATE2 address of a Safe proxy
///
/// ```text
/// salt = keccak256(keccak256(initializer) ++ saltNonce)
/// init_code = proxyCreationCode ++ uint256(singleton)
/// ```
pub fn compute_create2_address(
    factory: Address,
    singleton: Address,
    initializer: &Bytes,
    salt_nonce: U256,
    creation_code: &Bytes,
) -> Address {
    let mut salt_input = [0u8; 64];
    salt_input[..32].copy_from_slice(keccak256(initializer).as_slice());
    salt_input[32..].copy_from_slice(&salt_nonce.to_be_bytes::<32>());
    let salt = keccak256(salt_input);

    let mut init_code = creation_code.to_vec();
    init_code.extend_from_slice(&[0u8; 12]);
    init_code.extend_from_slice(singleton.as_slice());

    factory.create2(salt, keccak256(&init_code))
}

/// Predicts the address a Safe for `account` will be deployed at
///
/// Reads the proxy creation code from the configured factory.
pub async fn predict_safe_address<C: ChainClient>(
    client: C,
    config: &ChainConfig,
    account: &SafeAccountConfig,
    salt_nonce: U256,
) -> Result<Address> {
    let initializer = encode_setup_call(config, account)?;
    let factory = SafeProxyFactoryContract::new(client, config)?;
    let creation_code = factory.proxy_creation_code().await?;

    Ok(compute_create2_address(
        factory.address(),
        config.singleton(),
        &initializer,
        salt_nonce,
        &creation_code,
    ))
}
