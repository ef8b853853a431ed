//! Chain access used by the contract wrappers and the Safe kit
//!
//! Everything above this module talks to a node through [`ChainClient`], so
//! the same wrappers run on top of an alloy provider with a local key
//! ([`ProviderClient`]) or on a wallet that only speaks raw JSON-RPC
//! ([`Eip1193Client`]).

use std::future::Future;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::encoding::SafeTypedData;
use crate::error::Result;
use crate::signing::SigningMethod;

mod eip1193;
mod provider;

pub use eip1193::Eip1193Client;
pub use provider::ProviderClient;

/// Overrides for a call or transaction sent to the chain
///
/// Unset fields are left to the client and the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOptions {
    /// Sender; defaults to the client's signer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// Legacy gas price; mutually exclusive with the EIP-1559 fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<u128>,
    /// Account nonce of the sender (not the Safe nonce)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// Native value sent along
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl TransactionOptions {
    /// Sets the sender
    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Sets the native value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// A call against one contract, with the options to send it with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
    pub options: TransactionOptions,
}

impl CallRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            options: TransactionOptions::default(),
        }
    }

    /// Replaces the options
    pub fn with_options(mut self, options: TransactionOptions) -> Self {
        self.options = options;
        self
    }
}

/// A transaction accepted by the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    /// Transaction hash
    pub hash: B256,
    /// Options the transaction was sent with, including populated gas
    pub options: TransactionOptions,
}

/// What the Safe SDK needs from a connection to a chain
///
/// Implementations own their transport and signer and are cheap to clone.
pub trait ChainClient: Send + Sync {
    /// Chain id of the connected network
    fn chain_id(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Account used for signing and sending
    fn signer_address(&self) -> impl Future<Output = Result<Address>> + Send;

    /// Executes `eth_call` and returns the raw return data
    fn call(&self, request: &CallRequest) -> impl Future<Output = Result<Bytes>> + Send;

    /// Executes `eth_estimateGas`
    fn estimate_gas(&self, request: &CallRequest) -> impl Future<Output = Result<u64>> + Send;

    /// Signs and broadcasts a transaction, returning its hash
    fn send_transaction(&self, request: CallRequest) -> impl Future<Output = Result<B256>> + Send;

    /// Signs a 32-byte hash as an EIP-191 personal message
    fn sign_message(&self, hash: B256) -> impl Future<Output = Result<Bytes>> + Send;

    /// Signs Safe typed data with the given `eth_signTypedData` flavour
    fn sign_typed_data(
        &self,
        typed_data: &SafeTypedData,
        method: SigningMethod,
    ) -> impl Future<Output = Result<Bytes>> + Send;

    /// Deployed bytecode at `address`, empty when there is none
    fn get_code(&self, address: Address) -> impl Future<Output = Result<Bytes>> + Send;

    /// Receipt status of a transaction; `None` while it is pending
    fn transaction_status(&self, hash: B256) -> impl Future<Output = Result<Option<bool>>> + Send;

    /// Waits until the transaction is mined and returns its receipt status
    fn wait_for_transaction(&self, hash: B256) -> impl Future<Output = Result<bool>> + Send;
}
