//! Safe transaction data and signed transactions

use std::collections::BTreeMap;

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::{Operation, SafeSignature};
use crate::signing::build_signature_bytes;

/// The fields of a Safe transaction, as hashed for signing and passed to `execTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTransactionData {
    /// Target address
    pub to: Address,
    /// Value to send
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
    /// Gas limit for the Safe transaction
    pub safe_tx_gas: U256,
    /// Base gas (overhead)
    pub base_gas: U256,
    /// Gas price for refund calculation
    pub gas_price: U256,
    /// Token used for gas refund (address(0) for ETH)
    pub gas_token: Address,
    /// Address to receive gas refund
    pub refund_receiver: Address,
    /// Safe nonce
    pub nonce: U256,
}

impl SafeTransactionData {
    /// Creates transaction data with zeroed gas and refund parameters
    pub fn new(to: Address, value: U256, data: impl Into<Bytes>, operation: Operation) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            operation,
            safe_tx_gas: U256::ZERO,
            base_gas: U256::ZERO,
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            nonce: U256::ZERO,
        }
    }

    /// Sets the safe transaction gas
    pub fn with_safe_tx_gas(mut self, gas: U256) -> Self {
        self.safe_tx_gas = gas;
        self
    }

    /// Sets the base gas
    pub fn with_base_gas(mut self, gas: U256) -> Self {
        self.base_gas = gas;
        self
    }

    /// Sets refund parameters
    pub fn with_refund(mut self, gas_price: U256, gas_token: Address, refund_receiver: Address) -> Self {
        self.gas_price = gas_price;
        self.gas_token = gas_token;
        self.refund_receiver = refund_receiver;
        self
    }

    /// Sets the nonce
    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }
}

/// A Safe transaction together with the owner signatures collected for it
///
/// Signatures are keyed by signer, so adding a second signature from the same
/// owner replaces the first, and iteration yields them in ascending signer
/// order as `execTransaction` requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTransaction {
    /// Transaction fields
    pub data: SafeTransactionData,
    signatures: BTreeMap<Address, SafeSignature>,
}

impl SafeTransaction {
    /// Wraps transaction data with no signatures
    pub fn new(data: SafeTransactionData) -> Self {
        Self {
            data,
            signatures: BTreeMap::new(),
        }
    }

    /// Adds or replaces the signature of `signature.signer`
    pub fn add_signature(&mut self, signature: SafeSignature) {
        self.signatures.insert(signature.signer, signature);
    }

    /// Returns the signature of `signer`, if present
    pub fn signature(&self, signer: &Address) -> Option<&SafeSignature> {
        self.signatures.get(signer)
    }

    /// Returns true if `signer` already signed
    pub fn has_signature(&self, signer: &Address) -> bool {
        self.signatures.contains_key(signer)
    }

    /// Iterates the collected signatures in ascending signer order
    pub fn signatures(&self) -> impl Iterator<Item = &SafeSignature> {
        self.signatures.values()
    }

    /// Number of collected signatures
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Concatenated signature bundle for `execTransaction`
    pub fn encoded_signatures(&self) -> Bytes {
        let signatures: Vec<SafeSignature> = self.signatures.values().cloned().collect();
        build_signature_bytes(&signatures)
    }
}

impl From<SafeTransactionData> for SafeTransaction {
    fn from(data: SafeTransactionData) -> Self {
        Self::new(data)
    }
}
