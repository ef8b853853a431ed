//! EIP-712 hashing and typed data for Safe transactions

use alloy::primitives::{keccak256, Address, B256, U256};
use serde_json::{json, Value};

use crate::contracts::{
    SafeVersion, DOMAIN_SEPARATOR_TYPEHASH, LEGACY_DOMAIN_SEPARATOR_TYPEHASH,
    LEGACY_SAFE_TX_TYPEHASH, SAFE_TX_TYPEHASH,
};
use crate::types::SafeTransactionData;

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Computes the domain separator for a Safe
///
/// v1.3.0 and later:
/// `keccak256(abi.encode(DOMAIN_SEPARATOR_TYPEHASH, chainId, safeAddress))`.
/// Older versions leave the chain id out of the domain.
pub fn compute_domain_separator(version: SafeVersion, chain_id: u64, safe_address: Address) -> B256 {
    let mut encoded = Vec::with_capacity(96);

    if version.domain_has_chain_id() {
        encoded.extend_from_slice(&DOMAIN_SEPARATOR_TYPEHASH);
        encoded.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    } else {
        encoded.extend_from_slice(&LEGACY_DOMAIN_SEPARATOR_TYPEHASH);
    }

    encoded.extend_from_slice(&address_word(safe_address));

    keccak256(&encoded)
}

/// Computes the struct hash for SafeTx
///
/// safeTxHash = keccak256(abi.encode(
///     SAFE_TX_TYPEHASH,
///     to, value, keccak256(data), operation,
///     safeTxGas, baseGas, gasPrice, gasToken, refundReceiver, nonce
/// ))
///
/// v1.0.0 named `baseGas` `dataGas`, which changes the type hash.
pub fn compute_safe_tx_hash(version: SafeVersion, tx: &SafeTransactionData) -> B256 {
    let mut encoded = Vec::with_capacity(352);

    let typehash = match version {
        SafeVersion::V1_0_0 => &LEGACY_SAFE_TX_TYPEHASH,
        _ => &SAFE_TX_TYPEHASH,
    };
    encoded.extend_from_slice(typehash);
    encoded.extend_from_slice(&address_word(tx.to));
    encoded.extend_from_slice(&tx.value.to_be_bytes::<32>());
    encoded.extend_from_slice(keccak256(&tx.data).as_slice());

    let mut op_bytes = [0u8; 32];
    op_bytes[31] = tx.operation.as_u8();
    encoded.extend_from_slice(&op_bytes);

    encoded.extend_from_slice(&tx.safe_tx_gas.to_be_bytes::<32>());
    encoded.extend_from_slice(&tx.base_gas.to_be_bytes::<32>());
    encoded.extend_from_slice(&tx.gas_price.to_be_bytes::<32>());
    encoded.extend_from_slice(&address_word(tx.gas_token));
    encoded.extend_from_slice(&address_word(tx.refund_receiver));
    encoded.extend_from_slice(&tx.nonce.to_be_bytes::<32>());

    keccak256(&encoded)
}

/// Computes the final EIP-712 hash to sign
///
/// hash = keccak256("\x19\x01" || domainSeparator || safeTxHash)
pub fn compute_transaction_hash(domain_separator: B256, safe_tx_hash: B256) -> B256 {
    let mut encoded = Vec::with_capacity(66);
    encoded.extend_from_slice(&[0x19, 0x01]);
    encoded.extend_from_slice(domain_separator.as_slice());
    encoded.extend_from_slice(safe_tx_hash.as_slice());
    keccak256(&encoded)
}

/// Computes the complete transaction hash for signing
///
/// Matches `getTransactionHash` on a Safe of the given version.
pub fn compute_safe_transaction_hash(
    version: SafeVersion,
    chain_id: u64,
    safe_address: Address,
    tx: &SafeTransactionData,
) -> B256 {
    let domain_separator = compute_domain_separator(version, chain_id, safe_address);
    let safe_tx_hash = compute_safe_tx_hash(version, tx);
    compute_transaction_hash(domain_separator, safe_tx_hash)
}

/// EIP-712 typed data for a Safe transaction
///
/// Carries both the JSON document wallets expect for `eth_signTypedData` and
/// the digest it hashes to, so local signers can sign the digest directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeTypedData {
    /// Digest a wallet signs for this document
    pub hash: B256,
    /// `{ types, primaryType, domain, message }` document
    pub payload: Value,
}

impl SafeTypedData {
    /// Builds the typed data for `tx` on the Safe at `safe_address`
    pub fn new(
        version: SafeVersion,
        chain_id: u64,
        safe_address: Address,
        tx: &SafeTransactionData,
    ) -> Self {
        let (domain_types, domain) = if version.domain_has_chain_id() {
            (
                json!([
                    { "name": "chainId", "type": "uint256" },
                    { "name": "verifyingContract", "type": "address" },
                ]),
                json!({ "chainId": chain_id, "verifyingContract": safe_address }),
            )
        } else {
            (
                json!([{ "name": "verifyingContract", "type": "address" }]),
                json!({ "verifyingContract": safe_address }),
            )
        };

        let base_gas = version.base_gas_field();
        let mut message = json!({
            "to": tx.to,
            "value": tx.value.to_string(),
            "data": tx.data,
            "operation": tx.operation.as_u8(),
            "safeTxGas": tx.safe_tx_gas.to_string(),
            "gasPrice": tx.gas_price.to_string(),
            "gasToken": tx.gas_token,
            "refundReceiver": tx.refund_receiver,
            "nonce": tx.nonce.to_string(),
        });
        message[base_gas] = json!(tx.base_gas.to_string());

        let payload = json!({
            "types": {
                "EIP712Domain": domain_types,
                "SafeTx": [
                    { "name": "to", "type": "address" },
                    { "name": "value", "type": "uint256" },
                    { "name": "data", "type": "bytes" },
                    { "name": "operation", "type": "uint8" },
                    { "name": "safeTxGas", "type": "uint256" },
                    { "name": base_gas, "type": "uint256" },
                    { "name": "gasPrice", "type": "uint256" },
                    { "name": "gasToken", "type": "address" },
                    { "name": "refundReceiver", "type": "address" },
                    { "name": "nonce", "type": "uint256" },
                ],
            },
            "primaryType": "SafeTx",
            "domain": domain,
            "message": message,
        });

        Self {
            hash: compute_safe_transaction_hash(version, chain_id, safe_address, tx),
            payload,
        }
    }
}
