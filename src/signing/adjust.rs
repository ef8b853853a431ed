//! Recovery byte normalization and pre-validated signatures

use alloy::primitives::{Address, Bytes, Signature, B256, U256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{SafeSignature, SIGNATURE_LENGTH};

/// Lowest `v` an ECDSA signature carries on Ethereum
const MIN_VALID_V: u8 = 27;

/// Offset the Safe contract expects on `v` for `eth_sign` signatures
const ETH_SIGN_V_OFFSET: u8 = 4;

/// How a signature was obtained from its wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedWith {
    /// `eth_sign` / `personal_sign` over `hash` by `signer`
    EthSign { hash: B256, signer: Address },
    /// One of the `eth_signTypedData` methods
    TypedData,
}

/// Normalizes the recovery byte of a wallet signature for the Safe contract
///
/// Hardware wallets return `v` as 0 or 1; those are moved to 27 or 28. For
/// `eth_sign` signatures `v` is further raised by 4 whenever the signature does
/// not recover to `signer` over the bare hash, which is how the contract tells
/// prefixed messages apart.
pub fn adjust_v_in_signature(signature: &[u8], signed_with: SignedWith) -> Result<Bytes> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(Error::InvalidSignature(format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            signature.len()
        )));
    }

    let mut v = signature[SIGNATURE_LENGTH - 1];
    if !matches!(v, 0 | 1 | 27 | 28) {
        return Err(Error::InvalidSignature(format!("unexpected v value {v}")));
    }
    if v < MIN_VALID_V {
        v += MIN_VALID_V;
    }

    let mut adjusted = signature.to_vec();
    adjusted[SIGNATURE_LENGTH - 1] = v;

    if let SignedWith::EthSign { hash, signer } = signed_with {
        if is_tx_hash_signed_with_prefix(hash, &adjusted, signer) {
            debug!(%signer, "signature does not recover over the bare hash, marking as eth_sign");
            adjusted[SIGNATURE_LENGTH - 1] = v + ETH_SIGN_V_OFFSET;
        }
    }

    Ok(adjusted.into())
}

/// Returns true if `signature` looks like it was made over the EIP-191 prefixed `hash`
///
/// This is a heuristic: the signature is recovered over the bare hash and any
/// result other than `owner`, including a failed recovery, counts as prefixed.
/// A malformed signature therefore also reports `true`.
pub fn is_tx_hash_signed_with_prefix(hash: B256, signature: &[u8], owner: Address) -> bool {
    match recover_unprefixed(hash, signature) {
        Some(recovered) => recovered != owner,
        None => true,
    }
}

fn recover_unprefixed(hash: B256, signature: &[u8]) -> Option<Address> {
    if signature.len() != SIGNATURE_LENGTH {
        return None;
    }
    let y_parity = match signature[64] {
        27 => false,
        28 => true,
        _ => return None,
    };
    let r = U256::from_be_slice(&signature[..32]);
    let s = U256::from_be_slice(&signature[32..64]);
    Signature::new(r, s, y_parity)
        .recover_address_from_prehash(&hash)
        .ok()
}

/// Builds the pre-validated signature of `owner`
///
/// `r` holds the owner address, `s` is zero and `v` is 1. The contract accepts
/// it when `owner` sends the transaction or approved the hash on-chain.
pub fn generate_pre_validated_signature(owner: Address) -> SafeSignature {
    let mut data = [0u8; SIGNATURE_LENGTH];
    data[12..32].copy_from_slice(owner.as_slice());
    data[64] = 1;
    SafeSignature::new(owner, data.to_vec())
}
