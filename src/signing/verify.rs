//! Off-chain checks mirroring the contract's signature verification

use alloy::primitives::{eip191_hash_message, Address, Signature, B256, U256};

use crate::error::{Error, Result};
use crate::types::SIGNATURE_LENGTH;

/// Recovers the owner a single 65-byte Safe signature stands for
///
/// - `v = 0`: contract signature, owner in `r` (EIP-1271 is left to the contract)
/// - `v = 1`: approved hash, owner in `r`
/// - `v > 30`: `eth_sign`, recovered over the EIP-191 prefixed hash with `v - 4`
/// - otherwise: ECDSA over the hash itself
pub fn recover_signer(hash: B256, signature: &[u8]) -> Result<Address> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(Error::InvalidSignature(format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            signature.len()
        )));
    }

    let v = signature[64];
    let r = U256::from_be_slice(&signature[..32]);
    let s = U256::from_be_slice(&signature[32..64]);

    let (digest, v) = match v {
        0 | 1 => return Ok(Address::from_slice(&signature[12..32])),
        31 | 32 => (eip191_hash_message(hash), v - 4),
        27 | 28 => (hash, v),
        other => {
            return Err(Error::InvalidSignature(format!("unexpected v value {other}")));
        }
    };

    Ok(Signature::new(r, s, v == 28).recover_address_from_prehash(&digest)?)
}

/// Checks a signature bundle against the owners and threshold of a Safe
///
/// Reads `threshold` static parts like `checkNSignatures`, recovers each
/// signer, and requires every signer to be an owner, in strictly ascending
/// order. Contract signature offsets must point inside the bundle. Returns the
/// recovered signers.
pub fn check_signature_bundle(
    hash: B256,
    signatures: &[u8],
    owners: &[Address],
    threshold: u64,
) -> Result<Vec<Address>> {
    let required = usize::try_from(threshold)
        .map_err(|_| Error::InvalidSignature(format!("threshold {threshold} out of range")))?;
    let static_len = required.saturating_mul(SIGNATURE_LENGTH);

    if threshold == 0 || signatures.len() < static_len {
        return Err(Error::InsufficientSignatures {
            threshold,
            provided: (signatures.len() / SIGNATURE_LENGTH) as u64,
        });
    }

    let mut signers = Vec::with_capacity(required);
    let mut last = Address::ZERO;

    for part in signatures[..static_len].chunks_exact(SIGNATURE_LENGTH) {
        if part[64] == 0 {
            check_contract_signature_offset(part, signatures, static_len)?;
        }

        let signer = recover_signer(hash, part)?;
        if signer <= last {
            return Err(Error::DuplicateSigner(signer));
        }
        if !owners.contains(&signer) {
            return Err(Error::InvalidSignature(format!("{signer} is not an owner")));
        }

        last = signer;
        signers.push(signer);
    }

    Ok(signers)
}

fn check_contract_signature_offset(part: &[u8], bundle: &[u8], static_len: usize) -> Result<()> {
    let out_of_bounds = || Error::InvalidSignature("contract signature offset out of bounds".into());

    let offset: usize = U256::from_be_slice(&part[32..64])
        .try_into()
        .map_err(|_| out_of_bounds())?;
    if offset < static_len || offset.saturating_add(32) > bundle.len() {
        return Err(out_of_bounds());
    }

    let len: usize = U256::from_be_slice(&bundle[offset..offset + 32])
        .try_into()
        .map_err(|_| out_of_bounds())?;
    if offset.saturating_add(32).saturating_add(len) > bundle.len() {
        return Err(out_of_bounds());
    }

    Ok(())
}
