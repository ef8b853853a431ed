//! Local ECDSA signing for Safe transactions

use alloy::primitives::{Bytes, B256};
use alloy::signers::Signer;

use crate::error::{Error, Result};
use crate::types::SIGNATURE_LENGTH;

/// Signs a Safe transaction hash directly
///
/// Returns `r || s || v` with `v` in {27, 28}, the form the contract verifies
/// against the bare hash (also the result of EIP-712 signing).
pub async fn sign_hash<S: Signer>(signer: &S, hash: B256) -> Result<Bytes> {
    let signature = signer.sign_hash(&hash).await?;
    Ok(Bytes::copy_from_slice(&signature.as_bytes()))
}

/// Signs a Safe transaction hash with the EIP-191 message prefix
///
/// `v` is raised to 31 or 32 so the contract recovers over the prefixed hash.
pub async fn eth_sign_hash<S: Signer + Sync>(signer: &S, hash: B256) -> Result<Bytes> {
    let signature = signer.sign_message(hash.as_slice()).await?;
    let mut bytes = signature.as_bytes();
    bytes[64] += 4;
    Ok(Bytes::copy_from_slice(&bytes))
}

/// Validates that a signature is 65 bytes and has a `v` the contract understands
pub fn validate_signature(signature: &[u8]) -> Result<()> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(Error::InvalidSignature(format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            signature.len()
        )));
    }

    let v = signature[64];
    // 0 contract, 1 approved hash, 27/28 ECDSA, 31/32 eth_sign
    if !matches!(v, 0 | 1 | 27 | 28 | 31 | 32) {
        return Err(Error::InvalidSignature(format!("unexpected v value {v}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::recover_signer;
    use alloy::signers::local::PrivateKeySigner;

    #[tokio::test]
    async fn test_sign_hash() {
        let signer = PrivateKeySigner::random();
        let hash = B256::repeat_byte(0x42);

        let signature = sign_hash(&signer, hash).await.unwrap();

        assert_eq!(signature.len(), 65);
        assert!(matches!(signature[64], 27 | 28));
        assert_eq!(recover_signer(hash, &signature).unwrap(), signer.address());
    }

    #[tokio::test]
    async fn test_eth_sign_hash() {
        let signer = PrivateKeySigner::random();
        let hash = B256::repeat_byte(0x42);

        let signature = eth_sign_hash(&signer, hash).await.unwrap();

        assert_eq!(signature.len(), 65);
        assert!(matches!(signature[64], 31 | 32));
        assert_eq!(recover_signer(hash, &signature).unwrap(), signer.address());
    }

    #[test]
    fn test_validate_signature() {
        let mut sig = vec![0u8; 65];
        for v in [0u8, 1, 27, 28, 31, 32] {
            sig[64] = v;
            assert!(validate_signature(&sig).is_ok());
        }

        assert!(validate_signature(&[0u8; 64]).is_err());

        sig[64] = 99;
        assert!(validate_signature(&sig).is_err());
    }
}
