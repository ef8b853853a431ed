//! Owner signatures attached to Safe transactions

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::signing::validate_signature;

/// Size of the static part of every Safe signature: r (32) || s (32) || v (1)
pub const SIGNATURE_LENGTH: usize = 65;

/// A signature from one Safe owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeSignature {
    /// Owner that produced the signature
    pub signer: Address,
    /// Raw signature bytes; for contract signatures, the EIP-1271 payload
    pub data: Bytes,
    /// Whether `data` is an EIP-1271 contract signature
    #[serde(default)]
    pub is_contract_signature: bool,
}

impl SafeSignature {
    /// Creates an ECDSA (or pre-validated) signature
    pub fn new(signer: Address, data: impl Into<Bytes>) -> Self {
        Self {
            signer,
            data: data.into(),
            is_contract_signature: false,
        }
    }

    /// Creates an ECDSA or pre-validated signature from untrusted bytes
    ///
    /// Rejects anything that would not fill exactly one 65-byte slot of the
    /// bundle or carries a `v` the contract does not accept.
    pub fn try_new(signer: Address, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        validate_signature(&data)?;
        Ok(Self::new(signer, data))
    }

    /// Creates an EIP-1271 contract signature owned by `signer`
    pub fn contract(signer: Address, data: impl Into<Bytes>) -> Self {
        Self {
            signer,
            data: data.into(),
            is_contract_signature: true,
        }
    }

    /// Returns the 65-byte static part
    ///
    /// Contract signatures encode `r = signer`, `s = dynamic_offset`, `v = 0`;
    /// every other signature is its raw bytes.
    pub fn static_part(&self, dynamic_offset: usize) -> Bytes {
        if !self.is_contract_signature {
            return self.data.clone();
        }

        let mut part = Vec::with_capacity(SIGNATURE_LENGTH);
        let mut r = [0u8; 32];
        r[12..].copy_from_slice(self.signer.as_slice());
        part.extend_from_slice(&r);
        part.extend_from_slice(&U256::from(dynamic_offset).to_be_bytes::<32>());
        part.push(0);
        Bytes::from(part)
    }

    /// Returns the dynamic part: `len (32 bytes) || data` for contract signatures, empty otherwise
    pub fn dynamic_part(&self) -> Bytes {
        if !self.is_contract_signature {
            return Bytes::new();
        }

        let mut part = Vec::with_capacity(32 + self.data.len());
        part.extend_from_slice(&U256::from(self.data.len()).to_be_bytes::<32>());
        part.extend_from_slice(&self.data);
        Bytes::from(part)
    }
}
