//! Signatures requested from a chain client's account

use std::fmt;
use std::str::FromStr;

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{adjust_v_in_signature, SignedWith};
use crate::client::ChainClient;
use crate::encoding::SafeTypedData;
use crate::error::{Error, Result};
use crate::types::SafeSignature;

/// Wallet method used to sign a Safe transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SigningMethod {
    /// `personal_sign` over the transaction hash
    #[serde(rename = "eth_sign")]
    EthSign,
    #[serde(rename = "eth_signTypedData")]
    EthSignTypedData,
    #[serde(rename = "eth_signTypedData_v3")]
    EthSignTypedDataV3,
    #[default]
    #[serde(rename = "eth_signTypedData_v4")]
    EthSignTypedDataV4,
}

impl SigningMethod {
    /// JSON-RPC method name
    pub fn rpc_method(&self) -> &'static str {
        match self {
            SigningMethod::EthSign => "eth_sign",
            SigningMethod::EthSignTypedData => "eth_signTypedData",
            SigningMethod::EthSignTypedDataV3 => "eth_signTypedData_v3",
            SigningMethod::EthSignTypedDataV4 => "eth_signTypedData_v4",
        }
    }

    /// Returns true for the `eth_signTypedData` family
    pub fn is_typed_data(&self) -> bool {
        !matches!(self, SigningMethod::EthSign)
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rpc_method())
    }
}

impl FromStr for SigningMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eth_sign" | "personal_sign" => Ok(SigningMethod::EthSign),
            "eth_signTypedData" | "typed" => Ok(SigningMethod::EthSignTypedData),
            "eth_signTypedData_v3" | "v3" => Ok(SigningMethod::EthSignTypedDataV3),
            "eth_signTypedData_v4" | "v4" => Ok(SigningMethod::EthSignTypedDataV4),
            other => Err(Error::Signing(format!("unknown signing method: {other}"))),
        }
    }
}

/// Signs `hash` with the client's account through `eth_sign`
///
/// The wallet applies the EIP-191 prefix (or not); the returned signature has
/// its `v` adjusted so the contract verifies it either way.
pub async fn generate_signature<C: ChainClient>(client: &C, hash: B256) -> Result<SafeSignature> {
    let signer = client.signer_address().await?;
    let raw = client.sign_message(hash).await?;
    debug!(%signer, %hash, "signed transaction hash");

    let data = adjust_v_in_signature(&raw, SignedWith::EthSign { hash, signer })?;
    Ok(SafeSignature::new(signer, data))
}

/// Signs Safe typed data with the client's account
pub async fn generate_eip712_signature<C: ChainClient>(
    client: &C,
    typed_data: &SafeTypedData,
    method: SigningMethod,
) -> Result<SafeSignature> {
    if !method.is_typed_data() {
        return Err(Error::Signing(format!("{method} is not a typed data method")));
    }

    let signer = client.signer_address().await?;
    let raw = client.sign_typed_data(typed_data, method).await?;
    debug!(%signer, hash = %typed_data.hash, %method, "signed typed data");

    let data = adjust_v_in_signature(&raw, SignedWith::TypedData)?;
    Ok(SafeSignature::new(signer, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_method_names() {
        for method in [
            SigningMethod::EthSign,
            SigningMethod::EthSignTypedData,
            SigningMethod::EthSignTypedDataV3,
            SigningMethod::EthSignTypedDataV4,
        ] {
            assert_eq!(method.rpc_method().parse::<SigningMethod>().unwrap(), method);
            assert_eq!(
                serde_json::to_value(method).unwrap(),
                serde_json::Value::String(method.to_string())
            );
        }
        assert_eq!("v4".parse::<SigningMethod>().unwrap(), SigningMethod::default());
        assert!("eth_signTransaction".parse::<SigningMethod>().is_err());
    }
}
