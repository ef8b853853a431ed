//! Error types for safe-kit

use alloy::primitives::{Address, Bytes};
use thiserror::Error;

use crate::contracts::SafeVersion;

/// Result type alias for safe-kit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with Safe smart accounts
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to talk to the chain client
    #[error("Provider error: {0}")]
    Provider(String),

    /// The node reported a revert, with its return data
    #[error("Execution reverted: {0}")]
    Reverted(Bytes),

    /// Failed to fetch data from the blockchain
    #[error("Failed to fetch {what}: {reason}")]
    Fetch { what: &'static str, reason: String },

    /// The string is not a known Safe version
    #[error("Unsupported Safe version: {0}")]
    UnsupportedVersion(String),

    /// The contract function does not exist in the bound contract version
    #[error("{function} is not available in Safe v{version}")]
    UnsupportedFunction {
        function: &'static str,
        version: SafeVersion,
    },

    /// No deployment is known for this contract and version, and no custom address was given
    #[error("{contract} is not deployed for Safe v{version} on chain {chain_id}")]
    ContractNotDeployed {
        contract: &'static str,
        version: SafeVersion,
        chain_id: u64,
    },

    /// Signature bytes or recovery byte are malformed
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// The client has no account to sign or send with
    #[error("No signer available on the chain client")]
    NoSigner,

    /// The signer is not an owner of the Safe
    #[error("Signer {signer} is not an owner of Safe {safe}")]
    NotOwner { signer: Address, safe: Address },

    /// The same owner signed twice or owners are out of order in a bundle
    #[error("Duplicate or unordered signer {0} in signature bundle")]
    DuplicateSigner(Address),

    /// Threshold is zero or larger than the owner count
    #[error("Invalid threshold {threshold} for {owners} owners")]
    InvalidThreshold { threshold: u64, owners: usize },

    /// Not enough signatures to meet the Safe threshold
    #[error("Insufficient signatures: threshold is {threshold}, got {provided}")]
    InsufficientSignatures { threshold: u64, provided: u64 },

    /// MultiSendCallOnly cannot batch delegate calls
    #[error("MultiSendCallOnly does not support DelegateCall (call {index})")]
    DelegateCallNotAllowed { index: usize },

    /// No calls passed to transaction creation
    #[error("No calls given to create a transaction")]
    NoCalls,

    /// Signature generation failed
    #[error("Failed to sign: {0}")]
    Signing(String),

    /// Gas estimation failed
    #[error("Gas estimation failed: {0}")]
    GasEstimation(String),

    /// Transaction execution failed
    #[error("Execution failed: {reason}")]
    ExecutionFailed { reason: String },

    /// ABI encoding/decoding error
    #[error("ABI error: {0}")]
    Abi(String),

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<alloy::transports::RpcError<alloy::transports::TransportErrorKind>> for Error {
    fn from(err: alloy::transports::RpcError<alloy::transports::TransportErrorKind>) -> Self {
        match err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
            Some(data) => Error::Reverted(data),
            None => Error::Provider(err.to_string()),
        }
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(err: alloy::signers::Error) -> Self {
        Error::Signing(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for Error {
    fn from(err: alloy::sol_types::Error) -> Self {
        Error::Abi(err.to_string())
    }
}

impl From<alloy::primitives::SignatureError> for Error {
    fn from(err: alloy::primitives::SignatureError) -> Self {
        Error::InvalidSignature(err.to_string())
    }
}
