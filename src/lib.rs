//! # safe-kit
//!
//! A Rust library for working with Safe smart accounts, v1.0.0 through v1.4.1.
//!
//! ## Features
//!
//! - One generic [`Contract`] wrapper per Safe contract, bound to a release
//!   through [`ChainConfig`]
//! - Transport-agnostic chain access through [`ChainClient`], with an alloy
//!   provider backend and a raw JSON-RPC (EIP-1193) backend
//! - Owner signatures: `eth_sign` and EIP-712 signing, recovery byte
//!   normalization, pre-validated signatures and off-chain bundle checks
//! - Seamless integration with alloy's `sol!` macro ecosystem
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use safe_kit::{contracts::IERC20, Call, ProviderClient, Safe, SigningMethod};
//! use alloy::primitives::U256;
//!
//! let client = ProviderClient::http(rpc_url, signer);
//! let safe = Safe::connect(client, safe_address).await?;
//!
//! let transfer = Call::typed(usdc, &IERC20::transferCall { to: recipient, amount: U256::from(1000) });
//! let tx = safe.create_transaction(&[transfer], Default::default()).await?;
//! let tx = safe.sign_transaction(tx, SigningMethod::EthSignTypedDataV4).await?;
//!
//! if safe.is_valid_transaction(&tx, Default::default()).await {
//!     safe.execute_transaction(&tx, Default::default()).await?;
//! }
//! ```

pub mod chain;
pub mod client;
pub mod contracts;
pub mod create2;
pub mod encoding;
pub mod error;
pub mod safe;
pub mod signing;
pub mod types;

pub use chain::{ChainAddresses, ChainConfig};
pub use client::{
    CallRequest, ChainClient, Eip1193Client, ProviderClient, TransactionOptions, TransactionResult,
};
pub use contracts::{
    Contract, ContractKind, SafeContract, SafeFeature, SafeVersion, IERC20, IMultiSend,
    IMultiSendCallOnly, ISafe, ISafeProxyFactory, ISafeSetup,
};
pub use create2::{compute_create2_address, encode_setup_call, predict_safe_address, SafeAccountConfig};
pub use encoding::{compute_safe_transaction_hash, SafeTypedData};
pub use error::{Error, Result};
pub use safe::{Safe, SafeTransactionOptions};
pub use signing::{
    adjust_v_in_signature, check_signature_bundle, generate_eip712_signature,
    generate_pre_validated_signature, generate_signature, is_tx_hash_signed_with_prefix,
    recover_signer, SignedWith, SigningMethod,
};
pub use types::{Call, Operation, SafeCall, SafeSignature, SafeTransaction, SafeTransactionData, TypedCall};

// Re-export alloy types that are commonly used
pub use alloy::network::AnyNetwork;
pub use alloy::primitives::{Address, Bytes, B256, U256};
