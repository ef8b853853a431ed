//! Signature generation, normalization and verification for Safe transactions
//!
//! Wallets return signatures in slightly different shapes depending on how
//! they were asked to sign. Everything here turns them into the 65-byte
//! `r || s || v` form `execTransaction` accepts, and checks bundles the way
//! the Safe contract does before they are sent.

mod adjust;
mod bundle;
mod ecdsa;
mod generate;
mod verify;

pub use adjust::{
    adjust_v_in_signature, generate_pre_validated_signature, is_tx_hash_signed_with_prefix,
    SignedWith,
};
pub use bundle::build_signature_bytes;
pub use ecdsa::{eth_sign_hash, sign_hash, validate_signature};
pub use generate::{generate_eip712_signature, generate_signature, SigningMethod};
pub use verify::{check_signature_bundle, recover_signer};
