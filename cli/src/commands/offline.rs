//! Signature helpers that need no RPC connection

use alloy::primitives::{Address, B256};
use color_eyre::eyre::{eyre, Result};
use safe_kit::{adjust_v_in_signature, generate_pre_validated_signature, SignedWith};

use crate::bundle::parse_hex_data;
use crate::cli::{AdjustVArgs, PreValidatedArgs};
use crate::output::SignatureOutput;

pub fn adjust_v(args: AdjustVArgs, json: bool) -> Result<()> {
    let signature = parse_hex_data(&args.signature)?;

    let (signed_with, signer) = match (&args.hash, &args.signer) {
        (Some(hash), Some(signer)) => {
            let hash: B256 = hash
                .parse()
                .map_err(|e| eyre!("Invalid hash '{}': {}", hash, e))?;
            let signer: Address = signer
                .parse()
                .map_err(|e| eyre!("Invalid signer '{}': {}", signer, e))?;
            (SignedWith::EthSign { hash, signer }, signer)
        }
        _ => (SignedWith::TypedData, Address::ZERO),
    };

    let adjusted = adjust_v_in_signature(&signature, signed_with)?;

    SignatureOutput {
        signer,
        signature: adjusted,
        safe_tx_hash: None,
    }
    .print(json)
}

pub fn pre_validated(args: PreValidatedArgs, json: bool) -> Result<()> {
    let owner: Address = args
        .owner
        .parse()
        .map_err(|e| eyre!("Invalid owner address '{}': {}", args.owner, e))?;

    let signature = generate_pre_validated_signature(owner);

    SignatureOutput {
        signer: signature.signer,
        signature: signature.data,
        safe_tx_hash: None,
    }
    .print(json)
}
