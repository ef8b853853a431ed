use alloy::primitives::{Address, B256};
use color_eyre::eyre::{eyre, Result};
use safe_kit::{recover_signer, SafeSignature, SafeTransaction, TransactionOptions};
use tracing::debug;

use super::{await_execution, build_calls, client, connect, transaction_options};
use crate::bundle::parse_hex_data;
use crate::cli::SendArgs;
use crate::output::{confirm_prompt, print_calls_summary};
use crate::wallet::create_signer;

pub async fn run(args: SendArgs, json: bool) -> Result<()> {
    let calls = build_calls(&args.tx)?;
    let signer = create_signer(&args.wallet)?;
    let signer_address = signer.address();
    let safe = connect(&args.safe, client(&args.safe.rpc_url, Some(signer))?).await?;

    let mut tx = safe
        .create_transaction(&calls, transaction_options(&args.tx)?)
        .await?;
    let safe_tx_hash = safe.transaction_hash(&tx.data);

    add_owner_signatures(&mut tx, safe_tx_hash, &args.signatures)?;

    if !json {
        println!("Safe: {} (v{})", safe.address(), safe.version());
        println!("Executor: {}", signer_address);
        println!("Nonce: {}", tx.data.nonce);
        println!("Safe Tx Hash: {}", safe_tx_hash);
        println!("Signatures: {}", tx.signature_count());
        println!();
        print_calls_summary(&calls);
        println!();
    }

    let options = TransactionOptions::default().with_from(signer_address);
    let valid = safe.is_valid_transaction(&tx, options.clone()).await;

    if args.check_only {
        if json {
            println!("{}", serde_json::json!({ "safeTxHash": safe_tx_hash, "valid": valid }));
        } else {
            println!("Valid: {}", valid);
        }
        return Ok(());
    }

    if !valid {
        return Err(eyre!(
            "Transaction would fail; check signatures and threshold with --check-only"
        ));
    }

    if !args.no_confirm && !json && !confirm_prompt("Execute transaction?") {
        println!("Aborted");
        return Ok(());
    }

    let result = safe.execute_transaction(&tx, options).await?;
    await_execution(safe.client(), result.hash, json).await?.print(json)
}

/// Adds "0xOwner:0xSignature" entries, checking ECDSA signatures against the hash
fn add_owner_signatures(tx: &mut SafeTransaction, hash: B256, specs: &[String]) -> Result<()> {
    for spec in specs {
        let (owner, signature) = spec
            .split_once(':')
            .ok_or_else(|| eyre!("Invalid signature format '{}'. Expected '0xOwner:0xSignature'", spec))?;
        let owner: Address = owner
            .trim()
            .parse()
            .map_err(|e| eyre!("Invalid owner address '{}': {}", owner, e))?;
        let signature = parse_hex_data(signature)?;

        // v 0 and 1 are contract and pre-validated signatures, nothing to recover
        if signature.len() == 65 && signature[64] >= 27 {
            let recovered = recover_signer(hash, &signature)?;
            if recovered != owner {
                return Err(eyre!(
                    "Signature for {} recovers to {}",
                    owner,
                    recovered
                ));
            }
        }
        debug!(%owner, "adding owner signature");

        tx.add_signature(SafeSignature::try_new(owner, signature)?);
    }
    Ok(())
}
