use alloy::primitives::Address;
use color_eyre::eyre::{eyre, Result};
use safe_kit::{predict_safe_address, ChainClient, ChainConfig, Safe, SafeAccountConfig, TransactionOptions};

use super::client;
use crate::bundle::parse_value;
use crate::cli::CreateArgs;
use crate::output::{confirm_prompt, CreateOutput};
use crate::wallet::create_signer;

pub async fn run(args: CreateArgs, json: bool) -> Result<()> {
    let signer = create_signer(&args.wallet)?;
    let signer_address = signer.address();
    let client = client(&args.rpc_url, Some(signer))?;

    let owners = collect_owners(signer_address, &args.owners)?;
    let mut account = SafeAccountConfig::new(owners, args.threshold);
    if let Some(handler) = &args.fallback_handler {
        let handler: Address = handler
            .parse()
            .map_err(|e| eyre!("Invalid fallback handler '{}': {}", handler, e))?;
        account = account.with_fallback_handler(handler);
    }

    let chain_id = client.chain_id().await?;
    let mut config = ChainConfig::with_version(chain_id, args.safe_version);
    if args.l2 {
        config = config.l2();
    }

    let salt_nonce = parse_value(&args.salt_nonce)?;
    let safe_address = predict_safe_address(client.clone(), &config, &account, salt_nonce).await?;
    let already_deployed = !client.get_code(safe_address).await?.is_empty();

    let mut output = CreateOutput {
        safe_address,
        version: config.version,
        tx_hash: None,
        owners: account.owners.clone(),
        threshold: account.threshold,
        already_deployed,
    };

    if already_deployed || args.compute_only {
        return output.print(json);
    }

    if !args.no_confirm && !json {
        println!("Deploying Safe v{} at {}", config.version, safe_address);
        if !confirm_prompt("Deploy Safe?") {
            println!("Aborted");
            return Ok(());
        }
    }

    let (safe, result) = Safe::deploy(
        client,
        config,
        &account,
        salt_nonce,
        TransactionOptions::default(),
    )
    .await?;

    if !json {
        eprintln!("Waiting for {} to be mined...", result.hash);
    }
    if !safe.client().wait_for_transaction(result.hash).await? {
        return Err(eyre!("Safe deployment {} reverted", result.hash));
    }

    if safe.address() != safe_address {
        return Err(eyre!(
            "Deployed Safe address {} differs from predicted {}",
            safe.address(),
            safe_address
        ));
    }

    output.tx_hash = Some(result.hash);
    output.print(json)
}

/// The signer first, then additional owners in order, without duplicates
fn collect_owners(signer: Address, extra: &[String]) -> Result<Vec<Address>> {
    let mut owners = vec![signer];
    for owner in extra {
        let owner: Address = owner
            .parse()
            .map_err(|e| eyre!("Invalid owner address '{}': {}", owner, e))?;
        if !owners.contains(&owner) {
            owners.push(owner);
        }
    }
    Ok(owners)
}
