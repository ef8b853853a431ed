use color_eyre::eyre::{eyre, Result};
use safe_kit::{ChainClient, TransactionOptions};

use super::{await_execution, build_calls, client, connect, transaction_options};
use crate::cli::SignArgs;
use crate::output::SignatureOutput;
use crate::wallet::create_signer;

pub async fn run(args: SignArgs, json: bool) -> Result<()> {
    let calls = build_calls(&args.tx)?;
    let signer = create_signer(&args.wallet)?;
    let safe = connect(&args.safe, client(&args.safe.rpc_url, Some(signer))?).await?;

    let tx = safe
        .create_transaction(&calls, transaction_options(&args.tx)?)
        .await?;
    let safe_tx_hash = safe.transaction_hash(&tx.data);

    let signer = safe.client().signer_address().await?;
    let tx = safe.sign_transaction(tx, args.method).await?;
    let signature = tx
        .signature(&signer)
        .ok_or_else(|| eyre!("No signature from {} after signing", signer))?;

    let output = SignatureOutput {
        signer,
        signature: signature.data.clone(),
        safe_tx_hash: Some(safe_tx_hash),
    };

    output.print(json)
}

pub async fn approve(args: SignArgs, json: bool) -> Result<()> {
    let calls = build_calls(&args.tx)?;
    let signer = create_signer(&args.wallet)?;
    let safe = connect(&args.safe, client(&args.safe.rpc_url, Some(signer))?).await?;

    let tx = safe
        .create_transaction(&calls, transaction_options(&args.tx)?)
        .await?;
    let safe_tx_hash = safe.transaction_hash(&tx.data);
    if !json {
        println!("Approving Safe Tx Hash: {}", safe_tx_hash);
    }

    let result = safe
        .approve_transaction_hash(safe_tx_hash, TransactionOptions::default())
        .await?;
    await_execution(safe.client(), result.hash, json).await?.print(json)
}
