use color_eyre::eyre::Result;

use super::{build_calls, client, connect, transaction_options};
use crate::cli::HashArgs;
use crate::output::HashOutput;

pub async fn run(args: HashArgs, json: bool) -> Result<()> {
    let calls = build_calls(&args.tx)?;
    let safe = connect(&args.safe, client(&args.safe.rpc_url, None)?).await?;

    let tx = safe
        .create_transaction(&calls, transaction_options(&args.tx)?)
        .await?;
    let typed_data = safe.typed_data(&tx.data);

    let output = HashOutput {
        safe_tx_hash: typed_data.hash,
        nonce: tx.data.nonce,
        typed_data: typed_data.payload,
    };

    output.print(json)
}
