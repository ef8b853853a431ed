use color_eyre::eyre::Result;
use safe_kit::{SafeFeature, SafeVersion};

use super::{client, connect};
use crate::cli::InfoArgs;
use crate::output::SafeInfoOutput;

pub async fn run(args: InfoArgs, json: bool) -> Result<()> {
    let safe = connect(&args.safe, client(&args.safe.rpc_url, None)?).await?;

    // v1.0.0 has no module queries
    let modules = if safe.version() >= SafeVersion::V1_1_1 {
        safe.modules().await?
    } else {
        Vec::new()
    };
    let guard = if safe.version().has_feature(SafeFeature::SafeTxGuards) {
        Some(safe.guard().await?)
    } else {
        None
    };

    let output = SafeInfoOutput {
        address: safe.address(),
        version: safe.version(),
        chain_id: safe.chain_id(),
        nonce: safe.nonce().await?,
        threshold: safe.threshold().await?,
        owners: safe.owners().await?,
        modules,
        guard,
    };

    output.print(json)
}
