pub mod create;
pub mod hash;
pub mod info;
pub mod offline;
pub mod send;
pub mod sign;

use alloy::network::AnyNetwork;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::DynProvider;
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::{eyre, Result};
use safe_kit::{Call, ChainClient, ChainConfig, ProviderClient, Safe, SafeTransactionOptions};
use url::Url;

use crate::bundle::{load_bundle, parse_value};
use crate::cli::{SafeArgs, TransactionArgs};
use crate::output::ExecutionOutput;
use crate::sig_parser::{encode_function_call, parse_call_spec};

pub type Client = ProviderClient<DynProvider<AnyNetwork>>;

pub fn client(rpc_url: &str, signer: Option<PrivateKeySigner>) -> Result<Client> {
    let url: Url = rpc_url
        .parse()
        .map_err(|e| eyre!("Invalid RPC URL '{}': {}", rpc_url, e))?;
    Ok(match signer {
        Some(signer) => ProviderClient::http(url, signer),
        None => ProviderClient::read_only(url),
    })
}

/// Connects to the Safe, trusting `--safe-version` when given
pub async fn connect(args: &SafeArgs, client: Client) -> Result<Safe<Client>> {
    let address: Address = args
        .safe
        .parse()
        .map_err(|e| eyre!("Invalid Safe address '{}': {}", args.safe, e))?;

    let safe = match args.safe_version {
        Some(version) => {
            let chain_id = client.chain_id().await?;
            Safe::new(client, address, ChainConfig::with_version(chain_id, version))?
        }
        None => Safe::connect(client, address).await?,
    };
    Ok(safe)
}

/// Calls from a bundle file, `--call` specs or the positional single call
pub fn build_calls(args: &TransactionArgs) -> Result<Vec<Call>> {
    if let Some(bundle_path) = &args.bundle {
        return load_bundle(bundle_path);
    }

    if !args.calls.is_empty() {
        return args
            .calls
            .iter()
            .map(|spec| {
                let (to, data) = parse_call_spec(spec)?;
                Ok(Call::call(to, data))
            })
            .collect();
    }

    let to = args
        .to
        .as_ref()
        .ok_or_else(|| eyre!("Target address required for single call mode"))?;
    let to: Address = to.parse().map_err(|e| eyre!("Invalid address '{}': {}", to, e))?;
    let value = parse_value(&args.value)?;

    // no signature means a plain ETH transfer
    let data = match &args.sig {
        Some(sig) if !sig.is_empty() => encode_function_call(sig, &args.args)?,
        _ => Bytes::new(),
    };

    Ok(vec![Call::new(to, value, data)])
}

/// Waits for a sent transaction to be mined and reports how it went
pub async fn await_execution<C: ChainClient>(client: &C, hash: B256, json: bool) -> Result<ExecutionOutput> {
    if !json {
        eprintln!("Waiting for {} to be mined...", hash);
    }
    let success = client.wait_for_transaction(hash).await?;
    Ok(ExecutionOutput {
        tx_hash: hash,
        success,
    })
}

pub fn transaction_options(args: &TransactionArgs) -> Result<SafeTransactionOptions> {
    Ok(SafeTransactionOptions {
        safe_tx_gas: args.safe_tx_gas.as_deref().map(parse_value).transpose()?,
        nonce: args.nonce.as_deref().map(parse_value).transpose()?,
        call_only: args.call_only,
        ..Default::default()
    })
}
