use alloy::primitives::{Address, Bytes, U256};
use color_eyre::eyre::{eyre, Result};
use safe_kit::{Call, Operation};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A transaction in a Safe Transaction Builder export
#[derive(Debug, Deserialize)]
pub struct BundleTransaction {
    pub to: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub operation: u8,
}

/// The Transaction Builder wraps its list in `{ "transactions": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BundleFile {
    Batch { transactions: Vec<BundleTransaction> },
    List(Vec<BundleTransaction>),
}

/// Loads a bundle file into calls
pub fn load_bundle(path: &str) -> Result<Vec<Call>> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(eyre!("Bundle file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)?;
    parse_bundle(&content)
}

/// Parses bundle JSON content
pub fn parse_bundle(content: &str) -> Result<Vec<Call>> {
    let file: BundleFile =
        serde_json::from_str(content).map_err(|e| eyre!("Invalid bundle JSON: {}", e))?;

    let transactions = match file {
        BundleFile::Batch { transactions } | BundleFile::List(transactions) => transactions,
    };

    transactions.into_iter().map(convert_transaction).collect()
}

fn convert_transaction(tx: BundleTransaction) -> Result<Call> {
    let to: Address = tx
        .to
        .parse()
        .map_err(|e| eyre!("Invalid address '{}': {}", tx.to, e))?;

    let value = if tx.value.is_empty() {
        U256::ZERO
    } else {
        parse_value(&tx.value)?
    };

    let data = match tx.data.as_deref().map(str::trim) {
        None | Some("") | Some("0x") => Bytes::new(),
        Some(data) => parse_hex_data(data)?,
    };

    let operation = Operation::from_u8(tx.operation)
        .ok_or_else(|| eyre!("Invalid operation: {}", tx.operation))?;

    Ok(Call::new(to, value, data).with_operation(operation))
}

/// Parses a decimal or 0x-prefixed hex amount
pub fn parse_value(s: &str) -> Result<U256> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| eyre!("Invalid hex value: {}", e)),
        None => s.parse::<U256>().map_err(|e| eyre!("Invalid value: {}", e)),
    }
}

/// Parses hex bytes with or without the 0x prefix
pub fn parse_hex_data(s: &str) -> Result<Bytes> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| eyre!("Invalid hex data: {}", e))?;
    Ok(Bytes::from(bytes))
}
