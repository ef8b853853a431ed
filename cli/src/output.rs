use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use color_eyre::eyre::Result;
use safe_kit::{Call, SafeVersion};
use serde::Serialize;
use serde_json::Value;

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeInfoOutput {
    pub address: Address,
    pub version: SafeVersion,
    pub chain_id: u64,
    pub nonce: U256,
    pub threshold: u64,
    pub owners: Vec<Address>,
    pub modules: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<Address>,
}

impl SafeInfoOutput {
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            return print_json(self);
        }
        println!("Safe: {}", self.address);
        println!("Version: {}", self.version);
        println!("Chain ID: {}", self.chain_id);
        println!("Nonce: {}", self.nonce);
        println!("Threshold: {}", self.threshold);
        println!("Owners:");
        for (i, owner) in self.owners.iter().enumerate() {
            println!("  {}: {}", i + 1, owner);
        }
        if !self.modules.is_empty() {
            println!("Modules:");
            for module in &self.modules {
                println!("  {}", module);
            }
        }
        if let Some(guard) = self.guard.filter(|guard| !guard.is_zero()) {
            println!("Guard: {}", guard);
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashOutput {
    pub safe_tx_hash: B256,
    pub nonce: U256,
    pub typed_data: Value,
}

impl HashOutput {
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            return print_json(self);
        }
        println!("Safe Tx Hash: {}", self.safe_tx_hash);
        println!("Nonce: {}", self.nonce);
        println!("Typed Data:");
        println!("{}", serde_json::to_string_pretty(&self.typed_data)?);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureOutput {
    pub signer: Address,
    pub signature: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_tx_hash: Option<B256>,
}

impl SignatureOutput {
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            return print_json(self);
        }
        if let Some(hash) = self.safe_tx_hash {
            println!("Safe Tx Hash: {}", hash);
        }
        println!("Signer: {}", self.signer);
        println!("Signature: {}", self.signature);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutput {
    pub tx_hash: TxHash,
    pub success: bool,
}

impl ExecutionOutput {
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            return print_json(self);
        }
        println!("Transaction Mined:");
        println!("  Tx Hash: {}", self.tx_hash);
        println!("  Success: {}", self.success);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutput {
    pub safe_address: Address,
    pub version: SafeVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,
    pub owners: Vec<Address>,
    pub threshold: u64,
    pub already_deployed: bool,
}

impl CreateOutput {
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            return print_json(self);
        }
        println!("Safe Address: {}", self.safe_address);
        println!("  Version: {}", self.version);
        if self.already_deployed {
            println!("  Status: Already deployed");
        } else if let Some(tx_hash) = self.tx_hash {
            println!("  Tx Hash: {}", tx_hash);
        }
        println!("  Threshold: {}", self.threshold);
        println!("  Owners:");
        for (i, owner) in self.owners.iter().enumerate() {
            println!("    {}: {}", i + 1, owner);
        }
        Ok(())
    }
}

pub fn print_calls_summary(calls: &[Call]) {
    println!("Calls ({}):", calls.len());
    for (i, call) in calls.iter().enumerate() {
        println!("  {}. To: {} ({:?})", i + 1, call.to, call.operation);
        if !call.value.is_zero() {
            println!("     Value: {} wei", call.value);
        }
        println!("     Data: {} bytes", call.data.len());
    }
}

pub fn confirm_prompt(message: &str) -> bool {
    use dialoguer::Confirm;

    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}
