use clap::{Args, Parser, Subcommand};
use safe_kit::{SafeVersion, SigningMethod};

#[derive(Parser)]
#[command(name = "safe-kit")]
#[command(about = "Build, sign and execute Safe transactions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display Safe information (version, nonce, threshold, owners, modules)
    Info(InfoArgs),

    /// Print the hash and EIP-712 typed data of a Safe transaction
    Hash(HashArgs),

    /// Sign a Safe transaction as one of its owners
    Sign(SignArgs),

    /// Approve a Safe transaction hash on-chain
    Approve(SignArgs),

    /// Sign and execute a Safe transaction, adding signatures from other owners
    Send(SendArgs),

    /// Deploy a new Safe deterministically (same address across chains)
    Create(CreateArgs),

    /// Normalize the v byte of a signature for use in a Safe signature bundle
    AdjustV(AdjustVArgs),

    /// Print the pre-validated signature of an owner
    PreValidated(PreValidatedArgs),
}

#[derive(Args, Clone)]
pub struct SafeArgs {
    /// Safe contract address
    #[arg(long, env = "SAFE_ADDRESS")]
    pub safe: String,

    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Safe contract version (read from the contract if not set)
    #[arg(long, env = "SAFE_VERSION")]
    pub safe_version: Option<SafeVersion>,
}

#[derive(Args, Clone)]
pub struct TransactionArgs {
    /// Target address (for single call mode)
    #[arg(value_name = "TO")]
    pub to: Option<String>,

    /// Function signature (e.g., "transfer(address,uint256)")
    #[arg(value_name = "SIG")]
    pub sig: Option<String>,

    /// Function arguments
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// ETH value to send (in wei)
    #[arg(long, default_value = "0")]
    pub value: String,

    /// Call specification for multicall mode (format: "0xAddr:sig(types):arg1,arg2")
    #[arg(long = "call", value_name = "CALL")]
    pub calls: Vec<String>,

    /// Path to Safe Transaction Builder JSON file
    #[arg(long)]
    pub bundle: Option<String>,

    /// Use MultiSendCallOnly (no delegatecall)
    #[arg(long)]
    pub call_only: bool,

    /// Safe nonce (current nonce if not set)
    #[arg(long)]
    pub nonce: Option<String>,

    /// Override Safe transaction gas (zero from v1.3.0, estimated before)
    #[arg(long)]
    pub safe_tx_gas: Option<String>,
}

#[derive(Parser, Clone)]
pub struct InfoArgs {
    #[command(flatten)]
    pub safe: SafeArgs,
}

#[derive(Parser, Clone)]
pub struct HashArgs {
    #[command(flatten)]
    pub safe: SafeArgs,

    #[command(flatten)]
    pub tx: TransactionArgs,
}

#[derive(Parser, Clone)]
pub struct SignArgs {
    #[command(flatten)]
    pub safe: SafeArgs,

    #[command(flatten)]
    pub tx: TransactionArgs,

    /// Signing method: eth_sign, eth_signTypedData, eth_signTypedData_v3 or eth_signTypedData_v4
    #[arg(long, default_value_t = SigningMethod::EthSignTypedDataV4)]
    pub method: SigningMethod,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

#[derive(Parser, Clone)]
pub struct SendArgs {
    #[command(flatten)]
    pub safe: SafeArgs,

    #[command(flatten)]
    pub tx: TransactionArgs,

    /// Signature of another owner (format: "0xOwner:0xSignature", repeatable)
    #[arg(long = "signature", value_name = "SIG")]
    pub signatures: Vec<String>,

    /// Only check that the transaction would execute, don't send it
    #[arg(long)]
    pub check_only: bool,

    /// Skip confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

#[derive(Parser, Clone)]
pub struct CreateArgs {
    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Safe contract version to deploy
    #[arg(long, env = "SAFE_VERSION", default_value_t = SafeVersion::V1_4_1)]
    pub safe_version: SafeVersion,

    /// Salt nonce for CREATE2 (default: 0)
    #[arg(long, default_value = "0")]
    pub salt_nonce: String,

    /// Additional owner address (repeatable, signer is always included)
    #[arg(long = "owner", value_name = "ADDR")]
    pub owners: Vec<String>,

    /// Signature threshold (default: 1)
    #[arg(long, default_value = "1")]
    pub threshold: u64,

    /// Use the singleton emitting L2 events
    #[arg(long)]
    pub l2: bool,

    /// Only compute and display the address, don't deploy
    #[arg(long)]
    pub compute_only: bool,

    /// Custom fallback handler address
    #[arg(long)]
    pub fallback_handler: Option<String>,

    /// Skip confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

#[derive(Parser, Clone)]
pub struct AdjustVArgs {
    /// 65-byte signature as hex
    #[arg(value_name = "SIGNATURE")]
    pub signature: String,

    /// The signature came from eth_sign over this Safe transaction hash
    #[arg(long, requires = "signer")]
    pub hash: Option<String>,

    /// Owner that produced the eth_sign signature
    #[arg(long)]
    pub signer: Option<String>,
}

#[derive(Parser, Clone)]
pub struct PreValidatedArgs {
    /// Owner address
    #[arg(value_name = "OWNER")]
    pub owner: String,
}

#[derive(Args, Clone)]
pub struct WalletArgs {
    /// Raw private key
    #[arg(long, env = "PRIVATE_KEY")]
    pub private_key: Option<String>,

    /// Path to keystore file
    #[arg(long)]
    pub keystore: Option<String>,

    /// Keystore password (prompted if not set)
    #[arg(long, env = "KEYSTORE_PASSWORD")]
    pub password: Option<String>,

    /// Prompt for private key interactively
    #[arg(short, long)]
    pub interactive: bool,
}
