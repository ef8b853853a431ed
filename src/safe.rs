//! High-level client for one Safe account

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chain::ChainConfig;
use crate::client::{ChainClient, TransactionOptions, TransactionResult};
use crate::contracts::{
    MultiSendCallOnlyContract, MultiSendContract, SafeContract, SafeFeature, SafeProxyFactoryContract,
    SafeVersion,
};
use crate::create2::{encode_setup_call, predict_safe_address, SafeAccountConfig};
use crate::encoding::{compute_safe_transaction_hash, SafeTypedData};
use crate::error::{Error, Result};
use crate::signing::{
    generate_eip712_signature, generate_pre_validated_signature, generate_signature, SigningMethod,
};
use crate::types::{Operation, SafeCall, SafeSignature, SafeTransaction, SafeTransactionData};

/// Safe-level parameters of a transaction being created
///
/// Gas and refund fields default to zero; the nonce defaults to the current
/// Safe nonce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTransactionOptions {
    #[serde(default)]
    pub safe_tx_gas: Option<U256>,
    #[serde(default)]
    pub base_gas: Option<U256>,
    #[serde(default)]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub gas_token: Option<Address>,
    #[serde(default)]
    pub refund_receiver: Option<Address>,
    #[serde(default)]
    pub nonce: Option<U256>,
    /// Batch through MultiSendCallOnly instead of MultiSend
    #[serde(default)]
    pub call_only: bool,
}

/// Client for a deployed Safe
///
/// Wraps the Safe contract bound for one release and adds the workflows
/// around it: building transactions, collecting owner signatures and
/// executing once the threshold is met.
#[derive(Debug, Clone)]
pub struct Safe<C> {
    contract: SafeContract<C>,
    config: ChainConfig,
}

impl<C> Safe<C>
where
    C: ChainClient + Clone,
{
    /// Creates a client for the Safe at `address`, trusting `config`
    pub fn new(client: C, address: Address, config: ChainConfig) -> Result<Self> {
        let contract = SafeContract::at(client, address, config.version, config.chain_id)?;
        Ok(Self { contract, config })
    }

    /// Creates a client after reading the chain id and contract version from the chain
    pub async fn connect(client: C, address: Address) -> Result<Self> {
        let chain_id = client.chain_id().await?;

        let code = client.get_code(address).await?;
        if code.is_empty() {
            return Err(Error::Fetch {
                what: "Safe code",
                reason: format!("no contract deployed at {address}"),
            });
        }

        // VERSION() exists in every release
        let probe = SafeContract::at(client.clone(), address, SafeVersion::default(), chain_id)?;
        let version: SafeVersion = probe.contract_version().await?.parse()?;
        info!(%address, chain_id, %version, "connected to Safe");

        Self::new(client, address, ChainConfig::with_version(chain_id, version))
    }

    /// Deploys a new Safe for `account` and returns a client for it
    pub async fn deploy(
        client: C,
        config: ChainConfig,
        account: &SafeAccountConfig,
        salt_nonce: U256,
        options: TransactionOptions,
    ) -> Result<(Self, TransactionResult)> {
        let address = predict_safe_address(client.clone(), &config, account, salt_nonce).await?;
        let initializer = encode_setup_call(&config, account)?;

        let factory = SafeProxyFactoryContract::new(client.clone(), &config)?;
        let result = factory
            .create_proxy_with_nonce(config.singleton(), initializer, salt_nonce, options)
            .await?;
        info!(%address, tx = %result.hash, "deploying Safe");

        Ok((Self::new(client, address, config)?, result))
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn version(&self) -> SafeVersion {
        self.config.version
    }

    pub fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The underlying Safe contract wrapper
    pub fn contract(&self) -> &SafeContract<C> {
        &self.contract
    }

    pub fn client(&self) -> &C {
        self.contract.client()
    }

    pub async fn nonce(&self) -> Result<U256> {
        self.contract.nonce().await
    }

    pub async fn threshold(&self) -> Result<u64> {
        self.contract.get_threshold().await
    }

    pub async fn owners(&self) -> Result<Vec<Address>> {
        self.contract.get_owners().await
    }

    pub async fn is_owner(&self, address: Address) -> Result<bool> {
        self.contract.is_owner(address).await
    }

    pub async fn modules(&self) -> Result<Vec<Address>> {
        self.contract.get_modules().await
    }

    pub async fn is_module_enabled(&self, module: Address) -> Result<bool> {
        self.contract.is_module_enabled(module).await
    }

    /// Transaction guard, zero when none is set
    pub async fn guard(&self) -> Result<Address> {
        self.contract.get_guard().await
    }

    /// Builds a Safe transaction executing `calls`
    ///
    /// A single call is executed directly. Several calls are batched through
    /// MultiSend (or MultiSendCallOnly), delegate-called by the Safe.
    pub async fn create_transaction(
        &self,
        calls: &[impl SafeCall],
        options: SafeTransactionOptions,
    ) -> Result<SafeTransaction> {
        let mut data = match calls {
            [] => return Err(Error::NoCalls),
            [call] => SafeTransactionData::new(call.to(), call.value(), call.data(), call.operation()),
            _ => self.batch(calls, options.call_only)?,
        };

        data.safe_tx_gas = match options.safe_tx_gas {
            Some(gas) => gas,
            None if self.version().has_feature(SafeFeature::SafeTxGasOptional) => U256::ZERO,
            None => self.estimate_safe_tx_gas(&data).await?,
        };
        data.base_gas = options.base_gas.unwrap_or_default();
        data.gas_price = options.gas_price.unwrap_or_default();
        data.gas_token = options.gas_token.unwrap_or_default();
        data.refund_receiver = options.refund_receiver.unwrap_or_default();
        data.nonce = match options.nonce {
            Some(nonce) => nonce,
            None => self.nonce().await?,
        };

        Ok(SafeTransaction::new(data))
    }

    /// `safeTxGas` for releases that do not accept zero, measured by the Safe
    /// itself so batches run as the delegate call they will be
    async fn estimate_safe_tx_gas(&self, data: &SafeTransactionData) -> Result<U256> {
        let estimated = self.contract.required_tx_gas(data).await?;
        debug!(estimated, "estimated safeTxGas");

        // 10% buffer
        Ok(U256::from(estimated.saturating_add(estimated / 10)))
    }

    fn batch(&self, calls: &[impl SafeCall], call_only: bool) -> Result<SafeTransactionData> {
        let client = self.client().clone();
        let (to, calldata) = if call_only {
            let multi_send = MultiSendCallOnlyContract::new(client, &self.config)?;
            (multi_send.address(), multi_send.encode_multi_send(calls)?)
        } else {
            let multi_send = MultiSendContract::new(client, &self.config)?;
            (multi_send.address(), multi_send.encode_multi_send(calls))
        };
        debug!(%to, calls = calls.len(), call_only, "batching calls");

        // per-call values are part of the packed batch
        Ok(SafeTransactionData::new(to, U256::ZERO, calldata, Operation::DelegateCall))
    }

    /// Hash the owners sign for `data`
    pub fn transaction_hash(&self, data: &SafeTransactionData) -> B256 {
        compute_safe_transaction_hash(self.version(), self.chain_id(), self.address(), data)
    }

    /// EIP-712 typed data the owners sign for `data`
    pub fn typed_data(&self, data: &SafeTransactionData) -> SafeTypedData {
        SafeTypedData::new(self.version(), self.chain_id(), self.address(), data)
    }

    /// Signs `hash` with the client's account through `eth_sign`
    pub async fn sign_hash(&self, hash: B256) -> Result<SafeSignature> {
        if !self.version().has_feature(SafeFeature::EthSign) {
            return Err(Error::UnsupportedFunction {
                function: "eth_sign",
                version: self.version(),
            });
        }
        generate_signature(self.client(), hash).await
    }

    /// Adds the client account's signature to `tx`
    ///
    /// The account must be an owner of the Safe.
    pub async fn sign_transaction(
        &self,
        mut tx: SafeTransaction,
        method: SigningMethod,
    ) -> Result<SafeTransaction> {
        let signer = self.client().signer_address().await?;
        self.ensure_owner(signer).await?;

        let signature = match method {
            SigningMethod::EthSign => self.sign_hash(self.transaction_hash(&tx.data)).await?,
            _ => generate_eip712_signature(self.client(), &self.typed_data(&tx.data), method).await?,
        };
        debug!(%signer, %method, "signed Safe transaction");

        tx.add_signature(signature);
        Ok(tx)
    }

    /// Approves `hash` on-chain from the client's account
    pub async fn approve_transaction_hash(
        &self,
        hash: B256,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        let signer = self.client().signer_address().await?;
        self.ensure_owner(signer).await?;
        self.contract
            .approve_hash(hash, options.with_from(signer))
            .await
    }

    /// Owners that approved `hash` on-chain
    pub async fn owners_who_approved(&self, hash: B256) -> Result<Vec<Address>> {
        let mut approvers = Vec::new();
        for owner in self.owners().await? {
            if !self.contract.approved_hashes(owner, hash).await?.is_zero() {
                approvers.push(owner);
            }
        }
        Ok(approvers)
    }

    /// Executes `tx` once enough owners have signed or approved it
    ///
    /// On-chain approvals and the executing owner count as pre-validated
    /// signatures. Fails with [`Error::InsufficientSignatures`] before sending
    /// anything when the threshold is not met.
    pub async fn execute_transaction(
        &self,
        tx: &SafeTransaction,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        let (tx, options) = self.prepare_execution(tx, options).await?;

        let threshold = self.threshold().await?;
        let provided = tx.signature_count() as u64;
        if provided < threshold {
            return Err(Error::InsufficientSignatures {
                threshold,
                provided,
            });
        }

        self.contract.exec_transaction(&tx, options).await
    }

    /// Whether `tx` would execute successfully right now
    pub async fn is_valid_transaction(&self, tx: &SafeTransaction, options: TransactionOptions) -> bool {
        match self.prepare_execution(tx, options).await {
            Ok((tx, options)) => self.contract.is_valid_transaction(&tx, options).await,
            Err(_) => false,
        }
    }

    async fn prepare_execution(
        &self,
        tx: &SafeTransaction,
        mut options: TransactionOptions,
    ) -> Result<(SafeTransaction, TransactionOptions)> {
        let mut tx = tx.clone();
        let hash = self.transaction_hash(&tx.data);

        for owner in self.owners_who_approved(hash).await? {
            if !tx.has_signature(&owner) {
                tx.add_signature(generate_pre_validated_signature(owner));
            }
        }

        let executor = match options.from {
            Some(from) => from,
            None => self.client().signer_address().await?,
        };
        if !tx.has_signature(&executor) && self.is_owner(executor).await? {
            tx.add_signature(generate_pre_validated_signature(executor));
        }

        options.from = Some(executor);
        Ok((tx, options))
    }

    async fn ensure_owner(&self, signer: Address) -> Result<()> {
        if self.is_owner(signer).await? {
            Ok(())
        } else {
            Err(Error::NotOwner {
                signer,
                safe: self.address(),
            })
        }
    }
}
