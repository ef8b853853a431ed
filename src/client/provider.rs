//! [`ChainClient`] over an alloy provider and a local key

use alloy::network::primitives::ReceiptResponse;
use alloy::network::{AnyNetwork, EthereumWallet, Network, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use tracing::debug;
use url::Url;

use super::{CallRequest, ChainClient};
use crate::encoding::SafeTypedData;
use crate::error::{Error, Result};
use crate::signing::SigningMethod;

type AnyTransactionRequest = <AnyNetwork as Network>::TransactionRequest;

/// Chain client backed by an alloy [`Provider`]
///
/// Outgoing transactions are signed by the provider itself, so it should be
/// built with a wallet for the same key (see [`ProviderClient::http`]) or point
/// at a node that manages the sending account. The optional local signer
/// produces message and typed-data signatures.
#[derive(Debug, Clone)]
pub struct ProviderClient<P> {
    provider: P,
    signer: Option<PrivateKeySigner>,
}

impl ProviderClient<DynProvider<AnyNetwork>> {
    /// Connects over HTTP with `signer` as both the sending and signing account
    pub fn http(url: Url, signer: PrivateKeySigner) -> Self {
        let provider = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(url)
            .erased();
        Self::new(provider).with_signer(signer)
    }

    /// Connects over HTTP without a signer, for read-only use
    pub fn read_only(url: Url) -> Self {
        let provider = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .connect_http(url)
            .erased();
        Self::new(provider)
    }
}

impl<P> ProviderClient<P>
where
    P: Provider<AnyNetwork> + Clone,
{
    /// Wraps a provider with no local signer
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            signer: None,
        }
    }

    /// Sets the local signer
    pub fn with_signer(mut self, signer: PrivateKeySigner) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Returns the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn signer(&self) -> Result<&PrivateKeySigner> {
        self.signer.as_ref().ok_or(Error::NoSigner)
    }

    fn transaction_request(&self, request: &CallRequest) -> AnyTransactionRequest {
        let options = &request.options;
        let mut tx = AnyTransactionRequest::default()
            .with_to(request.to)
            .with_input(request.data.clone());

        if let Some(from) = options.from.or(self.signer.as_ref().map(|s| s.address())) {
            tx.set_from(from);
        }
        if let Some(value) = options.value {
            tx.set_value(value);
        }
        if let Some(gas_limit) = options.gas_limit {
            tx.set_gas_limit(gas_limit);
        }
        if let Some(gas_price) = options.gas_price {
            tx.set_gas_price(gas_price);
        }
        if let Some(max_fee) = options.max_fee_per_gas {
            tx.set_max_fee_per_gas(max_fee);
        }
        if let Some(priority_fee) = options.max_priority_fee_per_gas {
            tx.set_max_priority_fee_per_gas(priority_fee);
        }
        if let Some(nonce) = options.nonce {
            tx.set_nonce(nonce);
        }

        tx
    }
}

impl<P> ChainClient for ProviderClient<P>
where
    P: Provider<AnyNetwork> + Clone + Send + Sync,
{
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn signer_address(&self) -> Result<Address> {
        Ok(self.signer()?.address())
    }

    async fn call(&self, request: &CallRequest) -> Result<Bytes> {
        let tx = self.transaction_request(request);
        Ok(self.provider.call(tx).await?)
    }

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64> {
        let tx = self.transaction_request(request);
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(|e| Error::GasEstimation(e.to_string()))
    }

    async fn send_transaction(&self, request: CallRequest) -> Result<B256> {
        let tx = self.transaction_request(&request);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| Error::ExecutionFailed {
                reason: e.to_string(),
            })?;
        let hash = *pending.tx_hash();
        debug!(%hash, to = %request.to, "sent transaction");
        Ok(hash)
    }

    async fn sign_message(&self, hash: B256) -> Result<Bytes> {
        let signature = self.signer()?.sign_message(hash.as_slice()).await?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    async fn sign_typed_data(
        &self,
        typed_data: &SafeTypedData,
        method: SigningMethod,
    ) -> Result<Bytes> {
        // every typed-data flavour hashes a SafeTx document the same way
        debug!(%method, hash = %typed_data.hash, "signing typed data locally");
        let signature = self.signer()?.sign_hash(&typed_data.hash).await?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| Error::Fetch {
                what: "code",
                reason: e.to_string(),
            })
    }

    async fn transaction_status(&self, hash: B256) -> Result<Option<bool>> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| Error::Fetch {
                what: "receipt",
                reason: e.to_string(),
            })?;
        Ok(receipt.map(|r| r.status()))
    }

    async fn wait_for_transaction(&self, hash: B256) -> Result<bool> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .get_receipt()
            .await
            .map_err(|e| Error::Fetch {
                what: "receipt",
                reason: e.to_string(),
            })?;
        debug!(%hash, status = receipt.status(), "transaction mined");
        Ok(receipt.status())
    }
}
