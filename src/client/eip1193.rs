//! [`ChainClient`] speaking raw Ethereum JSON-RPC to a wallet-backed node

use alloy::network::primitives::ReceiptResponse;
use alloy::network::AnyNetwork;
use alloy::primitives::{Address, Bytes, B256, U128, U256, U64};
use alloy::providers::{PendingTransactionBuilder, RootProvider};
use alloy::rpc::client::RpcClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use super::{CallRequest, ChainClient};
use crate::encoding::SafeTypedData;
use crate::error::{Error, Result};
use crate::signing::SigningMethod;

/// Chain client for EIP-1193 style endpoints
///
/// Every operation is one JSON-RPC request; signing and sending are left to
/// the wallet behind the endpoint (a browser wallet bridge, a signer proxy or
/// a development node with unlocked accounts).
#[derive(Debug, Clone)]
pub struct Eip1193Client {
    client: RpcClient,
    account: Option<Address>,
}

/// Transaction object for `eth_call`, `eth_estimateGas` and `eth_sendTransaction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct RpcTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<Address>,
    to: Address,
    data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<U64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_price: Option<U128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_fee_per_gas: Option<U128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_priority_fee_per_gas: Option<U128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nonce: Option<U64>,
}

impl RpcTransaction {
    fn new(request: &CallRequest, default_from: Option<Address>) -> Self {
        let options = &request.options;
        Self {
            from: options.from.or(default_from),
            to: request.to,
            data: request.data.clone(),
            value: options.value,
            gas: options.gas_limit.map(U64::from),
            gas_price: options.gas_price.map(U128::from),
            max_fee_per_gas: options.max_fee_per_gas.map(U128::from),
            max_priority_fee_per_gas: options.max_priority_fee_per_gas.map(U128::from),
            nonce: options.nonce.map(U64::from),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcReceipt {
    #[serde(default)]
    status: Option<U64>,
}

impl Eip1193Client {
    /// Wraps an existing RPC client
    pub fn new(client: RpcClient) -> Self {
        Self {
            client,
            account: None,
        }
    }

    /// Connects to an HTTP endpoint
    pub fn http(url: Url) -> Self {
        Self::new(RpcClient::new_http(url))
    }

    /// Uses `account` instead of the first entry of `eth_accounts`
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    async fn account(&self) -> Result<Address> {
        if let Some(account) = self.account {
            return Ok(account);
        }
        let accounts: Vec<Address> = self.client.request_noparams("eth_accounts").await?;
        accounts.first().copied().ok_or(Error::NoSigner)
    }

    async fn transaction(&self, request: &CallRequest) -> Result<RpcTransaction> {
        let from = match request.options.from {
            Some(from) => Some(from),
            None => self.account().await.ok(),
        };
        Ok(RpcTransaction::new(request, from))
    }
}

/// Params for the `eth_signTypedData` family
///
/// v3 and v4 take `[account, json]`; the original method takes them the other
/// way round.
fn typed_data_params(method: SigningMethod, account: Address, payload: &Value) -> Result<Value> {
    let document =
        serde_json::to_string(payload).map_err(|e| Error::Encoding(e.to_string()))?;
    match method {
        SigningMethod::EthSignTypedData => Ok(json!([document, account])),
        SigningMethod::EthSignTypedDataV3 | SigningMethod::EthSignTypedDataV4 => {
            Ok(json!([account, document]))
        }
        SigningMethod::EthSign => Err(Error::Signing(format!(
            "{method} is not a typed data method"
        ))),
    }
}

impl ChainClient for Eip1193Client {
    async fn chain_id(&self) -> Result<u64> {
        let id: U64 = self.client.request_noparams("eth_chainId").await?;
        Ok(id.to())
    }

    async fn signer_address(&self) -> Result<Address> {
        self.account().await
    }

    async fn call(&self, request: &CallRequest) -> Result<Bytes> {
        let tx = self.transaction(request).await?;
        Ok(self.client.request("eth_call", (tx, "latest")).await?)
    }

    async fn estimate_gas(&self, request: &CallRequest) -> Result<u64> {
        let tx = self.transaction(request).await?;
        let gas: U64 = self
            .client
            .request("eth_estimateGas", (tx,))
            .await
            .map_err(|e| Error::GasEstimation(e.to_string()))?;
        Ok(gas.to())
    }

    async fn send_transaction(&self, request: CallRequest) -> Result<B256> {
        let tx = self.transaction(&request).await?;
        let hash: B256 = self
            .client
            .request("eth_sendTransaction", (tx,))
            .await
            .map_err(|e| Error::ExecutionFailed {
                reason: e.to_string(),
            })?;
        debug!(%hash, to = %request.to, "sent transaction");
        Ok(hash)
    }

    async fn sign_message(&self, hash: B256) -> Result<Bytes> {
        let account = self.account().await?;
        let signature: Bytes = self
            .client
            .request("personal_sign", (Bytes::copy_from_slice(hash.as_slice()), account))
            .await
            .map_err(|e| Error::Signing(e.to_string()))?;
        Ok(signature)
    }

    async fn sign_typed_data(
        &self,
        typed_data: &SafeTypedData,
        method: SigningMethod,
    ) -> Result<Bytes> {
        let account = self.account().await?;
        let params = typed_data_params(method, account, &typed_data.payload)?;
        let signature: Bytes = self
            .client
            .request(method.rpc_method(), params)
            .await
            .map_err(|e| Error::Signing(e.to_string()))?;
        Ok(signature)
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        self.client
            .request("eth_getCode", (address, "latest"))
            .await
            .map_err(|e| Error::Fetch {
                what: "code",
                reason: e.to_string(),
            })
    }

    async fn transaction_status(&self, hash: B256) -> Result<Option<bool>> {
        let receipt: Option<RpcReceipt> = self
            .client
            .request("eth_getTransactionReceipt", (hash,))
            .await
            .map_err(|e| Error::Fetch {
                what: "receipt",
                reason: e.to_string(),
            })?;
        // pre-Byzantium receipts carry no status
        Ok(receipt.map(|r| r.status.is_none_or(|status| status == U64::from(1))))
    }

    async fn wait_for_transaction(&self, hash: B256) -> Result<bool> {
        // the root provider only drives receipt polling over the same transport
        let provider = RootProvider::<AnyNetwork>::new(self.client.clone());
        let receipt = PendingTransactionBuilder::new(provider, hash)
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
