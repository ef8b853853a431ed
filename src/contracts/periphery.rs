//! Methods of the libraries and factory around the Safe

use alloy::primitives::{Address, Bytes, B256, U256};

use super::kind::{CreateCall, MultiSend, MultiSendCallOnly, SafeProxyFactory, SignMessageLib};
use super::wrapper::Contract;
use super::{ICreateCall, IMultiSend, IMultiSendCallOnly, ISafeProxyFactory, ISignMessageLib};
use crate::client::{ChainClient, TransactionOptions, TransactionResult};
use crate::encoding::{encode_call_only_data, encode_multisend_data};
use crate::error::{Error, Result};
use crate::types::SafeCall;

impl<C: ChainClient> Contract<MultiSend, C> {
    /// `multiSend` calldata batching `calls`
    pub fn encode_multi_send(&self, calls: &[impl SafeCall]) -> Bytes {
        self.encode(&IMultiSend::multiSendCall {
            transactions: encode_multisend_data(calls),
        })
    }
}

impl<C: ChainClient> Contract<MultiSendCallOnly, C> {
    /// `multiSend` calldata batching `calls`; delegate calls are rejected
    pub fn encode_multi_send(&self, calls: &[impl SafeCall]) -> Result<Bytes> {
        Ok(self.encode(&IMultiSendCallOnly::multiSendCall {
            transactions: encode_call_only_data(calls)?,
        }))
    }
}

impl<C: ChainClient> Contract<CreateCall, C> {
    /// Deploys `deployment_data` with CREATE
    pub async fn perform_create(
        &self,
        value: U256,
        deployment_data: Bytes,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        let call = ICreateCall::performCreateCall {
            value,
            deploymentData: deployment_data,
        };
        self.send(&call, options).await
    }

    /// Deploys `deployment_data` with CREATE2 under `salt`
    pub async fn perform_create2(
        &self,
        value: U256,
        deployment_data: Bytes,
        salt: B256,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        let call = ICreateCall::performCreate2Call {
            value,
            deploymentData: deployment_data,
            salt,
        };
        self.send(&call, options).await
    }
}

impl<C: ChainClient> Contract<SafeProxyFactory, C> {
    /// Creation code the factory prefixes to every proxy
    pub async fn proxy_creation_code(&self) -> Result<Bytes> {
        self.read(&ISafeProxyFactory::proxyCreationCodeCall {})
            .await
            .map_err(|e| Error::Fetch {
                what: "proxy creation code",
                reason: e.to_string(),
            })
    }

    /// Deploys a Safe proxy for `singleton`, initialized with `initializer`
    pub async fn create_proxy_with_nonce(
        &self,
        singleton: Address,
        initializer: Bytes,
        salt_nonce: U256,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        let call = ISafeProxyFactory::createProxyWithNonceCall {
            _singleton: singleton,
            initializer,
            saltNonce: salt_nonce,
        };
        self.send(&call, options).await
    }
}

impl<C: ChainClient> Contract<SignMessageLib, C> {
    /// Hash the Safe stores for a signed `message`
    pub async fn get_message_hash(&self, message: Bytes) -> Result<B256> {
        self.read(&ISignMessageLib::getMessageHashCall { message })
            .await
            .map_err(|e| Error::Fetch {
                what: "message hash",
                reason: e.to_string(),
            })
    }

    /// `signMessage` calldata; only meaningful delegate-called from a Safe
    pub fn encode_sign_message(&self, data: Bytes) -> Bytes {
        self.encode(&ISignMessageLib::signMessageCall { _data: data })
    }

    /// Sends `signMessage` to the library directly
    pub async fn sign_message(
        &self,
        data: Bytes,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        self.send(&ISignMessageLib::signMessageCall { _data: data }, options)
            .await
    }
}
