//! Generic contract wrapper

use std::fmt;
use std::marker::PhantomData;

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use tracing::debug;

use super::kind::{
    CompatibilityFallbackHandler, ContractKind, CreateCall, MultiSend, MultiSendCallOnly,
    SafeProxyFactory, SafeSingleton, SignMessageLib,
};
use super::SafeVersion;
use crate::chain::ChainConfig;
use crate::client::{CallRequest, ChainClient, TransactionOptions, TransactionResult};
use crate::error::{Error, Result};

/// A deployed contract of kind `K`, reached through client `C`
///
/// The wrapper remembers which Safe release it was bound for, and the
/// kind-specific methods refuse functions that release does not have.
pub struct Contract<K, C> {
    client: C,
    address: Address,
    version: SafeVersion,
    chain_id: u64,
    _kind: PhantomData<K>,
}

pub type SafeContract<C> = Contract<SafeSingleton, C>;
pub type SafeProxyFactoryContract<C> = Contract<SafeProxyFactory, C>;
pub type MultiSendContract<C> = Contract<MultiSend, C>;
pub type MultiSendCallOnlyContract<C> = Contract<MultiSendCallOnly, C>;
pub type CreateCallContract<C> = Contract<CreateCall, C>;
pub type SignMessageLibContract<C> = Contract<SignMessageLib, C>;
pub type CompatibilityFallbackHandlerContract<C> = Contract<CompatibilityFallbackHandler, C>;

impl<K, C: Clone> Clone for Contract<K, C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            address: self.address,
            version: self.version,
            chain_id: self.chain_id,
            _kind: PhantomData,
        }
    }
}

impl<K: ContractKind, C> fmt::Debug for Contract<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("address", &self.address)
            .field("version", &self.version)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl<K: ContractKind, C: ChainClient> Contract<K, C> {
    /// Binds to the canonical deployment in `config`
    pub fn new(client: C, config: &ChainConfig) -> Result<Self> {
        Self::check_version(config.version)?;
        let address = K::default_address(config).ok_or(Error::ContractNotDeployed {
            contract: K::NAME,
            version: config.version,
            chain_id: config.chain_id,
        })?;
        Ok(Self::bind(client, address, config.version, config.chain_id))
    }

    /// Binds to a contract at a custom address
    pub fn at(client: C, address: Address, version: SafeVersion, chain_id: u64) -> Result<Self> {
        Self::check_version(version)?;
        Ok(Self::bind(client, address, version, chain_id))
    }

    fn bind(client: C, address: Address, version: SafeVersion, chain_id: u64) -> Self {
        Self {
            client,
            address,
            version,
            chain_id,
            _kind: PhantomData,
        }
    }

    fn check_version(version: SafeVersion) -> Result<()> {
        if version < K::SINCE {
            return Err(Error::UnsupportedVersion(format!(
                "{} ships with v{} and later, not v{version}",
                K::NAME,
                K::SINCE
            )));
        }
        Ok(())
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Release the wrapper was bound for
    pub fn version(&self) -> SafeVersion {
        self.version
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// ABI-encodes a call to this contract
    pub fn encode<F: SolCall>(&self, call: &F) -> Bytes {
        call.abi_encode().into()
    }

    /// Decodes calldata produced by [`Contract::encode`]
    pub fn decode<F: SolCall>(&self, data: &[u8]) -> Result<F> {
        Ok(F::abi_decode(data)?)
    }

    /// Estimates the gas of sending `call`
    pub async fn estimate_gas<F: SolCall>(
        &self,
        call: &F,
        options: &TransactionOptions,
    ) -> Result<u64> {
        let request = CallRequest::new(self.address, self.encode(call)).with_options(options.clone());
        self.client.estimate_gas(&request).await
    }

    /// Executes `call` as `eth_call` and decodes its return value
    pub async fn read<F: SolCall>(&self, call: &F) -> Result<F::Return> {
        let request = CallRequest::new(self.address, self.encode(call));
        let output = self.client.call(&request).await?;
        Ok(F::abi_decode_returns(&output)?)
    }

    /// Sends `call` as a transaction, estimating the gas limit when none is given
    pub async fn send<F: SolCall>(
        &self,
        call: &F,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        self.send_data(self.encode(call), options).await
    }

    pub(crate) async fn send_data(
        &self,
        data: Bytes,
        mut options: TransactionOptions,
    ) -> Result<TransactionResult> {
        let mut request = CallRequest::new(self.address, data).with_options(options.clone());

        if options.gas_limit.is_none() {
            let gas_limit = self.client.estimate_gas(&request).await?;
            debug!(contract = K::NAME, address = %self.address, gas_limit, "estimated gas limit");
            options.gas_limit = Some(gas_limit);
            request.options.gas_limit = Some(gas_limit);
        }

        let hash = self.client.send_transaction(request).await?;
        Ok(TransactionResult { hash, options })
    }

    /// Fails unless the bound release has `function`
    pub(crate) fn require(&self, function: &'static str, available: bool) -> Result<()> {
        if available {
            Ok(())
        } else {
            Err(Error::UnsupportedFunction {
                function,
                version: self.version,
            })
        }
    }
}
