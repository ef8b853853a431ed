//! Safe singleton / proxy methods

use alloy::primitives::{b256, Address, Bytes, B256, U256};
use alloy::sol_types::{Revert, SolCall, SolError, SolValue};
use tracing::{debug, warn};

use super::kind::SafeSingleton;
use super::wrapper::Contract;
use super::{ISafe, SafeFeature, SafeVersion, SENTINEL_ADDRESS};
use crate::client::{CallRequest, ChainClient, TransactionOptions, TransactionResult};
use crate::error::{Error, Result};
use crate::types::{SafeTransaction, SafeTransactionData};

/// Page size used when walking the module list
const MODULES_PAGE_SIZE: u64 = 10;

/// Upper bound on pages walked before giving up on a module list
const MAX_MODULE_PAGES: usize = 100;

/// keccak256("guard_manager.guard.address")
const GUARD_STORAGE_SLOT: B256 =
    b256!("0x4a204f620c8c5ccdca3fd54d003badd85ba500436a431f0cbda4f558c93c34c8");

/// Reads the gas figure out of a `requiredTxGas` revert
///
/// The contract reverts with `Error(string)` whose string is the raw 32-byte
/// big-endian gas; some nodes hand back the bare word.
fn decode_required_gas(revert: &[u8]) -> Result<u64> {
    let word = match revert.strip_prefix(Revert::SELECTOR.as_slice()) {
        Some(encoded) => Bytes::abi_decode(encoded)?,
        None => Bytes::copy_from_slice(revert),
    };
    if word.len() != 32 {
        return Err(Error::GasEstimation(format!(
            "unexpected requiredTxGas revert data {word}"
        )));
    }
    Ok(U256::from_be_slice(&word).saturating_to())
}

fn transaction_hash_call(tx: &SafeTransactionData) -> ISafe::getTransactionHashCall {
    ISafe::getTransactionHashCall {
        to: tx.to,
        value: tx.value,
        data: tx.data.clone(),
        operation: tx.operation.as_u8(),
        safeTxGas: tx.safe_tx_gas,
        baseGas: tx.base_gas,
        gasPrice: tx.gas_price,
        gasToken: tx.gas_token,
        refundReceiver: tx.refund_receiver,
        _nonce: tx.nonce,
    }
}

impl<C: ChainClient> Contract<SafeSingleton, C> {
    async fn fetch<F: SolCall>(&self, what: &'static str, call: F) -> Result<F::Return> {
        self.read(&call).await.map_err(|e| Error::Fetch {
            what,
            reason: e.to_string(),
        })
    }

    /// `VERSION()` as reported by the contract
    pub async fn contract_version(&self) -> Result<String> {
        self.fetch("version", ISafe::VERSIONCall {}).await
    }

    /// `NAME()`, removed in v1.3.0
    pub async fn name(&self) -> Result<String> {
        self.require("NAME", self.version() < SafeVersion::V1_3_0)?;
        self.fetch("name", ISafe::NAMECall {}).await
    }

    /// Non-zero if `owner` approved `hash` on-chain
    pub async fn approved_hashes(&self, owner: Address, hash: B256) -> Result<U256> {
        self.fetch("approved hashes", ISafe::approvedHashesCall { owner, hash })
            .await
    }

    /// Approves `hash` for the sending owner
    pub async fn approve_hash(
        &self,
        hash: B256,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        self.send(&ISafe::approveHashCall { hashToApprove: hash }, options)
            .await
    }

    /// Reverts (as an error) unless `signatures` satisfy the threshold
    pub async fn check_signatures(
        &self,
        data_hash: B256,
        data: Bytes,
        signatures: Bytes,
    ) -> Result<()> {
        let call = ISafe::checkSignaturesCall {
            dataHash: data_hash,
            data,
            signatures,
        };
        self.read(&call).await.map(|_| ())
    }

    /// Reverts (as an error) unless `signatures` hold `required` valid owner signatures
    pub async fn check_n_signatures(
        &self,
        data_hash: B256,
        data: Bytes,
        signatures: Bytes,
        required: U256,
    ) -> Result<()> {
        self.require("checkNSignatures", self.version() >= SafeVersion::V1_3_0)?;
        let call = ISafe::checkNSignaturesCall {
            dataHash: data_hash,
            data,
            signatures,
            requiredSignatures: required,
        };
        self.read(&call).await.map(|_| ())
    }

    pub async fn domain_separator(&self) -> Result<B256> {
        self.fetch("domain separator", ISafe::domainSeparatorCall {})
            .await
    }

    /// Pre-image of the transaction hash as computed by the contract
    pub async fn encode_transaction_data(&self, tx: &SafeTransactionData) -> Result<Bytes> {
        let hash_call = transaction_hash_call(tx);
        let call = ISafe::encodeTransactionDataCall {
            to: hash_call.to,
            value: hash_call.value,
            data: hash_call.data,
            operation: hash_call.operation,
            safeTxGas: hash_call.safeTxGas,
            baseGas: hash_call.baseGas,
            gasPrice: hash_call.gasPrice,
            gasToken: hash_call.gasToken,
            refundReceiver: hash_call.refundReceiver,
            _nonce: hash_call._nonce,
        };
        self.fetch("transaction data", call).await
    }

    /// Transaction hash as computed by the contract
    pub async fn get_transaction_hash(&self, tx: &SafeTransactionData) -> Result<B256> {
        self.fetch("transaction hash", transaction_hash_call(tx))
            .await
    }

    /// `getChainId()`, added in v1.3.0
    pub async fn get_chain_id(&self) -> Result<U256> {
        self.require("getChainId", self.version() >= SafeVersion::V1_3_0)?;
        self.fetch("chain id", ISafe::getChainIdCall {}).await
    }

    /// One page of enabled modules and the cursor of the next page
    pub async fn get_modules_paginated(
        &self,
        start: Address,
        page_size: u64,
    ) -> Result<(Vec<Address>, Address)> {
        self.require("getModulesPaginated", self.version() >= SafeVersion::V1_1_1)?;
        let page = self
            .fetch(
                "modules",
                ISafe::getModulesPaginatedCall {
                    start,
                    pageSize: U256::from(page_size),
                },
            )
            .await?;
        Ok((page.array, page.next))
    }

    /// All enabled modules
    ///
    /// v1.4.1 dropped `getModules()`, so the paginated getter is walked instead.
    pub async fn get_modules(&self) -> Result<Vec<Address>> {
        if self.version() < SafeVersion::V1_4_1 {
            return self.fetch("modules", ISafe::getModulesCall {}).await;
        }

        let mut modules = Vec::new();
        let mut start = SENTINEL_ADDRESS;
        for _ in 0..MAX_MODULE_PAGES {
            let (page, next) = self.get_modules_paginated(start, MODULES_PAGE_SIZE).await?;
            let done = page.is_empty() || next == SENTINEL_ADDRESS || next == Address::ZERO;
            modules.extend(page);
            if done {
                return Ok(modules);
            }
            if next == start {
                return Err(Error::Fetch {
                    what: "modules",
                    reason: format!("pagination cursor stuck at {next}"),
                });
            }
            start = next;
        }
        Err(Error::Fetch {
            what: "modules",
            reason: format!("module list exceeds {MAX_MODULE_PAGES} pages"),
        })
    }

    pub async fn get_owners(&self) -> Result<Vec<Address>> {
        self.fetch("owners", ISafe::getOwnersCall {}).await
    }

    pub async fn get_threshold(&self) -> Result<u64> {
        let threshold = self.fetch("threshold", ISafe::getThresholdCall {}).await?;
        Ok(threshold.saturating_to())
    }

    /// Raw storage words through `StorageAccessible`, added in v1.3.0
    pub async fn get_storage_at(&self, offset: U256, length: U256) -> Result<Bytes> {
        self.require(
            "getStorageAt",
            self.version().has_feature(SafeFeature::SimulateAndRevert),
        )?;
        self.fetch("storage", ISafe::getStorageAtCall { offset, length })
            .await
    }

    /// Transaction guard, zero when none is set
    pub async fn get_guard(&self) -> Result<Address> {
        self.require("getGuard", self.version().has_feature(SafeFeature::SafeTxGuards))?;
        let word = self
            .get_storage_at(U256::from_be_bytes(GUARD_STORAGE_SLOT.0), U256::from(1))
            .await?;
        if word.len() != 32 {
            return Err(Error::Fetch {
                what: "guard",
                reason: format!("expected one storage word, got {} bytes", word.len()),
            });
        }
        Ok(Address::from_slice(&word[12..]))
    }

    /// Gas the Safe spends executing `tx`, measured on-chain by `requiredTxGas`
    ///
    /// The call always reverts; the gas figure is carried in the revert data.
    pub async fn required_tx_gas(&self, tx: &SafeTransactionData) -> Result<u64> {
        self.require(
            "requiredTxGas",
            self.version().has_feature(SafeFeature::RequiredTxGas),
        )?;
        let call = ISafe::requiredTxGasCall {
            to: tx.to,
            value: tx.value,
            data: tx.data.clone(),
            operation: tx.operation.as_u8(),
        };
        let request = CallRequest::new(self.address(), self.encode(&call))
            .with_options(TransactionOptions::default().with_from(self.address()));

        match self.client().call(&request).await {
            Err(Error::Reverted(revert)) => {
                let gas = decode_required_gas(&revert)?;
                debug!(gas, operation = ?tx.operation, "requiredTxGas");
                Ok(gas)
            }
            Err(err) => Err(Error::GasEstimation(err.to_string())),
            Ok(output) => Err(Error::GasEstimation(format!(
                "requiredTxGas returned {output} instead of reverting"
            ))),
        }
    }

    /// EIP-1271 message hash; moved to the fallback handler in v1.3.0
    pub async fn get_message_hash(&self, message: Bytes) -> Result<B256> {
        self.require("getMessageHash", self.version() < SafeVersion::V1_3_0)?;
        self.fetch("message hash", ISafe::getMessageHashCall { message })
            .await
    }

    /// Whether `module` is enabled
    ///
    /// `isModuleEnabled` arrived in v1.2.0; v1.1.1 scans the module list.
    pub async fn is_module_enabled(&self, module: Address) -> Result<bool> {
        self.require("isModuleEnabled", self.version() >= SafeVersion::V1_1_1)?;
        if self.version() < SafeVersion::V1_2_0 {
            return Ok(self.get_modules().await?.contains(&module));
        }
        self.fetch("module status", ISafe::isModuleEnabledCall { module })
            .await
    }

    pub async fn is_owner(&self, owner: Address) -> Result<bool> {
        self.fetch("owner status", ISafe::isOwnerCall { owner }).await
    }

    /// Current Safe nonce
    pub async fn nonce(&self) -> Result<U256> {
        self.fetch("nonce", ISafe::nonceCall {}).await
    }

    /// Non-zero if the message hash was signed through SignMessageLib
    pub async fn signed_messages(&self, message_hash: B256) -> Result<U256> {
        self.fetch(
            "signed messages",
            ISafe::signedMessagesCall {
                messageHash: message_hash,
            },
        )
        .await
    }

    /// Calldata of `execTransaction` for `tx` and its collected signatures
    pub fn encode_exec_transaction(&self, tx: &SafeTransaction) -> Bytes {
        let data = &tx.data;
        self.encode(&ISafe::execTransactionCall {
            to: data.to,
            value: data.value,
            data: data.data.clone(),
            operation: data.operation.as_u8(),
            safeTxGas: data.safe_tx_gas,
            baseGas: data.base_gas,
            gasPrice: data.gas_price,
            gasToken: data.gas_token,
            refundReceiver: data.refund_receiver,
            signatures: tx.encoded_signatures(),
        })
    }

    /// Sends `execTransaction`, estimating the gas limit when none is given
    pub async fn exec_transaction(
        &self,
        tx: &SafeTransaction,
        options: TransactionOptions,
    ) -> Result<TransactionResult> {
        self.send_data(self.encode_exec_transaction(tx), options)
            .await
    }

    /// Runs `execTransaction` as a static call and reports whether it succeeds
    ///
    /// Every failure, including an unreachable node, reports `false`.
    pub async fn is_valid_transaction(
        &self,
        tx: &SafeTransaction,
        options: TransactionOptions,
    ) -> bool {
        let request = CallRequest::new(self.address(), self.encode_exec_transaction(tx))
            .with_options(options);

        match self.simulate_exec(request).await {
            Ok(success) => success,
            Err(err) => {
                warn!(safe = %self.address(), %err, "transaction failed validation");
                false
            }
        }
    }

    async fn simulate_exec(&self, mut request: CallRequest) -> Result<bool> {
        if request.options.gas_limit.is_none() {
            request.options.gas_limit = Some(self.client().estimate_gas(&request).await?);
        }
        let output = self.client().call(&request).await?;
        Ok(ISafe::execTransactionCall::abi_decode_returns(&output)?)
    }
}
