//! Safe transaction E2E tests

use alloy::primitives::{address, Bytes, U256};
use safe_kit::{
    Call, ChainClient, Error, SafeTransactionOptions, SigningMethod, TransactionOptions,
};

use crate::common::TestHarness;
use crate::skip_if_no_rpc;

const TEN_ETH: u128 = 10_000_000_000_000_000_000;
const ONE_ETH: u128 = 1_000_000_000_000_000_000;

/// Test executing a single ETH transfer from a 1-of-1 Safe
#[tokio::test(flavor = "multi_thread")]
async fn test_execute_single_eth_transfer() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe = harness
        .deploy_safe(1, 1, U256::from(5001))
        .await
        .expect("Failed to deploy Safe");
    harness
        .mint_eth(safe.address(), U256::from(TEN_ETH))
        .await
        .expect("Failed to fund Safe");

    let recipient = address!("0x4444444444444444444444444444444444444444");
    let before = harness.get_balance(recipient).await.unwrap();

    let tx = safe
        .create_transaction(
            &[Call::new(recipient, U256::from(ONE_ETH), Bytes::new())],
            SafeTransactionOptions::default(),
        )
        .await
        .unwrap();

    // the executing owner signs through a pre-validated signature
    let result = safe
        .execute_transaction(&tx, TransactionOptions::default())
        .await
        .expect("Failed to execute transfer");
    assert!(harness.client().wait_for_transaction(result.hash).await.unwrap());
    let status = harness.client().transaction_status(result.hash).await.unwrap();
    assert_eq!(status, Some(true));

    let after = harness.get_balance(recipient).await.unwrap();
    assert_eq!(after, before + U256::from(ONE_ETH));
    assert_eq!(safe.nonce().await.unwrap(), U256::from(1));
}

/// Test executing several transfers through MultiSend
#[tokio::test(flavor = "multi_thread")]
async fn test_multicall_multiple_transfers() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe = harness
        .deploy_safe(1, 1, U256::from(5002))
        .await
        .expect("Failed to deploy Safe");
    harness
        .mint_eth(safe.address(), U256::from(TEN_ETH))
        .await
        .expect("Failed to fund Safe");

    let recipients = [
        address!("0x5555555555555555555555555555555555555555"),
        address!("0x6666666666666666666666666666666666666666"),
    ];
    let calls: Vec<Call> = recipients
        .iter()
        .map(|to| Call::new(*to, U256::from(ONE_ETH), Bytes::new()))
        .collect();

    for call_only in [false, true] {
        let before = harness.get_balance(recipients[1]).await.unwrap();
        let options = SafeTransactionOptions {
            call_only,
            ..Default::default()
        };
        let tx = safe.create_transaction(&calls, options).await.unwrap();
        safe.execute_transaction(&tx, TransactionOptions::default())
            .await
            .expect("Failed to execute batch");

        let after = harness.get_balance(recipients[1]).await.unwrap();
        assert_eq!(after, before + U256::from(ONE_ETH));
    }
}

/// Test a 2-of-3 Safe collecting an off-chain signature and an on-chain approval
#[tokio::test(flavor = "multi_thread")]
async fn test_multisig_signature_collection() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe = harness
        .deploy_safe(3, 2, U256::from(5003))
        .await
        .expect("Failed to deploy Safe");
    harness
        .mint_eth(safe.address(), U256::from(TEN_ETH))
        .await
        .expect("Failed to fund Safe");

    let recipient = address!("0x7777777777777777777777777777777777777777");
    let tx = safe
        .create_transaction(
            &[Call::new(recipient, U256::from(ONE_ETH), Bytes::new())],
            SafeTransactionOptions::default(),
        )
        .await
        .unwrap();
    let hash = safe.transaction_hash(&tx.data);
    assert_eq!(safe.contract().get_transaction_hash(&tx.data).await.unwrap(), hash);

    // owner 1 approves on-chain, owner 2 signs off-chain
    let approver = harness.safe_as(&safe, 1);
    approver
        .approve_transaction_hash(hash, TransactionOptions::default())
        .await
        .expect("Failed to approve hash");
    assert_eq!(
        safe.owners_who_approved(hash).await.unwrap(),
        vec![harness.owner(1)]
    );

    let signer = harness.safe_as(&safe, 2);
    let tx = signer
        .sign_transaction(tx, SigningMethod::EthSignTypedDataV4)
        .await
        .expect("Failed to sign");

    // executed by owner 1: approval plus owner 2's signature
    assert!(approver.is_valid_transaction(&tx, TransactionOptions::default()).await);
    approver
        .execute_transaction(&tx, TransactionOptions::default())
        .await
        .expect("Failed to execute");

    assert_eq!(harness.get_balance(recipient).await.unwrap(), U256::from(ONE_ETH));
}

/// Test that execution is refused below the threshold
#[tokio::test(flavor = "multi_thread")]
async fn test_execute_below_threshold_fails() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe = harness
        .deploy_safe(3, 2, U256::from(5004))
        .await
        .expect("Failed to deploy Safe");

    let tx = safe
        .create_transaction(
            &[Call::new(harness.owner(1), U256::ZERO, Bytes::new())],
            SafeTransactionOptions::default(),
        )
        .await
        .unwrap();

    assert!(!safe.is_valid_transaction(&tx, TransactionOptions::default()).await);
    let err = safe
        .execute_transaction(&tx, TransactionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientSignatures { threshold: 2, provided: 1 }));
}

/// Test that the nonce increments after each execution
#[tokio::test(flavor = "multi_thread")]
async fn test_nonce_increments() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe = harness
        .deploy_safe(1, 1, U256::from(5005))
        .await
        .expect("Failed to deploy Safe");

    for expected in 0..3u64 {
        assert_eq!(safe.nonce().await.unwrap(), U256::from(expected));
        let tx = safe
            .create_transaction(
                &[Call::new(harness.owner(1), U256::ZERO, Bytes::new())],
                SafeTransactionOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(tx.data.nonce, U256::from(expected));
        safe.execute_transaction(&tx, TransactionOptions::default())
            .await
            .expect("Failed to execute");
    }
}
