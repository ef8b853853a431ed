//! ERC20 operations through a Safe

use alloy::primitives::{address, U256};
use safe_kit::{Call, SafeTransactionOptions, TransactionOptions, TypedCall};

use crate::common::{MockERC20, TestHarness};
use crate::skip_if_no_rpc;

/// Test deploying and minting the mock token
#[tokio::test(flavor = "multi_thread")]
async fn test_deploy_mock_erc20() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let token = harness.deploy_mock_erc20().await.expect("Failed to deploy token");

    harness
        .mint_erc20(token, harness.owner(0), U256::from(1000))
        .await
        .expect("Failed to mint");
    assert_eq!(
        harness.erc20_balance(token, harness.owner(0)).await.unwrap(),
        U256::from(1000)
    );
}

/// Test an ERC20 transfer executed by the Safe
#[tokio::test(flavor = "multi_thread")]
async fn test_erc20_transfer_via_safe() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let token = harness.deploy_mock_erc20().await.expect("Failed to deploy token");
    let safe = harness
        .deploy_safe(1, 1, U256::from(6001))
        .await
        .expect("Failed to deploy Safe");
    harness
        .mint_erc20(token, safe.address(), U256::from(1000))
        .await
        .expect("Failed to mint");

    let recipient = address!("0x8888888888888888888888888888888888888888");
    let transfer = TypedCall::new(
        token,
        MockERC20::transferCall {
            to: recipient,
            amount: U256::from(400),
        },
    );

    let tx = safe
        .create_transaction(&[transfer], SafeTransactionOptions::default())
        .await
        .unwrap();
    safe.execute_transaction(&tx, TransactionOptions::default())
        .await
        .expect("Failed to execute transfer");

    assert_eq!(harness.erc20_balance(token, recipient).await.unwrap(), U256::from(400));
    assert_eq!(
        harness.erc20_balance(token, safe.address()).await.unwrap(),
        U256::from(600)
    );
}

/// Test batching approve and transfer in one Safe transaction
#[tokio::test(flavor = "multi_thread")]
async fn test_batch_erc20_operations() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let token = harness.deploy_mock_erc20().await.expect("Failed to deploy token");
    let safe = harness
        .deploy_safe(1, 1, U256::from(6002))
        .await
        .expect("Failed to deploy Safe");
    harness
        .mint_erc20(token, safe.address(), U256::from(1000))
        .await
        .expect("Failed to mint");

    let spender = address!("0x9999999999999999999999999999999999999999");
    let calls = [
        Call::typed(
            token,
            &MockERC20::approveCall {
                spender,
                amount: U256::from(250),
            },
        ),
        Call::typed(
            token,
            &MockERC20::transferCall {
                to: spender,
                amount: U256::from(100),
            },
        ),
    ];

    let tx = safe
        .create_transaction(&calls, SafeTransactionOptions::default())
        .await
        .unwrap();
    safe.execute_transaction(&tx, TransactionOptions::default())
        .await
        .expect("Failed to execute batch");

    assert_eq!(harness.erc20_balance(token, spender).await.unwrap(), U256::from(100));
}
