//! Safe deployment E2E tests

use alloy::primitives::U256;
use safe_kit::{predict_safe_address, ChainClient, SafeAccountConfig, SafeVersion};

use crate::common::TestHarness;
use crate::skip_if_no_rpc;

/// Test deploying a 1-of-1 Safe at its predicted address
#[tokio::test(flavor = "multi_thread")]
async fn test_deploy_safe_success() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let account = SafeAccountConfig::new(vec![harness.owner(0)], 1);
    let salt_nonce = U256::from(1001);

    let predicted = predict_safe_address(harness.client(), &harness.config, &account, salt_nonce)
        .await
        .expect("Failed to predict address");

    let safe = harness
        .deploy_safe(1, 1, salt_nonce)
        .await
        .expect("Failed to deploy Safe");
    assert_eq!(safe.address(), predicted);

    let code = harness.client().get_code(predicted).await.unwrap();
    assert!(!code.is_empty(), "Safe should have code");

    assert_eq!(safe.owners().await.unwrap(), vec![harness.owner(0)]);
    assert_eq!(safe.threshold().await.unwrap(), 1);
    assert_eq!(safe.nonce().await.unwrap(), U256::ZERO);
    assert_eq!(safe.contract().contract_version().await.unwrap(), "1.4.1");
}

/// Test that deploying the same Safe twice fails
#[tokio::test(flavor = "multi_thread")]
async fn test_deploy_same_safe_twice_fails() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    harness
        .deploy_safe(1, 1, U256::from(1002))
        .await
        .expect("First deployment should succeed");

    let second = harness.deploy_safe(1, 1, U256::from(1002)).await;
    assert!(second.is_err(), "Second deployment should fail");
}

/// Test deploying a 2-of-3 Safe
#[tokio::test(flavor = "multi_thread")]
async fn test_deploy_safe_multiple_owners() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe = harness
        .deploy_safe(3, 2, U256::from(1003))
        .await
        .expect("Failed to deploy Safe");

    let owners = safe.owners().await.unwrap();
    assert_eq!(owners.len(), 3);
    for i in 0..3 {
        assert!(safe.is_owner(harness.owner(i)).await.unwrap());
    }
    assert_eq!(safe.threshold().await.unwrap(), 2);
}

/// Test connecting to a deployed Safe reads its version
#[tokio::test(flavor = "multi_thread")]
async fn test_connect_detects_version() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let deployed = harness
        .deploy_safe(1, 1, U256::from(1004))
        .await
        .expect("Failed to deploy Safe");

    let safe = safe_kit::Safe::connect(harness.client(), deployed.address())
        .await
        .expect("Failed to connect");
    assert_eq!(safe.version(), SafeVersion::V1_4_1);
    assert_eq!(safe.chain_id(), harness.config.chain_id);
    assert!(safe.modules().await.unwrap().is_empty());
}
