//! Session establishment against a scripted wallet.
//!
//! Run with: cargo test --test session_tests

mod common;

use common::{client, MockWallet, ALICE, BOB, MONAD_TESTNET};
use monad_accounts::{ClientError, ProviderError};

/// Test: No injected wallet yields ProviderMissing and an install prompt
#[tokio::test]
async fn missing_provider_is_reported_without_session() {
    let client = client();
    assert_eq!(client.connect(None).await, Err(ClientError::ProviderMissing));
    assert_eq!(client.connected_address(), None);
    assert!(client.connect_status(None).await.contains("install"));
}

/// Test: Chain error 4902 halts connect before accounts are requested
#[tokio::test]
async fn unrecognized_chain_halts_before_account_request() {
    let client = client();
    let wallet = MockWallet::new();
    *wallet.switch.borrow_mut() = Err(ProviderError::new("Unrecognized chain ID \"0x279f\"").with_code(4902));

    let err = client.connect(Some(&wallet)).await.unwrap_err();
    assert_eq!(err, ClientError::NetworkNotConfigured { chain_id: MONAD_TESTNET, name: "Monad Testnet".into() });
    assert!(err.is_blocking());
    assert_eq!(wallet.calls(), vec!["switch:0x279f"]);
    assert_eq!(client.connected_address(), None);
}

/// Test: Unknown chain is recognized from the message when the code is absent
#[tokio::test]
async fn unrecognized_chain_detected_from_message_alone() {
    let client = client();
    let wallet = MockWallet::new();
    *wallet.switch.borrow_mut() = Err(ProviderError::new("Unrecognized chain ID 0x279f. Try adding the chain"));

    let status = client.connect_status(Some(&wallet)).await;
    assert_eq!(status, "⚠️ Please add Monad Testnet to your wallet");
}

/// Test: Any other switch failure is a session error
#[tokio::test]
async fn other_switch_failures_are_session_errors() {
    let client = client();
    let wallet = MockWallet::new();
    *wallet.switch.borrow_mut() = Err(ProviderError::new("User rejected the request.").with_code(4001));

    let err = client.connect(Some(&wallet)).await.unwrap_err();
    assert!(matches!(err, ClientError::Session(ref e) if e.code == Some(4001)));
    assert_eq!(wallet.calls(), vec!["switch:0x279f"]);

    let status = client.connect_status(Some(&wallet)).await;
    assert_eq!(status, "❌ Wallet connection failed: Rejected in wallet");
}

/// Test: The first authorized account is bound to the session and signer
#[tokio::test]
async fn first_authorized_account_is_bound() {
    let client = client();
    let wallet = MockWallet::new();
    *wallet.accounts.borrow_mut() = Ok(vec![ALICE, BOB]);

    let account = client.connect(Some(&wallet)).await.expect("connect");
    assert_eq!(account, ALICE);
    assert_eq!(wallet.calls(), vec!["switch:0x279f", "accounts", "chainId"]);

    let session = client.sessions().active().expect("session");
    assert_eq!(session.account(), ALICE);
    assert_eq!(session.chain_id(), MONAD_TESTNET);
    assert_eq!(session.signer().account(), ALICE);
}

/// Test: Successful connect reports the account
#[tokio::test]
async fn connected_status_names_the_account() {
    let client = client();
    let wallet = MockWallet::new();
    let status = client.connect_status(Some(&wallet)).await;
    assert_eq!(status, format!("✅ Connected: {ALICE}"));
}

/// Test: Wallet still on another chain after switching yields no session
#[tokio::test]
async fn wallet_left_on_wrong_chain_is_not_a_session() {
    let client = client();
    let wallet = MockWallet::new();
    *wallet.chain.borrow_mut() = 1;

    let err = client.connect(Some(&wallet)).await.unwrap_err();
    assert!(matches!(err, ClientError::Session(_)));
    assert!(client.sessions().active().is_err());
}

/// Test: Empty account list is a session error
#[tokio::test]
async fn empty_account_list_is_a_session_error() {
    let client = client();
    let wallet = MockWallet::new();
    *wallet.accounts.borrow_mut() = Ok(vec![]);

    assert!(matches!(client.connect(Some(&wallet)).await, Err(ClientError::Session(_))));
    assert_eq!(client.connected_address(), None);
}

/// Test: Reconnect replaces the session and its signer
#[tokio::test]
async fn reconnect_replaces_session() {
    let client = client();
    let wallet = MockWallet::new();
    client.connect(Some(&wallet)).await.expect("first connect");

    *wallet.accounts.borrow_mut() = Ok(vec![BOB]);
    client.connect(Some(&wallet)).await.expect("second connect");
    assert_eq!(client.connected_address(), Some(BOB));
    assert_eq!(client.sessions().active().expect("session").signer().account(), BOB);
}

/// Test: Failed reconnect leaves the previous session in place
#[tokio::test]
async fn failed_reconnect_keeps_previous_session() {
    let client = client();
    let wallet = MockWallet::new();
    client.connect(Some(&wallet)).await.expect("connect");

    *wallet.accounts.borrow_mut() = Err(ProviderError::new("User rejected the request.").with_code(4001));
    assert!(client.connect(Some(&wallet)).await.is_err());
    assert_eq!(client.connected_address(), Some(ALICE));
}

/// Test: Moving the wallet off the required chain ends the session
#[tokio::test]
async fn chain_change_ends_session() {
    let client = client();
    let wallet = MockWallet::new();
    client.connect(Some(&wallet)).await.expect("connect");

    client.sessions().on_chain_changed(MONAD_TESTNET);
    assert_eq!(client.connected_address(), Some(ALICE));

    client.sessions().on_chain_changed(1);
    assert_eq!(client.connected_address(), None);
    assert_eq!(client.sessions().active().err(), Some(ClientError::NotConnected));
}

/// Test: Changing the authorized account ends the session
#[tokio::test]
async fn account_change_ends_session() {
    let client = client();
    let wallet = MockWallet::new();
    client.connect(Some(&wallet)).await.expect("connect");

    client.sessions().on_accounts_changed(&[ALICE, BOB]);
    assert_eq!(client.connected_address(), Some(ALICE));

    client.sessions().on_accounts_changed(&[BOB]);
    assert_eq!(client.connected_address(), None);
}
