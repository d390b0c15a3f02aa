//! Structured log output of the connect/submit workflow.
//!
//! Run with: cargo test --test logging_tests

mod common;

use common::{client, MockWallet, ALICE};
use monad_accounts::logging::{init_logging, subscriber, LogFormat};
use monad_accounts::{Action, ProviderError};
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn events(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner()).clone();
        String::from_utf8(bytes)
            .expect("utf8 log output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
            .collect()
    }
}

fn find<'a>(events: &'a [Value], message: &str) -> Option<&'a Value> {
    events.iter().find(|e| e["fields"]["message"] == message)
}

/// Test: A successful deposit logs connect, submit and confirmation as JSON events
#[tokio::test]
async fn successful_deposit_is_traced() {
    let capture = Capture::default();
    let sink = capture.clone();
    let _guard = tracing::subscriber::set_default(subscriber(
        LogFormat::Json,
        Some("monad_accounts=debug"),
        move || sink.clone(),
    ));

    let client = client();
    let wallet = MockWallet::new();
    client.connect(Some(&wallet)).await.expect("connect");
    client.handle(Action::Deposit, &[("amount", "1")][..]).await;

    let events = capture.events();
    let connected = find(&events, "wallet connected").expect("connect event");
    assert_eq!(connected["level"], "INFO");
    assert_eq!(connected["fields"]["account"], ALICE.to_string());
    assert!(connected["target"].as_str().is_some_and(|t| t.starts_with("monad_accounts::wallet")));

    let submitting = find(&events, "submitting").expect("submit event");
    assert_eq!(submitting["fields"]["action"], "deposit");
    assert!(find(&events, "confirmed").is_some());
}

/// Test: Provider failures are logged at warn with their code; local refusals at debug
#[tokio::test]
async fn failures_are_traced_by_origin() {
    let capture = Capture::default();
    let sink = capture.clone();
    let _guard = tracing::subscriber::set_default(subscriber(
        LogFormat::Json,
        Some("monad_accounts=debug"),
        move || sink.clone(),
    ));

    let client = client();
    client.handle(Action::Withdraw, &[("withdrawAmount", "1")][..]).await;

    let wallet = MockWallet::new();
    client.connect(Some(&wallet)).await.expect("connect");
    *wallet.signer_handle().broadcast.borrow_mut() = Err(ProviderError::new("denied").with_code(4001));
    client.handle(Action::Deposit, &[("amount", "1")][..]).await;

    let events = capture.events();
    let refused = find(&events, "refused before submission").expect("local refusal");
    assert_eq!(refused["level"], "DEBUG");

    let failed = find(&events, "submission failed").expect("provider failure");
    assert_eq!(failed["level"], "WARN");
    assert_eq!(failed["fields"]["code"], "Some(4001)");
}

/// Test: The process-wide subscriber installs once
#[test]
fn init_logging_installs_once() {
    init_logging();
    assert!(!init_logging());
}
