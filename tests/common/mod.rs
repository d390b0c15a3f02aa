//! Scripted wallet for integration tests. Every provider call is logged.

#![allow(dead_code)]

use alloy_primitives::{address, Address, TxHash, B256};
use async_trait::async_trait;
use monad_accounts::{
    Client, ClientConfig, Confirmation, NetworkConfig, ProviderError, TransactionSigner, TxRequest, WalletProvider,
};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::Notify;

pub const CONTRACT: Address = address!("1111111111111111111111111111111111111111");
pub const ALICE: Address = address!("000000000000000000000000000000000000a11c");
pub const BOB: Address = address!("0000000000000000000000000000000000000b0b");
pub const MONAD_TESTNET: u64 = 10143;

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn client() -> Client {
    Client::new(ClientConfig::new(CONTRACT).with_network(NetworkConfig::monad_testnet())).expect("client")
}

pub struct MockSigner {
    account: Address,
    calls: CallLog,
    pub broadcast: RefCell<Result<TxHash, ProviderError>>,
    pub confirm: RefCell<Result<bool, ProviderError>>,
    pub sent: RefCell<Vec<TxRequest>>,
    /// When set, confirmation waits until notified.
    pub gate: Option<Rc<Notify>>,
}

#[async_trait(?Send)]
impl TransactionSigner for MockSigner {
    fn account(&self) -> Address { self.account }

    async fn send_transaction(&self, request: &TxRequest) -> Result<TxHash, ProviderError> {
        self.calls.borrow_mut().push("send".into());
        self.sent.borrow_mut().push(request.clone());
        self.broadcast.borrow().clone()
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ProviderError> {
        self.calls.borrow_mut().push("wait".into());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let success = self.confirm.borrow().clone()?;
        Ok(Confirmation { tx_hash, block_number: Some(42), success })
    }
}

pub struct MockWallet {
    pub calls: CallLog,
    pub switch: RefCell<Result<(), ProviderError>>,
    pub accounts: RefCell<Result<Vec<Address>, ProviderError>>,
    pub chain: RefCell<u64>,
    pub gate: Option<Rc<Notify>>,
    pub signers: RefCell<Vec<Rc<MockSigner>>>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            switch: RefCell::new(Ok(())),
            accounts: RefCell::new(Ok(vec![ALICE])),
            chain: RefCell::new(MONAD_TESTNET),
            gate: None,
            signers: RefCell::new(Vec::new()),
        }
    }

    pub fn gated(gate: Rc<Notify>) -> Self {
        Self { gate: Some(gate), ..Self::new() }
    }

    pub fn calls(&self) -> Vec<String> { self.calls.borrow().clone() }

    pub fn call_count(&self) -> usize { self.calls.borrow().len() }

    /// The signer handed to the most recent session.
    pub fn signer_handle(&self) -> Rc<MockSigner> {
        self.signers.borrow().last().cloned().expect("no signer bound yet")
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        self.calls.borrow_mut().push(format!("switch:0x{chain_id:x}"));
        self.switch.borrow().clone()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.calls.borrow_mut().push("accounts".into());
        self.accounts.borrow().clone()
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        self.calls.borrow_mut().push("chainId".into());
        Ok(*self.chain.borrow())
    }

    fn signer(&self, account: Address) -> Rc<dyn TransactionSigner> {
        let signer = Rc::new(MockSigner {
            account,
            calls: self.calls.clone(),
            broadcast: RefCell::new(Ok(B256::repeat_byte(0xab))),
            confirm: RefCell::new(Ok(true)),
            sent: RefCell::new(Vec::new()),
            gate: self.gate.clone(),
        });
        self.signers.borrow_mut().push(signer.clone());
        signer
    }
}
