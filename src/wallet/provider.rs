//! Seams to the injected wallet: network switching, account authorization, signing.
//!
//! The browser implementation lives in `crate::wasm`; tests script their own.

use crate::error::ProviderError;
use crate::tx::TxRequest;
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use std::rc::Rc;

/// An EIP-1193 style wallet provider.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Ask the wallet to switch to `chain_id`. Fails with code 4902 when the
    /// wallet does not know the chain.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

    /// Ask the user to authorize accounts. Returns at least one on success.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// The chain the wallet is currently on.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Signing capability bound to an authorized account.
    fn signer(&self, account: Address) -> Rc<dyn TransactionSigner>;
}

/// Signs and broadcasts for one account, then waits for inclusion.
#[async_trait(?Send)]
pub trait TransactionSigner {
    fn account(&self) -> Address;

    /// Phase 1: sign and broadcast. Returns the pending transaction hash.
    async fn send_transaction(&self, request: &TxRequest) -> Result<TxHash, ProviderError>;

    /// Phase 2: suspend until the network reports the transaction included.
    /// No client-side timeout.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ProviderError>;
}

/// What the network reported once the transaction was included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    /// Receipt status: false means the call reverted.
    pub success: bool,
}
