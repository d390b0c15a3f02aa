//! Wallet Session Manager - the single active (account, chain, signer) binding.

use super::provider::{TransactionSigner, WalletProvider};
use crate::client::NetworkConfig;
use crate::error::{ClientError, ProviderError};
use alloy_primitives::Address;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// An authorized wallet connection on the required network.
///
/// Only [`SessionManager`] creates sessions, so holding one implies the
/// chain check passed.
pub struct Session {
    account: Address,
    chain_id: u64,
    signer: Rc<dyn TransactionSigner>,
}

impl Session {
    pub(crate) fn new(account: Address, chain_id: u64, signer: Rc<dyn TransactionSigner>) -> Self {
        Self { account, chain_id, signer }
    }

    pub fn account(&self) -> Address { self.account }

    pub fn chain_id(&self) -> u64 { self.chain_id }

    pub fn signer(&self) -> &dyn TransactionSigner { self.signer.as_ref() }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

/// Holds at most one [`Session`]. `connect` replaces it; submissions take a
/// snapshot via [`SessionManager::active`] so a replacement never affects an
/// in-flight task.
pub struct SessionManager {
    network: NetworkConfig,
    current: RefCell<Option<Rc<Session>>>,
}

impl SessionManager {
    pub fn new(network: NetworkConfig) -> Self {
        Self { network, current: RefCell::new(None) }
    }

    /// Switch network, authorize an account, bind a signer.
    ///
    /// A failed attempt leaves any previous session in place; the wallet's
    /// chain/account events are what invalidate it.
    pub async fn connect(&self, provider: Option<&dyn WalletProvider>) -> Result<Rc<Session>, ClientError> {
        let provider = provider.ok_or(ClientError::ProviderMissing)?;
        let required = self.network.chain_id;

        debug!(chain = %self.network.chain_id_hex(), "requesting network switch");
        if let Err(e) = provider.switch_chain(required).await {
            if e.is_unrecognized_chain() {
                warn!(chain = required, "required network not configured in wallet");
                return Err(ClientError::NetworkNotConfigured { chain_id: required, name: self.network.name.clone() });
            }
            warn!(error = %e, "network switch failed");
            return Err(ClientError::Session(e));
        }

        let accounts = provider.request_accounts().await.map_err(ClientError::Session)?;
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| ClientError::Session(ProviderError::new("wallet returned no accounts")))?;

        let active = provider.chain_id().await.map_err(ClientError::Session)?;
        if active != required {
            warn!(expected = required, actual = active, "wallet still on another network");
            return Err(ClientError::Session(ProviderError::new(format!(
                "wallet is on chain {active}, expected {required}"
            ))));
        }

        let session = Rc::new(Session::new(account, active, provider.signer(account)));
        self.current.replace(Some(session.clone()));
        info!(%account, chain = active, "wallet connected");
        Ok(session)
    }

    /// The current session, if present and on the required network.
    pub fn active(&self) -> Result<Rc<Session>, ClientError> {
        match self.current.borrow().as_ref() {
            Some(s) if s.chain_id == self.network.chain_id => Ok(s.clone()),
            _ => Err(ClientError::NotConnected),
        }
    }

    pub fn connected_address(&self) -> Option<Address> {
        self.current.borrow().as_ref().map(|s| s.account)
    }

    /// Drop the session. Returns whether one existed.
    pub fn disconnect(&self) -> bool {
        let had = self.current.replace(None).is_some();
        if had {
            info!("wallet session closed");
        }
        had
    }

    /// Wallet moved networks. Anything but the required chain ends the session.
    pub fn on_chain_changed(&self, chain_id: u64) {
        if chain_id != self.network.chain_id && self.disconnect() {
            warn!(chain = chain_id, "wallet left the required network");
        }
    }

    /// Wallet's authorized accounts changed. The signer is bound to one
    /// account, so losing or replacing it ends the session.
    pub fn on_accounts_changed(&self, accounts: &[Address]) {
        let Some(current) = self.connected_address() else { return };
        if accounts.first() != Some(&current) && self.disconnect() {
            warn!(%current, "authorized account changed");
        }
    }
}
