//! Client - the validate → ensure-session → submit → report workflow
//!
//! Every user action is an independent task. The only shared state is the
//! session (replaced by `connect`, read-only during a submission) and the
//! set of forms with a submission in flight.

mod config;

pub use config::{parse_chain_id, ClientConfig, ConfigError, NetworkConfig};
pub use config::{ENV_CHAIN_ID, ENV_CHAIN_NAME, ENV_CONTRACT, ENV_CURRENCY, ENV_POLL_MS};

use crate::error::ClientError;
use crate::intent::{self, Action, FieldSource, Intent};
use crate::tx::{ContractBinding, Reporter, Submitter, TxOutcome};
use crate::wallet::{SessionManager, WalletProvider};
use alloy_primitives::Address;
use std::cell::RefCell;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub struct Client {
    config: ClientConfig,
    sessions: SessionManager,
    submitter: Submitter,
    reporter: Reporter,
    in_flight: RefCell<HashSet<Action>>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sessions: SessionManager::new(config.network.clone()),
            submitter: Submitter::new(ContractBinding::new(config.contract_address)),
            reporter: Reporter::new(&config.network),
            in_flight: RefCell::new(HashSet::new()),
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig { &self.config }

    pub fn sessions(&self) -> &SessionManager { &self.sessions }

    pub fn reporter(&self) -> &Reporter { &self.reporter }

    pub fn connected_address(&self) -> Option<Address> { self.sessions.connected_address() }

    pub fn is_in_flight(&self, action: Action) -> bool { self.in_flight.borrow().contains(&action) }

    /// Establish (or replace) the session. `None` means no wallet was found.
    pub async fn connect(&self, provider: Option<&dyn WalletProvider>) -> Result<Address, ClientError> {
        self.sessions.connect(provider).await.map(|s| s.account())
    }

    /// [`Client::connect`] reduced to the status line.
    pub async fn connect_status(&self, provider: Option<&dyn WalletProvider>) -> String {
        match self.connect(provider).await {
            Ok(account) => self.reporter.connected(account),
            Err(e) => self.reporter.report_error(None, &e),
        }
    }

    /// Validate the form, then submit. Validation and session errors never
    /// touch the provider.
    pub async fn execute<S: FieldSource + ?Sized>(&self, action: Action, form: &S) -> Result<TxOutcome, ClientError> {
        let intent = intent::validate(action, form).map_err(|e| {
            let cause = std::error::Error::source(&e).map(ToString::to_string);
            warn!(%action, error = %e, ?cause, "input rejected");
            ClientError::from(e)
        })?;
        self.submit_intent(intent).await
    }

    /// Submit an already-validated intent on the active session.
    pub async fn submit_intent(&self, intent: Intent) -> Result<TxOutcome, ClientError> {
        let action = intent.action();
        let session = self.sessions.active()?;
        let _guard = InFlight::acquire(&self.in_flight, action)?;
        info!(%action, account = %session.account(), "submitting");
        Ok(self.submitter.submit(&session, intent).await)
    }

    /// The whole workflow for one form submission, ending in its status line.
    pub async fn handle<S: FieldSource + ?Sized>(&self, action: Action, form: &S) -> String {
        let result = self.execute(action, form).await;
        match &result {
            Ok(outcome) => {
                if let Some(error) = outcome.error() {
                    let code = error.provider_error().and_then(|e| e.code);
                    warn!(%action, ?code, tx = ?outcome.tx_ref(), error = %error, "submission failed");
                }
            }
            Err(error) if error.is_local() => debug!(%action, error = %error, "refused before submission"),
            Err(error) => warn!(%action, error = %error, "submission aborted"),
        }
        self.reporter.report_result(action, &result)
    }
}

/// Marks an action busy until dropped.
struct InFlight<'a> {
    set: &'a RefCell<HashSet<Action>>,
    action: Action,
}

impl<'a> InFlight<'a> {
    fn acquire(set: &'a RefCell<HashSet<Action>>, action: Action) -> Result<Self, ClientError> {
        if !set.borrow_mut().insert(action) {
            return Err(ClientError::SubmissionInFlight(action));
        }
        Ok(Self { set, action })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.borrow_mut().remove(&self.action);
    }
}
