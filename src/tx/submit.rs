//! Transaction Submitter - one intent, one broadcast, one confirmation wait.

use super::contract::ContractBinding;
use crate::error::{ClientError, ProviderError};
use crate::intent::Intent;
use crate::wallet::{Confirmation, Session};
use alloy_primitives::TxHash;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Failure,
}

/// Terminal result of one submission. Rendered once, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum TxOutcome {
    Success {
        intent: Intent,
        confirmation: Confirmation,
    },
    Failure {
        intent: Intent,
        error: ClientError,
        /// Set when the failure happened after broadcast.
        tx_hash: Option<TxHash>,
    },
}

impl TxOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            TxOutcome::Success { .. } => OutcomeKind::Success,
            TxOutcome::Failure { .. } => OutcomeKind::Failure,
        }
    }

    pub fn is_success(&self) -> bool { self.kind() == OutcomeKind::Success }

    pub fn intent(&self) -> &Intent {
        match self {
            TxOutcome::Success { intent, .. } | TxOutcome::Failure { intent, .. } => intent,
        }
    }

    pub fn tx_ref(&self) -> Option<TxHash> {
        match self {
            TxOutcome::Success { confirmation, .. } => Some(confirmation.tx_hash),
            TxOutcome::Failure { tx_hash, .. } => *tx_hash,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            TxOutcome::Success { .. } => None,
            TxOutcome::Failure { error, .. } => Some(error),
        }
    }
}

/// Turns intents into contract calls through a session's signer.
#[derive(Debug, Clone)]
pub struct Submitter {
    contract: ContractBinding,
}

impl Submitter {
    pub fn new(contract: ContractBinding) -> Self { Self { contract } }

    /// Broadcast, then wait for inclusion. Both phases must succeed.
    ///
    /// Never returns an error: every provider failure becomes a
    /// [`TxOutcome::Failure`] carrying the raw provider error.
    pub async fn submit(&self, session: &Session, intent: Intent) -> TxOutcome {
        let action = intent.action();
        let request = self.contract.request(session.account(), &intent);
        debug!(%action, value = %request.value, "broadcasting");

        let tx_hash = match session.signer().send_transaction(&request).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!(%action, error = %e, "broadcast rejected");
                return TxOutcome::Failure { intent, error: ClientError::TransactionRejected(e), tx_hash: None };
            }
        };
        info!(%action, %tx_hash, "broadcast, awaiting confirmation");

        match session.signer().wait_for_confirmation(tx_hash).await {
            Ok(confirmation) if confirmation.success => {
                info!(%action, %tx_hash, block = ?confirmation.block_number, "confirmed");
                TxOutcome::Success { intent, confirmation }
            }
            Ok(confirmation) => {
                warn!(%action, %tx_hash, "reverted");
                let error = ProviderError::new(format!("transaction {} reverted", confirmation.tx_hash));
                TxOutcome::Failure { intent, error: ClientError::TransactionReverted(error), tx_hash: Some(tx_hash) }
            }
            Err(e) => {
                warn!(%action, %tx_hash, error = %e, "confirmation failed");
                TxOutcome::Failure { intent, error: ClientError::ConfirmationFailed(e), tx_hash: Some(tx_hash) }
            }
        }
    }
}
