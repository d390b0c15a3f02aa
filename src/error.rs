//! Error taxonomy for the connect/submit workflow.

use crate::core::fields::{code, needle};
use crate::intent::{Action, ValidationError};
use alloy_sol_types::{Revert, SolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw error reported by the wallet provider or the network behind it.
///
/// `reason` is the contract-supplied revert string when one could be
/// recovered; it is the only provider text ever shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
    pub reason: Option<String>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into(), reason: None }
    }

    pub fn with_code(mut self, code: i64) -> Self { self.code = Some(code); self }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self { self.reason = Some(reason.into()); self }

    /// Build from the pieces of a JSON-RPC / EIP-1193 error object.
    ///
    /// The revert reason is decoded from ABI-encoded revert `data` when
    /// present. Message text is left for the outcome classifier.
    pub fn from_rpc(code: Option<i64>, message: impl Into<String>, data: Option<&str>) -> Self {
        Self { code, message: message.into(), reason: data.and_then(reason_from_revert_data) }
    }

    /// Build from a whole EIP-1193 error object.
    ///
    /// Wallets nest the interesting parts differently: the code may sit under
    /// `data.originalError`, revert data under `data`, `data.data` or
    /// `data.originalError.data`. A top-level `reason` is used when no revert
    /// data decodes.
    pub fn from_rpc_object(err: &Value) -> Self {
        let int = |v: &Value| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64));
        let data = err.get("data");
        let nested = data.and_then(|d| d.get("originalError"));

        let code = err.get("code").and_then(int).or_else(|| nested.and_then(|n| n.get("code")).and_then(int));
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| err.as_str())
            .unwrap_or("unknown provider error");
        let revert = data
            .and_then(Value::as_str)
            .or_else(|| data.and_then(|d| d.get("data")).and_then(Value::as_str))
            .or_else(|| nested.and_then(|n| n.get("data")).and_then(Value::as_str));

        let error = Self::from_rpc(code, message, revert);
        match err.get("reason").and_then(Value::as_str) {
            Some(reason) if error.reason.is_none() => error.with_reason(reason),
            _ => error,
        }
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(code::UNRECOGNIZED_CHAIN) || self.message.contains(needle::UNRECOGNIZED_CHAIN)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(code::USER_REJECTED)
    }
}

fn reason_from_revert_data(data: &str) -> Option<String> {
    let bytes = hex::decode(data.trim_start_matches("0x")).ok()?;
    if bytes.len() < 4 {
        return None;
    }
    // Error(string); custom errors and panics carry no displayable reason
    Revert::abi_decode(&bytes, true)
        .ok()
        .map(|r| r.reason)
        .filter(|r| !r.trim().is_empty())
}

/// Every way a connect or submission attempt can end without success.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// No injected wallet. Blocks all action.
    #[error("no wallet provider available")]
    ProviderMissing,

    /// The wallet does not know the required network. No auto-registration.
    #[error("network {name} ({chain_id}) is not configured in the wallet")]
    NetworkNotConfigured { chain_id: u64, name: String },

    /// Any other connect-phase failure, propagated unchanged.
    #[error("wallet session error: {0}")]
    Session(ProviderError),

    #[error("wallet not connected")]
    NotConnected,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Broadcast failed (signing refused, pre-broadcast checks).
    #[error("transaction rejected: {0}")]
    TransactionRejected(ProviderError),

    /// Included on-chain but execution failed.
    #[error("transaction reverted: {0}")]
    TransactionReverted(ProviderError),

    /// The wait for inclusion itself failed (dropped, RPC failure).
    #[error("confirmation failed: {0}")]
    ConfirmationFailed(ProviderError),

    /// The same form already has a submission waiting on the network.
    #[error("a {0} submission is already in flight")]
    SubmissionInFlight(Action),
}

impl ClientError {
    /// The raw provider error behind this failure, if the provider produced it.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            ClientError::Session(e)
            | ClientError::TransactionRejected(e)
            | ClientError::TransactionReverted(e)
            | ClientError::ConfirmationFailed(e) => Some(e),
            _ => None,
        }
    }

    /// Errors the browser surfaces as a blocking alert in addition to the status line.
    pub fn is_blocking(&self) -> bool {
        matches!(self, ClientError::ProviderMissing | ClientError::NetworkNotConfigured { .. })
    }

    /// Resolved locally, without any provider round trip.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::ProviderMissing
                | ClientError::NotConnected
                | ClientError::Validation(_)
                | ClientError::SubmissionInFlight(_)
        )
    }
}
