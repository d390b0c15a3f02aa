//! Outcome Reporter - every result becomes exactly one status line.
//!
//! Failure text comes from [`classify`], a best-effort match over the
//! provider's free-form error. When nothing matches, the generic prefix is
//! shown alone.

use super::submit::TxOutcome;
use crate::client::NetworkConfig;
use crate::core::fields::needle;
use crate::core::EtherAmount;
use crate::error::{ClientError, ProviderError};
use crate::intent::{Action, Intent};
use alloy_primitives::Address;
use regex::Regex;
use std::sync::OnceLock;

/// What a provider failure most likely means, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureClass {
    /// Contract-supplied rejection reason, shown verbatim.
    Reason(String),
    InsufficientFunds,
    /// Caller never registered (deposit path).
    NotRegistered,
    UserRejected,
    /// Fallback: generic prefix only.
    Unclassified,
}

fn mentions(pattern: &'static OnceLock<Option<Regex>>, source: &str, text: &str) -> bool {
    pattern
        .get_or_init(|| Regex::new(source).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

pub fn classify(action: Action, error: &ProviderError) -> FailureClass {
    classify_for(Some(action), error)
}

/// `action` is `None` when the failing form is unknown; the deposit-only
/// check is skipped then.
fn classify_for(action: Option<Action>, error: &ProviderError) -> FailureClass {
    static INSUFFICIENT_FUNDS: OnceLock<Option<Regex>> = OnceLock::new();
    static NOT_REGISTERED: OnceLock<Option<Regex>> = OnceLock::new();

    if let Some(reason) = error.reason.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        return FailureClass::Reason(reason.to_string());
    }
    if mentions(&INSUFFICIENT_FUNDS, needle::INSUFFICIENT_FUNDS, &error.message) {
        return FailureClass::InsufficientFunds;
    }
    if action == Some(Action::Deposit) && mentions(&NOT_REGISTERED, needle::NOT_REGISTERED, &error.message) {
        return FailureClass::NotRegistered;
    }
    if error.is_user_rejection() {
        return FailureClass::UserRejected;
    }
    FailureClass::Unclassified
}

/// Renders outcomes for one network's currency. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Reporter {
    symbol: String,
}

impl Reporter {
    pub fn new(network: &NetworkConfig) -> Self {
        Self { symbol: network.currency_symbol.clone() }
    }

    pub fn connected(&self, account: Address) -> String {
        format!("✅ Connected: {account}")
    }

    pub fn report(&self, outcome: &TxOutcome) -> String {
        match outcome {
            TxOutcome::Success { intent, .. } => self.success(intent),
            TxOutcome::Failure { intent, error, .. } => self.report_error(Some(intent.action()), error),
        }
    }

    pub fn report_result(&self, action: Action, result: &Result<TxOutcome, ClientError>) -> String {
        match result {
            Ok(outcome) => self.report(outcome),
            Err(error) => self.report_error(Some(action), error),
        }
    }

    /// `action` is `None` for the connect flow.
    pub fn report_error(&self, action: Option<Action>, error: &ClientError) -> String {
        match error {
            ClientError::ProviderMissing => "⚠️ Please install a browser wallet such as MetaMask to use this dApp".into(),
            ClientError::NetworkNotConfigured { name, .. } => format!("⚠️ Please add {name} to your wallet"),
            ClientError::NotConnected => "⚠️ Connect wallet first".into(),
            ClientError::Validation(e) => format!("⚠️ {e}"),
            ClientError::SubmissionInFlight(a) => format!("⏳ A {} is already in progress", a.noun()),
            ClientError::Session(e) => {
                let detail = match e.reason.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
                    Some(reason) => Some(reason.to_string()),
                    None if e.is_user_rejection() => Some("Rejected in wallet".into()),
                    None => None,
                };
                with_detail("❌ Wallet connection failed".into(), detail)
            }
            ClientError::TransactionRejected(e)
            | ClientError::TransactionReverted(e)
            | ClientError::ConfirmationFailed(e) => {
                let prefix = match action {
                    Some(action) => format!("❌ {} failed", capitalize(action.noun())),
                    None => "❌ Transaction failed".into(),
                };
                with_detail(prefix, self.failure_detail(action, e))
            }
        }
    }

    fn success(&self, intent: &Intent) -> String {
        let symbol = &self.symbol;
        match intent {
            Intent::Register(r) => format!("✅ Registered {} (age {}, married: {})", r.name, r.age, r.married),
            Intent::Deposit(amount) => format!("💰 Deposited {amount} {symbol}"),
            Intent::Withdraw(amount) => {
                format!("💸 Withdrawal of {amount} {symbol} confirmed (contract fee deducted on-chain)")
            }
        }
    }

    fn failure_detail(&self, action: Option<Action>, error: &ProviderError) -> Option<String> {
        let symbol = &self.symbol;
        match classify_for(action, error) {
            FailureClass::Reason(reason) => Some(reason),
            FailureClass::InsufficientFunds if action == Some(Action::Register) => {
                let fee = EtherAmount::registration_fee();
                Some(format!("Insufficient {symbol} for {fee} {symbol} fee"))
            }
            FailureClass::InsufficientFunds => Some(format!("Insufficient {symbol}")),
            FailureClass::NotRegistered => Some("Register first".into()),
            FailureClass::UserRejected => Some("Rejected in wallet".into()),
            FailureClass::Unclassified => None,
        }
    }
}

fn with_detail(prefix: String, detail: Option<String>) -> String {
    match detail {
        Some(detail) => format!("{prefix}: {detail}"),
        None => prefix,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Registration;
    use crate::wallet::Confirmation;
    use alloy_primitives::B256;

    fn reporter() -> Reporter {
        Reporter::new(&NetworkConfig::default())
    }

    fn amount(text: &str) -> EtherAmount {
        EtherAmount::parse(text).expect("amount")
    }

    fn confirmed(intent: Intent) -> TxOutcome {
        TxOutcome::Success {
            intent,
            confirmation: Confirmation { tx_hash: B256::repeat_byte(1), block_number: Some(1), success: true },
        }
    }

    fn failed(intent: Intent, error: ClientError) -> TxOutcome {
        TxOutcome::Failure { intent, error, tx_hash: None }
    }

    #[test]
    fn registration_success_echoes_inputs() {
        let intent = Intent::Register(Registration { name: "Alice".into(), age: 30, married: true });
        let text = reporter().report(&confirmed(intent));
        assert_eq!(text, "✅ Registered Alice (age 30, married: true)");
    }

    #[test]
    fn withdraw_success_reports_requested_amount_only() {
        let text = reporter().report(&confirmed(Intent::Withdraw(amount("2"))));
        assert!(text.contains("2 MON"));
        assert!(!text.contains("1.96"));
    }

    #[test]
    fn reason_wins_over_message_heuristics() {
        let err = ProviderError::new("insufficient funds").with_reason("Fee must be 0.5");
        assert_eq!(classify(Action::Register, &err), FailureClass::Reason("Fee must be 0.5".into()));
        let text = reporter().report(&failed(
            Intent::Deposit(amount("1")),
            ClientError::TransactionRejected(err),
        ));
        assert_eq!(text, "❌ Deposit failed: Fee must be 0.5");
    }

    #[test]
    fn insufficient_funds_mentions_fee_on_register() {
        let err = ProviderError::new("err: insufficient funds for gas * price + value");
        let intent = Intent::Register(Registration { name: "Bob".into(), age: 40, married: false });
        let text = reporter().report(&failed(intent, ClientError::TransactionRejected(err.clone())));
        assert_eq!(text, "❌ Registration failed: Insufficient MON for 0.5 MON fee");

        let text = reporter().report(&failed(Intent::Withdraw(amount("1")), ClientError::TransactionRejected(err)));
        assert_eq!(text, "❌ Withdrawal failed: Insufficient MON");
    }

    #[test]
    fn unregistered_only_classified_on_deposit() {
        let err = ProviderError::new("execution failed: User not registered");
        assert_eq!(classify(Action::Deposit, &err), FailureClass::NotRegistered);
        assert_eq!(classify(Action::Withdraw, &err), FailureClass::Unclassified);
    }

    #[test]
    fn unmatched_errors_fall_back_to_prefix() {
        let err = ProviderError::new("something odd happened");
        let text = reporter().report(&failed(Intent::Deposit(amount("1")), ClientError::ConfirmationFailed(err)));
        assert_eq!(text, "❌ Deposit failed");
    }

    #[test]
    fn local_errors_have_fixed_text() {
        let r = reporter();
        assert_eq!(r.report_error(Some(Action::Deposit), &ClientError::NotConnected), "⚠️ Connect wallet first");
        assert!(r.report_error(None, &ClientError::ProviderMissing).contains("install"));
        let err = ClientError::NetworkNotConfigured { chain_id: 10143, name: "Monad Testnet".into() };
        assert_eq!(r.report_error(None, &err), "⚠️ Please add Monad Testnet to your wallet");
    }

    #[test]
    fn transaction_error_without_action_is_not_labelled_registration() {
        let r = reporter();
        let rejected = ClientError::TransactionRejected(ProviderError::new("boom"));
        assert_eq!(r.report_error(None, &rejected), "❌ Transaction failed");

        let broke = ClientError::TransactionRejected(ProviderError::new("insufficient funds for gas"));
        assert_eq!(r.report_error(None, &broke), "❌ Transaction failed: Insufficient MON");

        let unregistered = ClientError::ConfirmationFailed(ProviderError::new("User not registered"));
        assert_eq!(r.report_error(None, &unregistered), "❌ Transaction failed");
    }

    #[test]
    fn session_errors_hide_raw_text() {
        let err = ClientError::Session(ProviderError::new("internal JSON-RPC error 0xdeadbeef"));
        assert_eq!(reporter().report_error(None, &err), "❌ Wallet connection failed");
    }

    #[test]
    fn report_is_pure() {
        let outcome = failed(
            Intent::Deposit(amount("1.5")),
            ClientError::TransactionRejected(ProviderError::new("User not registered")),
        );
        let r = reporter();
        assert_eq!(r.report(&outcome), r.report(&outcome));
    }
}
