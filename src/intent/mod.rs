//! Intents - validated, immutable descriptions of one requested on-chain action
//!
//! ```text
//! raw form fields ──► validate ──► Intent ──► Submitter (consumed once)
//!                         │
//!                         └──► ValidationError (workflow halts, no network)
//! ```

mod validate;

pub use validate::{validate, validate_amount, validate_registration, FieldSource, ValidationError};

use crate::core::fields::element;
use crate::core::EtherAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three user-facing operations, one per form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Register,
    Deposit,
    Withdraw,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Register, Action::Deposit, Action::Withdraw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Register => "register",
            Action::Deposit => "deposit",
            Action::Withdraw => "withdraw",
        }
    }

    /// Word used in user-facing messages ("Registration failed", "valid withdrawal amount").
    pub fn noun(&self) -> &'static str {
        match self {
            Action::Register => "registration",
            Action::Deposit => "deposit",
            Action::Withdraw => "withdrawal",
        }
    }

    /// DOM id of the form that triggers this action.
    pub fn form_id(&self) -> &'static str {
        match self {
            Action::Register => element::REGISTER_FORM,
            Action::Deposit => element::DEPOSIT_FORM,
            Action::Withdraw => element::WITHDRAW_FORM,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub age: u8,
    pub married: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Register(Registration),
    /// Amount attached as payment.
    Deposit(EtherAmount),
    /// Amount passed as an argument; the contract deducts its own fee.
    Withdraw(EtherAmount),
}

impl Intent {
    pub fn action(&self) -> Action {
        match self {
            Intent::Register(_) => Action::Register,
            Intent::Deposit(_) => Action::Deposit,
            Intent::Withdraw(_) => Action::Withdraw,
        }
    }
}
