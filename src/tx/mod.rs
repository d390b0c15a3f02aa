//! Transactions - contract binding, submission, and outcome reporting
//!
//! ```text
//! Intent ──► ContractBinding::request ──► TxRequest
//!                                            │
//!                Session.signer ◄────────────┘
//!                   │ send_transaction   (TransactionRejected)
//!                   │ wait_for_confirmation (TransactionReverted / ConfirmationFailed)
//!                   ▼
//!               TxOutcome ──► Reporter ──► status line
//! ```

mod contract;
mod report;
mod submit;

pub use contract::{ContractBinding, IAccounts, TxRequest};
pub use report::{classify, FailureClass, Reporter};
pub use submit::{OutcomeKind, Submitter, TxOutcome};
