//! Monad Accounts: browser wallet client for the accounts contract.
//!
//! # Architecture
//!
//! ```text
//! user action (form submit / connect click)
//!   │
//!   ├── intent::validate      pure checks, no network      → ValidationError
//!   │
//!   ├── wallet::SessionManager
//!   │     └── active session on the required chain?        → NotConnected
//!   │
//!   ├── tx::Submitter
//!   │     ├── broadcast (signer.send_transaction)          → TransactionRejected
//!   │     └── confirm   (signer.wait_for_confirmation)     → TransactionReverted
//!   │                                                        / ConfirmationFailed
//!   └── tx::Reporter      exactly one status line per attempt
//! ```
//!
//! # Operations
//!
//! | Action | Contract call | Payment |
//! |--------|---------------|---------|
//! | register | `setUserInfo(age, name, married)` | fixed 0.5 |
//! | deposit | `makeDeposit()` | user amount |
//! | withdraw | `withdrawMyBalance(amount)` | none |
//!
//! # Features
//!
//! - `native` - structured logging to stderr, env configuration
//! - `wasm` - injected wallet provider, DOM wiring, wasm-bindgen exports
//!
//! # Usage
//!
//! ```ignore
//! use monad_accounts::{Action, Client, ClientConfig};
//!
//! let client = Client::new(ClientConfig::new(contract))?;
//! let status = client.connect_status(Some(&provider)).await;
//! let status = client.handle(Action::Deposit, &[("amount", "1.5")][..]).await;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod client;
pub mod core;
pub mod error;
pub mod intent;
pub mod tx;
pub mod wallet;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use client::{Client, ClientConfig, ConfigError, NetworkConfig};
pub use core::EtherAmount;
pub use error::{ClientError, ProviderError};
pub use intent::{Action, FieldSource, Intent, Registration, ValidationError};
pub use tx::{classify, ContractBinding, FailureClass, OutcomeKind, Reporter, Submitter, TxOutcome, TxRequest};
pub use wallet::{Confirmation, Session, SessionManager, TransactionSigner, WalletProvider};

#[cfg(feature = "native")]
pub use logging::init_logging;

#[cfg(feature = "wasm")]
pub use wasm::AccountsApp;
