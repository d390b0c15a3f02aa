//! Wallet module - session over an injected EIP-1193 provider
//!
//! # Architecture
//!
//! ```text
//! SessionManager::connect(provider)
//!     │
//!     ├── wallet_switchEthereumChain ──► 4902 → NetworkNotConfigured (halt)
//!     │                              └─► other → Session(error)
//!     ├── eth_requestAccounts
//!     ├── eth_chainId (must equal the required chain)
//!     │
//!     └── Session { account, chain_id, signer }
//!                                        │
//!                                        ▼
//!                              TransactionSigner
//!                       send_transaction → wait_for_confirmation
//! ```
//!
//! At most one session exists. Chain or account changes reported by the
//! wallet end it; submissions without one fail with `NotConnected`.

mod provider;
mod session;

pub use provider::{Confirmation, TransactionSigner, WalletProvider};
pub use session::{Session, SessionManager};
