//! Identifier constants shared by the workflow and the browser layer
//!
//! Centralized registry for DOM ids, wallet RPC methods, provider error
//! codes and the contract's fixed values.

/// DOM form field ids
pub mod form {
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const MARRIED: &str = "married";
    pub const AMOUNT: &str = "amount";
    pub const WITHDRAW_AMOUNT: &str = "withdrawAmount";
}

/// DOM element ids for the page shell
pub mod element {
    pub const STATUS: &str = "status";
    pub const CONNECT_BUTTON: &str = "connectBtn";
    pub const REGISTER_FORM: &str = "registerForm";
    pub const DEPOSIT_FORM: &str = "depositForm";
    pub const WITHDRAW_FORM: &str = "withdrawForm";
}

/// EIP-1193 request methods and events
pub mod rpc {
    pub const SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const CHAIN_ID: &str = "eth_chainId";
    pub const SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";

    pub const CHAIN_CHANGED: &str = "chainChanged";
    pub const ACCOUNTS_CHANGED: &str = "accountsChanged";
}

/// Provider error codes (EIP-1193 / MetaMask)
pub mod code {
    /// User rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
}

/// Contract-level constants this client must satisfy
pub mod contract {
    /// Payment attached to every registration, in wei (0.5 of the native currency).
    pub const REGISTRATION_FEE_WEI: u64 = 500_000_000_000_000_000;
    pub const MAX_NAME_CHARS: usize = 32;
    pub const MIN_AGE: i64 = 1;
    pub const MAX_AGE: i64 = 150;
}

/// Patterns the outcome classifier looks for in provider messages
pub mod needle {
    pub const INSUFFICIENT_FUNDS: &str = r"(?i)insufficient funds";
    pub const NOT_REGISTERED: &str = r"(?i)user not registered";
    /// Plain substring; some wallets report 4902 only in the message.
    pub const UNRECOGNIZED_CHAIN: &str = "Unrecognized chain ID";
}
