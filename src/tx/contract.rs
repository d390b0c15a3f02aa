//! Contract binding: ABI encoding for the accounts contract's three entry points.

use crate::core::EtherAmount;
use crate::intent::Intent;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use serde_json::{json, Value};

sol! {
    interface IAccounts {
        function setUserInfo(uint256 age, string name, bool married) external payable;
        function makeDeposit() external payable;
        function withdrawMyBalance(uint256 amount) external;
    }
}

/// An unsigned contract call, ready for `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl TxRequest {
    /// JSON-RPC transaction object (hex quantities, 0x-prefixed calldata).
    pub fn to_rpc_params(&self) -> Value {
        json!({
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "value": format!("0x{:x}", self.value),
            "data": format!("0x{}", hex::encode(&self.data)),
        })
    }
}

/// The fixed on-chain contract this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractBinding {
    address: Address,
}

impl ContractBinding {
    pub fn new(address: Address) -> Self { Self { address } }

    pub fn address(&self) -> Address { self.address }

    /// Build the call for an intent sent from `from`.
    ///
    /// Register attaches the fixed fee; Deposit attaches the amount;
    /// Withdraw passes the amount as an argument with no payment.
    pub fn request(&self, from: Address, intent: &Intent) -> TxRequest {
        let (value, data) = match intent {
            Intent::Register(r) => (
                EtherAmount::registration_fee().wei(),
                IAccounts::setUserInfoCall { age: U256::from(r.age), name: r.name.clone(), married: r.married }
                    .abi_encode(),
            ),
            Intent::Deposit(amount) => (amount.wei(), IAccounts::makeDepositCall {}.abi_encode()),
            Intent::Withdraw(amount) => (
                U256::ZERO,
                IAccounts::withdrawMyBalanceCall { amount: amount.wei() }.abi_encode(),
            ),
        };
        TxRequest { from, to: self.address, value, data: Bytes::from(data) }
    }
}
