//! Injected wallet provider (`window.ethereum`) over EIP-1193 `request()`.

use crate::client::parse_chain_id;
use crate::core::fields::rpc;
use crate::error::ProviderError;
use crate::tx::TxRequest;
use crate::wallet::{Confirmation, TransactionSigner, WalletProvider};
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Handle to the wallet extension's provider object.
#[derive(Clone)]
pub struct EthereumProvider {
    ethereum: JsValue,
    poll_interval_ms: u64,
}

impl EthereumProvider {
    /// `None` when no wallet extension injected `window.ethereum`.
    pub fn detect(poll_interval_ms: u64) -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { ethereum, poll_interval_ms })
    }

    /// `ethereum.request({ method, params })`
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let request: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::new("provider has no request()"))?;
        let args = to_js(&json!({ "method": method, "params": params }))?;
        let promise: Promise = request
            .call1(&self.ethereum, &args)
            .map_err(provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::new("request() did not return a promise"))?;
        let result = JsFuture::from(promise).await.map_err(provider_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| ProviderError::new(e.to_string()))
    }

    /// Subscribe to a provider event (`chainChanged`, `accountsChanged`).
    pub fn on(&self, event: &str, handler: &Function) -> Result<(), JsValue> {
        let on: Function = Reflect::get(&self.ethereum, &JsValue::from_str("on"))?.dyn_into()?;
        on.call2(&self.ethereum, &JsValue::from_str(event), handler)?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl WalletProvider for EthereumProvider {
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        self.request(rpc::SWITCH_CHAIN, json!([{ "chainId": format!("0x{chain_id:x}") }]))
            .await
            .map(|_| ())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let accounts = self.request(rpc::REQUEST_ACCOUNTS, json!([])).await?;
        parse_addresses(accounts)
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let chain = self.request(rpc::CHAIN_ID, json!([])).await?;
        let chain = chain.as_str().ok_or_else(|| ProviderError::new("eth_chainId: expected a string"))?;
        parse_chain_id(chain).map_err(|e| ProviderError::new(e.to_string()))
    }

    fn signer(&self, account: Address) -> Rc<dyn TransactionSigner> {
        Rc::new(InjectedSigner { provider: self.clone(), account })
    }
}

/// Signs through the wallet extension for one authorized account.
struct InjectedSigner {
    provider: EthereumProvider,
    account: Address,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    status: Option<String>,
    block_number: Option<String>,
}

#[async_trait(?Send)]
impl TransactionSigner for InjectedSigner {
    fn account(&self) -> Address { self.account }

    async fn send_transaction(&self, request: &TxRequest) -> Result<TxHash, ProviderError> {
        let hash = self
            .provider
            .request(rpc::SEND_TRANSACTION, json!([request.to_rpc_params()]))
            .await?;
        hash.as_str()
            .ok_or_else(|| ProviderError::new("eth_sendTransaction: expected a hash"))?
            .parse()
            .map_err(|e| ProviderError::new(format!("eth_sendTransaction: {e}")))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<Confirmation, ProviderError> {
        let hash = format!("0x{}", hex::encode(tx_hash));
        loop {
            let receipt = self.provider.request(rpc::TRANSACTION_RECEIPT, json!([hash])).await?;
            if !receipt.is_null() {
                let receipt: RpcReceipt = serde_json::from_value(receipt)
                    .map_err(|e| ProviderError::new(format!("receipt: {e}")))?;
                return Ok(Confirmation {
                    tx_hash,
                    block_number: receipt.block_number.as_deref().and_then(parse_quantity),
                    success: receipt.status.as_deref().map_or(true, |s| s != "0x0"),
                });
            }
            sleep(self.provider.poll_interval_ms).await;
        }
    }
}

pub(crate) fn parse_addresses(value: Value) -> Result<Vec<Address>, ProviderError> {
    let raw: Vec<String> = serde_json::from_value(value).map_err(|e| ProviderError::new(format!("accounts: {e}")))?;
    raw.iter()
        .map(|a| a.parse().map_err(|e| ProviderError::new(format!("account {a}: {e}"))))
        .collect()
}

fn parse_quantity(value: &str) -> Option<u64> {
    u64::from_str_radix(value.trim_start_matches("0x"), 16).ok()
}

fn to_js(value: &Value) -> Result<JsValue, ProviderError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| ProviderError::new(e.to_string()))
}

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Flatten a thrown provider error into a [`ProviderError`].
///
/// `Error` instances keep `message` off their enumerable properties, so the
/// known keys are copied out one by one before decoding.
pub(crate) fn provider_error(err: JsValue) -> ProviderError {
    if let Some(text) = err.as_string() {
        return ProviderError::from_rpc_object(&Value::String(text));
    }
    let mut object = serde_json::Map::new();
    for key in ["code", "message", "reason", "data"] {
        if let Some(value) = get(&err, key).and_then(|v| serde_wasm_bindgen::from_value::<Value>(v).ok()) {
            object.insert(key.to_string(), value);
        }
    }
    ProviderError::from_rpc_object(&Value::Object(object))
}

async fn sleep(ms: u64) {
    let ms = ms.min(i32::MAX as u64) as i32;
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|w| w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms).is_ok())
            .unwrap_or(false);
        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}
