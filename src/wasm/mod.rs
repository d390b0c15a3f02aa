//! WASM module: the client running in the page
//!
//! Provides AccountsApp for browser environments with:
//! - Injected wallet provider (`window.ethereum`, EIP-1193)
//! - Receipt polling on `setTimeout`
//! - DOM form reading and a single status line
//! - JS bindings via wasm-bindgen
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          AccountsApp (JS API)           │
//! │  connect, register, deposit, withdraw   │
//! │  mount (DOM listeners)                  │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │          Client (shared core)           │
//! │  validate → session → submit → report   │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │     EthereumProvider / InjectedSigner   │
//! │  request(), chainChanged, receipts      │
//! └─────────────────────────────────────────┘
//! ```

mod app;
mod dom;
mod provider;

pub use app::AccountsApp;
pub use dom::DomForm;
pub use provider::EthereumProvider;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
