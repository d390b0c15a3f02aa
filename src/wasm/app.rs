//! AccountsApp: the page's entry point, exposed to JavaScript via wasm-bindgen
//!
//! Either call the async methods directly, or `mount()` to wire the page's
//! `connectBtn`, `registerForm`, `depositForm` and `withdrawForm` elements.
//! Every call also writes its result to the `status` element.

use super::dom::{self, DomForm};
use super::log;
use super::provider::{parse_addresses, EthereumProvider};
use crate::client::{parse_chain_id, Client, ClientConfig};
use crate::core::fields::{element, form, rpc};
use crate::error::ClientError;
use crate::intent::Action;
use crate::wallet::WalletProvider;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

fn js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Browser-side wallet client with JS bindings
#[wasm_bindgen]
pub struct AccountsApp {
    client: Rc<Client>,
    subscribed: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl AccountsApp {
    /// `config` is a plain object: `{ contractAddress, network?: { chainId, name, currencySymbol }, confirmationPollMs? }`
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<AccountsApp, JsValue> {
        let config: ClientConfig = serde_wasm_bindgen::from_value(config).map_err(js_error)?;
        let client = Client::new(config).map_err(js_error)?;
        log!(
            "[AccountsApp] contract {} on {} ({})",
            client.config().contract_address,
            client.config().network.name,
            client.config().network.chain_id_hex()
        );
        Ok(Self { client: Rc::new(client), subscribed: Rc::new(Cell::new(false)) })
    }

    /// Connect the wallet and switch to the required network.
    #[wasm_bindgen]
    pub async fn connect(&self) -> String {
        run_connect(self.client.clone(), self.subscribed.clone()).await
    }

    #[wasm_bindgen]
    pub async fn register(&self, name: String, age: String, married: bool) -> String {
        let married = if married { "true" } else { "false" };
        let fields = [(form::NAME, name.as_str()), (form::AGE, age.as_str()), (form::MARRIED, married)];
        let status = self.client.handle(Action::Register, &fields[..]).await;
        show(&status);
        status
    }

    #[wasm_bindgen]
    pub async fn deposit(&self, amount: String) -> String {
        let fields = [(form::AMOUNT, amount.as_str())];
        let status = self.client.handle(Action::Deposit, &fields[..]).await;
        show(&status);
        status
    }

    #[wasm_bindgen]
    pub async fn withdraw(&self, amount: String) -> String {
        let fields = [(form::WITHDRAW_AMOUNT, amount.as_str())];
        let status = self.client.handle(Action::Withdraw, &fields[..]).await;
        show(&status);
        status
    }

    #[wasm_bindgen(js_name = "connectedAddress")]
    pub fn connected_address(&self) -> Option<String> {
        self.client.connected_address().map(|a| a.to_string())
    }

    #[wasm_bindgen]
    pub fn disconnect(&self) {
        self.client.sessions().disconnect();
    }

    /// Attach listeners to the page's connect button and the three forms.
    #[wasm_bindgen]
    pub fn mount(&self) -> Result<(), JsValue> {
        let document = dom::document().ok_or_else(|| js_error("no document"))?;

        if let Some(button) = document.get_element_by_id(element::CONNECT_BUTTON) {
            let (client, subscribed) = (self.client.clone(), self.subscribed.clone());
            let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                let (client, subscribed) = (client.clone(), subscribed.clone());
                spawn_local(async move {
                    run_connect(client, subscribed).await;
                });
            });
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        for action in Action::ALL {
            let Some(form_el) = document.get_element_by_id(action.form_id()) else {
                log!("[AccountsApp] no #{} on page, skipping", action.form_id());
                continue;
            };
            let (client, document) = (self.client.clone(), document.clone());
            let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let (client, document) = (client.clone(), document.clone());
                spawn_local(async move {
                    dom::set_busy(&document, action.form_id(), true);
                    let status = client.handle(action, &DomForm::new(document.clone())).await;
                    dom::set_status(&document, &status);
                    dom::set_busy(&document, action.form_id(), false);
                });
            });
            form_el.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
            on_submit.forget();
        }
        log!("[AccountsApp] mounted");
        Ok(())
    }
}

async fn run_connect(client: Rc<Client>, subscribed: Rc<Cell<bool>>) -> String {
    let provider = EthereumProvider::detect(client.config().confirmation_poll_ms);
    let result = client.connect(provider.as_ref().map(|p| p as &dyn WalletProvider)).await;
    let status = match &result {
        Ok(account) => client.reporter().connected(*account),
        Err(e) => {
            log!("[AccountsApp] connect failed: {}", e);
            let status = client.reporter().report_error(None, e);
            if e.is_blocking() {
                dom::alert(&status);
            }
            status
        }
    };
    if let (Ok(_), Some(provider)) = (&result, &provider) {
        if !subscribed.get() {
            match subscribe(&client, provider) {
                Ok(()) => subscribed.set(true),
                Err(e) => log!("[AccountsApp] wallet events unavailable: {:?}", e),
            }
        }
    }
    show(&status);
    status
}

/// Keep the session honest when the user switches chain or account in the wallet.
fn subscribe(client: &Rc<Client>, provider: &EthereumProvider) -> Result<(), JsValue> {
    let c = client.clone();
    let on_chain = Closure::<dyn FnMut(JsValue)>::new(move |chain: JsValue| {
        if let Some(chain_id) = chain.as_string().and_then(|s| parse_chain_id(&s).ok()) {
            c.sessions().on_chain_changed(chain_id);
            report_if_dropped(&c);
        }
    });
    provider.on(rpc::CHAIN_CHANGED, on_chain.as_ref().unchecked_ref())?;
    on_chain.forget();

    let c = client.clone();
    let on_accounts = Closure::<dyn FnMut(JsValue)>::new(move |accounts: JsValue| {
        let accounts = serde_wasm_bindgen::from_value::<serde_json::Value>(accounts)
            .map_err(|e| e.to_string())
            .and_then(|v| parse_addresses(v).map_err(|e| e.to_string()));
        match accounts {
            Ok(accounts) => {
                c.sessions().on_accounts_changed(&accounts);
                report_if_dropped(&c);
            }
            Err(e) => log!("[AccountsApp] bad accountsChanged payload: {}", e),
        }
    });
    provider.on(rpc::ACCOUNTS_CHANGED, on_accounts.as_ref().unchecked_ref())?;
    on_accounts.forget();
    Ok(())
}

fn report_if_dropped(client: &Client) {
    if client.connected_address().is_none() {
        show(&client.reporter().report_error(None, &ClientError::NotConnected));
    }
}

fn show(status: &str) {
    if let Some(document) = dom::document() {
        dom::set_status(&document, status);
    }
}
