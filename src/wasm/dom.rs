//! DOM adapter: form fields in, status text out.

use crate::core::fields::element;
use crate::intent::FieldSource;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

/// Reads form fields straight from the page by element id.
pub struct DomForm {
    document: Document,
}

impl DomForm {
    pub fn new(document: Document) -> Self { Self { document } }
}

impl FieldSource for DomForm {
    fn field(&self, id: &str) -> Option<String> {
        let el = self.document.get_element_by_id(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }
        el.text_content()
    }
}

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Overwrite the single status line.
pub fn set_status(document: &Document, text: &str) {
    if let Some(status) = document.get_element_by_id(element::STATUS) {
        status.set_text_content(Some(text));
    }
}

/// Disable or re-enable a form's submit control.
pub fn set_busy(document: &Document, form_id: &str, busy: bool) {
    let Some(form) = document.get_element_by_id(form_id) else { return };
    let Ok(Some(submit)) = form.query_selector("[type=submit]") else { return };
    let _ = if busy {
        submit.set_attribute("disabled", "")
    } else {
        submit.remove_attribute("disabled")
    };
}

pub fn alert(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(text);
    }
}
