//! Conversions for the loosely typed JS surface.
//!
//! The JS exports accept whatever a content script passes: strings, numbers,
//! `false`, `undefined`, plain objects. These helpers turn that into the
//! typed core API and map failures back into DOM exceptions.

use js_sys::{Array, Object};
use momentum_core::{DomError, ParentRef, supplied};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DomException, Node};

#[wasm_bindgen]
extern "C" {
    /// The global `String(value)` conversion.
    #[wasm_bindgen(js_name = String)]
    fn js_string(value: &JsValue) -> String;
}

/// `String(value)`, without a round trip for values that already are strings.
pub fn to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| js_string(value))
}

/// A falsy value means "not supplied"; anything else is string-coerced.
pub fn loose_string(value: &JsValue) -> Option<String> {
    if value.is_falsy() {
        return None;
    }
    supplied(Some(to_string(value)))
}

/// `Object.entries(value)` with both sides string-coerced. Falsy and
/// non-object values yield nothing.
pub fn entries(value: &JsValue) -> Vec<(String, String)> {
    if value.is_falsy() || !value.is_object() {
        return Vec::new();
    }
    Object::entries(value.unchecked_ref::<Object>())
        .iter()
        .filter_map(|entry| {
            let pair = entry.dyn_into::<Array>().ok()?;
            Some((to_string(&pair.get(0)), to_string(&pair.get(1))))
        })
        .collect()
}

/// A falsy parent is absent and a string is a locator. Any DOM node is used
/// as-is, so a document, fragment or shadow root works as well as an element.
pub fn parent_ref(value: &JsValue) -> Result<Option<ParentRef<Node>>, String> {
    if value.is_falsy() {
        return Ok(None);
    }
    if let Some(locator) = value.as_string() {
        return Ok(Some(ParentRef::Locator(locator)));
    }
    value
        .dyn_ref::<Node>()
        .map(|node| Some(ParentRef::Node(node.clone())))
        .ok_or_else(|| format!("parent {} is neither a locator nor a node", to_string(value)))
}

/// Wrap a thrown host value.
pub fn dom_error(value: &JsValue) -> DomError {
    match value.dyn_ref::<DomException>() {
        Some(exception) => DomError::Host {
            name: exception.name(),
            message: exception.message(),
        },
        None => DomError::Host {
            name: "Error".to_string(),
            message: to_string(value),
        },
    }
}

/// Rebuild a `DOMException` for errors that cross back into JS.
pub fn to_js_error(err: &DomError) -> JsValue {
    let (message, name) = match err {
        DomError::InvalidCharacter { .. } => (err.to_string(), "InvalidCharacterError"),
        DomError::Syntax { .. } => (err.to_string(), "SyntaxError"),
        DomError::HierarchyRequest { .. } => (err.to_string(), "HierarchyRequestError"),
        DomError::NotFound => (err.to_string(), "NotFoundError"),
        DomError::Host { name, message } => (message.clone(), name.as_str()),
    };
    DomException::new_with_message_and_name(&message, name)
        .map(JsValue::from)
        .unwrap_or_else(|_| js_sys::Error::new(&message).into())
}
