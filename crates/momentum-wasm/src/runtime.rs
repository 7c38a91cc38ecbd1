//! [`ResourceHost`] over the WebExtension runtime.
//!
//! Resolves bundled files with `runtime.getURL` (the `browser` namespace,
//! falling back to `chrome`) and fetches them with the window's `fetch`.

use crate::convert;
use js_sys::{Function, Reflect};
use momentum_core::{BootstrapError, ResourceHost};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

const NAMESPACES: [&str; 2] = ["browser", "chrome"];

pub struct ExtensionRuntime {
    runtime: JsValue,
}

impl ExtensionRuntime {
    /// The first `<namespace>.runtime` object present on the global scope.
    pub fn detect() -> Option<Self> {
        let global = js_sys::global();
        NAMESPACES.iter().find_map(|namespace| {
            let api = Reflect::get(&global, &JsValue::from_str(namespace)).ok()?;
            if !api.is_object() {
                return None;
            }
            let runtime = Reflect::get(&api, &JsValue::from_str("runtime")).ok()?;
            runtime.is_object().then_some(Self { runtime })
        })
    }
}

impl ResourceHost for ExtensionRuntime {
    fn resource_url(&self, path: &str) -> Result<String, BootstrapError> {
        let failed = |message: String| BootstrapError::ResolveUrl {
            path: path.to_string(),
            message,
        };
        let get_url = Reflect::get(&self.runtime, &JsValue::from_str("getURL"))
            .map_err(|e| failed(convert::to_string(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| failed("runtime.getURL is not a function".to_string()))?;
        get_url
            .call1(&self.runtime, &JsValue::from_str(path))
            .map_err(|e| failed(convert::to_string(&e)))?
            .as_string()
            .ok_or_else(|| failed("runtime.getURL returned a non-string".to_string()))
    }

    async fn fetch_text(&self, url: &str) -> Result<String, BootstrapError> {
        let failed = |message: String| BootstrapError::Fetch {
            url: url.to_string(),
            message,
        };
        let window = web_sys::window().ok_or_else(|| failed("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| failed(convert::to_string(&e)))?
            .dyn_into()
            .map_err(|_| failed("fetch resolved to a non-Response".to_string()))?;
        if !response.ok() {
            return Err(BootstrapError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        let body = response.text().map_err(|e| failed(convert::to_string(&e)))?;
        JsFuture::from(body)
            .await
            .map_err(|e| failed(convert::to_string(&e)))?
            .as_string()
            .ok_or_else(|| failed("response body is not text".to_string()))
    }
}
