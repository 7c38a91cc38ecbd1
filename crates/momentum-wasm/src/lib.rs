//! WASM content script: exposes the Momentum core to the extension.
//!
//! Compiled via `wasm-pack build --target web` and loaded by a small content
//! script loader that calls `start()` (or `startWithConfig(json)`) once the
//! module is initialised.

mod convert;
pub mod dom;
pub mod runtime;

pub use dom::WebDom;
pub use runtime::ExtensionRuntime;

use js_sys::Array;
use log::LevelFilter;
use momentum_core::{
    BannerConfig, Config, ElementSpec, Prompts, bootstrap, by_id, create_element, query,
    query_all,
};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use web_sys::Element;

static STARTED: AtomicBool = AtomicBool::new(false);

// ─── DOM helpers ─────────────────────────────────────────────────────────

/// `createElement(parent, tag, classNames?, text?, attributes?, styles?)`.
///
/// Returns the new element, or `false` if it could not be constructed or
/// decorated. Falsy `classNames` / `text` are skipped; attribute and style
/// values are string-coerced; style keys may be camelCase.
#[wasm_bindgen(js_name = createElement)]
pub fn create_element_js(
    parent: JsValue,
    tag: JsValue,
    class_names: JsValue,
    text: JsValue,
    attributes: JsValue,
    styles: JsValue,
) -> JsValue {
    init_logging();
    let Some(mut dom) = WebDom::from_window() else {
        return JsValue::FALSE;
    };
    let parent = match convert::parent_ref(&parent) {
        Ok(parent) => parent,
        Err(message) => {
            log::error!("createElement: {message}");
            return JsValue::FALSE;
        }
    };

    let mut spec = ElementSpec::new(convert::to_string(&tag))
        .maybe_class(convert::loose_string(&class_names))
        .maybe_text(convert::loose_string(&text))
        .attrs(convert::entries(&attributes))
        .styles(convert::entries(&styles));
    spec.parent = parent;

    match create_element(&mut dom, spec) {
        Ok(element) => element.into(),
        Err(_) => JsValue::FALSE,
    }
}

/// `I(id)`: element by identifier.
#[wasm_bindgen(js_name = I)]
pub fn by_id_js(id: &str) -> Option<Element> {
    init_logging();
    WebDom::from_window().and_then(|dom| by_id(&dom, id))
}

/// `Q(locator)`: first match, or `null`. Throws on invalid syntax.
#[wasm_bindgen(js_name = Q)]
pub fn query_js(locator: &str) -> Result<Option<Element>, JsValue> {
    let dom = web_dom()?;
    query(&dom, locator).map_err(|e| convert::to_js_error(&e))
}

/// `A(locator)`: static array of every match. Throws on invalid syntax.
#[wasm_bindgen(js_name = A)]
pub fn query_all_js(locator: &str) -> Result<Array, JsValue> {
    let dom = web_dom()?;
    query_all(&dom, locator)
        .map(|nodes| nodes.into_iter().collect())
        .map_err(|e| convert::to_js_error(&e))
}

fn web_dom() -> Result<WebDom, JsValue> {
    init_logging();
    WebDom::from_window().ok_or_else(|| js_sys::Error::new("no document available").into())
}

// ─── Startup ─────────────────────────────────────────────────────────────

/// Start the content script with the default configuration.
#[wasm_bindgen]
pub fn start() {
    launch(Config::default());
}

/// Start the content script with a JSON configuration.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config =
        Config::from_json(json).map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    launch(config);
    Ok(())
}

fn launch(config: Config) {
    init_logging();
    log::set_max_level(config.level_filter());

    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("content script already started");
        return;
    }

    if let Some(banner) = &config.banner {
        show_banner(banner);
    }

    let Some(runtime) = ExtensionRuntime::detect() else {
        log::error!(
            "Error loading {}: extension runtime unavailable",
            config.resource_path
        );
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        let ready_event = config.ready_event.as_deref();
        bootstrap(&runtime, &config.resource_path, |prompts| {
            page_is_ready(&prompts, ready_event)
        })
        .await;
    });
}

fn show_banner(banner: &BannerConfig) {
    let Some(mut dom) = WebDom::from_window() else {
        log::warn!("no document; banner skipped");
        return;
    };
    if let Err(err) = create_element(&mut dom, banner.to_spec())
        && err.is_construction()
    {
        log::warn!("banner skipped: {err}");
    }
}

/// Readiness: hand the loaded prompts to the page as a DOM event.
fn page_is_ready(prompts: &Prompts, event: Option<&str>) {
    let Some(name) = event else {
        return;
    };
    match dispatch_ready(name, prompts) {
        Ok(_) => log::debug!("dispatched {name}"),
        Err(err) => log::error!("cannot dispatch {name}: {}", convert::to_string(&err)),
    }
}

fn dispatch_ready(name: &str, prompts: &Prompts) -> Result<bool, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let json = serde_json::to_string(prompts).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let detail = js_sys::JSON::parse(&json)?;

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    let event = web_sys::CustomEvent::new_with_event_init_dict(name, &init)?;
    document.dispatch_event(&event)
}

// ─── Logging and panic hook ──────────────────────────────────────────────

/// Route `log` records and panics to the browser console.
///
/// Runs once per module instance, from whichever export is called first, so
/// `createElement` failures are visible even before `start`. The level stays
/// at `info` until a config overrides it.
fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let msg = format!("Momentum WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
                previous(info);
            }));
        }
        wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
        log::set_max_level(LevelFilter::Info);
    });
}
