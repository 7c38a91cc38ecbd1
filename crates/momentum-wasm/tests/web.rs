//! Browser tests for the JS-facing exports.
//!
//! Run with `wasm-pack test --headless --firefox crates/momentum-wasm`.

#![cfg(target_arch = "wasm32")]

use momentum_core::{DecorationStage, ElementSpec, create_element};
use momentum_wasm::{
    WebDom, create_element_js, query_all_js, query_js, start_with_config,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, Node};

wasm_bindgen_test_configure!(run_in_browser);

fn object(pairs: &[(&str, JsValue)]) -> JsValue {
    let obj = js_sys::Object::new();
    for (key, value) in pairs {
        js_sys::Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
    }
    obj.into()
}

#[wasm_bindgen_test]
fn creates_attaches_and_decorates() {
    let result = create_element_js(
        "body".into(),
        "div".into(),
        "hello-world-class other".into(),
        "Hello World".into(),
        object(&[("id", "helloWorldIdTest".into())]),
        object(&[("color", "blue".into()), ("zIndex", JsValue::from_f64(1000.0))]),
    );
    let element: HtmlElement = result.dyn_into().expect("element returned");
    assert_eq!(element.parent_element().unwrap().tag_name(), "BODY");
    assert_eq!(element.class_name(), "hello-world-class other");
    assert_eq!(element.text_content().as_deref(), Some("Hello World"));
    assert_eq!(element.id(), "helloWorldIdTest");
    assert_eq!(element.style().get_property_value("color").unwrap(), "blue");
    assert_eq!(element.style().get_property_value("z-index").unwrap(), "1000");
    element.remove();
}

#[wasm_bindgen_test]
fn invalid_tag_returns_false() {
    let before = query_all_js("*").unwrap().length();
    let result = create_element_js(
        "body".into(),
        "not a tag".into(),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
    );
    assert_eq!(result, JsValue::FALSE);
    assert_eq!(query_all_js("*").unwrap().length(), before);
}

#[wasm_bindgen_test]
fn falsy_text_is_skipped() {
    let result = create_element_js(
        JsValue::FALSE,
        "p".into(),
        JsValue::from_f64(0.0),
        "".into(),
        JsValue::NULL,
        JsValue::FALSE,
    );
    let element: Element = result.dyn_into().unwrap();
    assert!(element.parent_node().is_none());
    assert_eq!(element.get_attribute("class"), None);
    assert_eq!(element.text_content().as_deref(), Some(""));
    assert_eq!(element.child_nodes().length(), 0);
}

#[wasm_bindgen_test]
fn invalid_locator_throws() {
    assert!(query_js("a[").is_err());
    assert!(query_all_js("").is_err());
}

#[wasm_bindgen_test]
fn decoration_error_keeps_element() {
    let mut dom = WebDom::from_window().unwrap();
    let spec = ElementSpec::new("div").attr("bad name", "1");
    let err = create_element(&mut dom, spec).unwrap_err();
    match err {
        momentum_core::CreateError::Decoration { stage, element, .. } => {
            assert_eq!(stage, DecorationStage::Attribute);
            assert_eq!(element.tag_name(), "DIV");
        }
        other => panic!("expected decoration error, got {other:?}"),
    }
}

#[wasm_bindgen_test]
fn decoration_failure_returns_false_but_keeps_attachment() {
    let result = create_element_js(
        "body".into(),
        "div".into(),
        "decoration-failure".into(),
        JsValue::UNDEFINED,
        object(&[("id", "kept".into()), ("bad name", "1".into())]),
        object(&[("color", "red".into())]),
    );
    assert_eq!(result, JsValue::FALSE);

    let found = query_all_js(".decoration-failure").unwrap();
    assert_eq!(found.length(), 1);
    let element: HtmlElement = found.get(0).dyn_into().unwrap();
    assert_eq!(element.parent_element().unwrap().tag_name(), "BODY");
    assert_eq!(element.id(), "kept");
    assert_eq!(element.style().get_property_value("color").unwrap(), "");
    element.remove();
}

#[wasm_bindgen_test]
fn element_parent_is_used_directly() {
    let dom = WebDom::from_window().unwrap();
    let list = dom.document().create_element("ul").unwrap();
    let result = create_element_js(
        list.clone().into(),
        "li".into(),
        JsValue::UNDEFINED,
        "first".into(),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
    );
    let item: Element = result.dyn_into().unwrap();
    assert_eq!(item.parent_element(), Some(list.clone()));
    assert_eq!(list.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn fragment_parent_is_accepted() {
    let dom = WebDom::from_window().unwrap();
    let fragment = dom.document().create_document_fragment();
    let result = create_element_js(
        fragment.clone().into(),
        "span".into(),
        JsValue::UNDEFINED,
        "in a fragment".into(),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
    );
    let span: Element = result.dyn_into().expect("element returned");
    let parent: Node = span.parent_node().expect("attached to the fragment");
    assert!(parent.is_same_node(Some(fragment.as_ref())));
    assert_eq!(fragment.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn non_node_parent_returns_false() {
    let result = create_element_js(
        object(&[("not", "a node".into())]),
        "div".into(),
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
        JsValue::UNDEFINED,
    );
    assert_eq!(result, JsValue::FALSE);
}

#[wasm_bindgen_test]
fn start_runs_once() {
    assert!(start_with_config("{").is_err());

    let config = r#"{
        "banner": {"class": "start-once", "attributes": [["id", "startOnce"]]},
        "readyEvent": null
    }"#;
    start_with_config(config).unwrap();
    start_with_config(config).unwrap();

    let banners = query_all_js(".start-once").unwrap();
    assert_eq!(banners.length(), 1);
    let banner: HtmlElement = banners.get(0).dyn_into().unwrap();
    assert_eq!(banner.parent_element().unwrap().tag_name(), "BODY");
    assert_eq!(banner.text_content().as_deref(), Some("Hello World"));
    assert_eq!(banner.style().get_property_value("z-index").unwrap(), "1000");
    banner.remove();
}
