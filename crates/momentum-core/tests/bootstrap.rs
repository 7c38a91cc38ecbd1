//! Integration tests: prompts bootstrap against a scripted extension host.

use futures::executor::block_on;
use momentum_core::{BootstrapError, Prompts, ResourceHost, bootstrap, load_prompts};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::{Cell, RefCell};

/// Resolves `path` under a fake extension origin and serves a canned body.
struct ScriptedHost {
    body: Result<String, String>,
    requested: RefCell<Vec<String>>,
}

impl ScriptedHost {
    fn serving(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
            requested: RefCell::new(Vec::new()),
        }
    }

    fn rejecting(message: &str) -> Self {
        Self {
            body: Err(message.to_string()),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl ResourceHost for ScriptedHost {
    fn resource_url(&self, path: &str) -> Result<String, BootstrapError> {
        Ok(format!("moz-extension://test-id/{path}"))
    }

    async fn fetch_text(&self, url: &str) -> Result<String, BootstrapError> {
        self.requested.borrow_mut().push(url.to_string());
        self.body.clone().map_err(|message| BootstrapError::Fetch {
            url: url.to_string(),
            message,
        })
    }
}

/// A runtime without `getURL` support.
struct NoRuntime;

impl ResourceHost for NoRuntime {
    fn resource_url(&self, path: &str) -> Result<String, BootstrapError> {
        Err(BootstrapError::ResolveUrl {
            path: path.to_string(),
            message: "runtime.getURL is not available".into(),
        })
    }

    async fn fetch_text(&self, _url: &str) -> Result<String, BootstrapError> {
        unreachable!("fetch must not run without a URL")
    }
}

#[test]
fn load_resolves_then_fetches_once() {
    let host = ScriptedHost::serving(r#"{"summarize": "Summarize this page"}"#);
    let prompts = block_on(load_prompts(&host, "prompts.json")).unwrap();

    assert_eq!(prompts.get("summarize"), Some(&json!("Summarize this page")));
    assert_eq!(
        *host.requested.borrow(),
        vec!["moz-extension://test-id/prompts.json".to_string()]
    );
}

#[test]
fn any_json_value_is_accepted() {
    for body in ["[1, 2]", "\"text\"", "42", "null"] {
        let host = ScriptedHost::serving(body);
        let prompts = block_on(load_prompts(&host, "prompts.json")).unwrap();
        let expected: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(prompts.value(), &expected);
        assert_eq!(prompts, Prompts::new(expected));
    }
}

#[test]
fn ready_runs_exactly_once_with_loaded_value() {
    let host = ScriptedHost::serving(r#"[{"name": "a"}, {"name": "b"}]"#);
    let calls = Cell::new(0);
    let seen = block_on(bootstrap(&host, "prompts.json", |prompts| {
        calls.set(calls.get() + 1);
        assert_eq!(prompts.len(), 2);
        prompts.into_value()
    }));

    assert_eq!(seen, Some(json!([{"name": "a"}, {"name": "b"}])));
    assert_eq!(calls.get(), 1);
}

#[test]
fn rejected_fetch_never_runs_ready() {
    let host = ScriptedHost::rejecting("NetworkError when attempting to fetch resource.");
    let calls = Cell::new(0);
    let result = block_on(bootstrap(&host, "prompts.json", |_| calls.set(calls.get() + 1)));

    assert_eq!(result, None);
    assert_eq!(calls.get(), 0);
    assert_eq!(host.requested.borrow().len(), 1, "no retry");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let host = ScriptedHost::serving("{ not json");
    let err = block_on(load_prompts(&host, "prompts.json")).unwrap_err();
    match err {
        BootstrapError::Parse { url, .. } => {
            assert_eq!(url, "moz-extension://test-id/prompts.json");
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    let ran = block_on(bootstrap(&host, "prompts.json", |_| ()));
    assert_eq!(ran, None);
}

#[test]
fn unresolvable_url_short_circuits() {
    let err = block_on(load_prompts(&NoRuntime, "prompts.json")).unwrap_err();
    assert!(matches!(err, BootstrapError::ResolveUrl { .. }));
    assert_eq!(
        err.to_string(),
        "cannot resolve bundled resource `prompts.json`: runtime.getURL is not available"
    );
}
