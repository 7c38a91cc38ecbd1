//! One-shot load of the bundled prompts resource.
//!
//! The loaded value is returned to the caller (or handed to a readiness
//! callback) instead of being parked in shared state. There is no retry and
//! no timeout: a fetch that never settles means readiness never fires.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default location of the prompts file inside the extension bundle.
pub const PROMPTS_PATH: &str = "prompts.json";

/// Why the prompts resource could not be loaded.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("cannot resolve bundled resource `{path}`: {message}")]
    ResolveUrl { path: String, message: String },

    #[error("fetch of {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("fetch of {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not valid JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The extension runtime as seen by the bootstrap.
///
/// Futures are not required to be `Send`; the browser host is single
/// threaded.
#[allow(async_fn_in_trait)]
pub trait ResourceHost {
    /// Resolve a bundle-relative path to a fetchable URL.
    fn resource_url(&self, path: &str) -> Result<String, BootstrapError>;

    /// Fetch `url` and return the body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, BootstrapError>;
}

/// Parsed contents of the prompts file. Any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompts(Value);

impl Prompts {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Top-level entry by key, when the file is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Entry count for arrays and objects, 1 for any other value.
    pub fn len(&self) -> usize {
        match &self.0 {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve, fetch and parse `path`.
///
/// # Errors
/// Any [`BootstrapError`]; nothing is logged here.
pub async fn load_prompts<H: ResourceHost>(
    host: &H,
    path: &str,
) -> Result<Prompts, BootstrapError> {
    let url = host.resource_url(path)?;
    log::debug!("fetching {url}");
    let body = host.fetch_text(&url).await?;
    let value =
        serde_json::from_str(&body).map_err(|source| BootstrapError::Parse { url, source })?;
    Ok(Prompts(value))
}

/// Load `path` and hand the result to `on_ready`.
///
/// `on_ready` runs at most once, only on success. On failure a single error
/// is logged and `None` is returned.
pub async fn bootstrap<H, F, R>(host: &H, path: &str, on_ready: F) -> Option<R>
where
    H: ResourceHost,
    F: FnOnce(Prompts) -> R,
{
    match load_prompts(host, path).await {
        Ok(prompts) => {
            log::info!("loaded {path} ({} entries)", prompts.len());
            Some(on_ready(prompts))
        }
        Err(err) => {
            log::error!("Error loading {path}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompts_len_by_shape() {
        assert_eq!(Prompts::new(json!([1, 2, 3])).len(), 3);
        assert_eq!(Prompts::new(json!({"a": 1})).len(), 1);
        assert!(Prompts::new(json!({})).is_empty());
        assert_eq!(Prompts::new(json!("solo")).len(), 1);
    }

    #[test]
    fn prompts_serialize_transparently() {
        let prompts = Prompts::new(json!({"greet": "hi"}));
        assert_eq!(serde_json::to_string(&prompts).unwrap(), r#"{"greet":"hi"}"#);
        assert_eq!(prompts.get("greet"), Some(&json!("hi")));
    }
}
