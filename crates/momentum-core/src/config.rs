//! Content-script configuration.

use crate::bootstrap::PROMPTS_PATH;
use crate::spec::ElementSpec;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default DOM event fired on `document` once prompts are loaded.
pub const READY_EVENT: &str = "momentum:prompts-ready";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── Config ───────────────────────────────────────────────────────────────

/// Startup configuration. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Bundle-relative path of the prompts file. Default: `prompts.json`.
    pub resource_path: String,

    /// `log` level name (`error` … `trace`, or `off`). Default: `info`.
    pub log_level: String,

    /// Event dispatched on `document` with the loaded prompts as `detail`.
    /// `null` disables it.
    pub ready_event: Option<String>,

    /// Element created at startup. `null` disables it.
    pub banner: Option<BannerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_path: PROMPTS_PATH.to_string(),
            log_level: "info".to_string(),
            ready_event: Some(READY_EVENT.to_string()),
            banner: Some(BannerConfig::default()),
        }
    }
}

impl Config {
    /// # Errors
    /// Returns [`ConfigError::Json`] on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `log_level` as a filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            log::warn!("unknown log level `{}`, using info", self.log_level);
            LevelFilter::Info
        })
    }
}

// ─── Banner ───────────────────────────────────────────────────────────────

/// A declarative [`ElementSpec`]. Attributes and styles are `[name, value]`
/// pairs so their order survives the round trip through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerConfig {
    pub parent: Option<String>,
    pub tag: String,
    pub class: Option<String>,
    pub text: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            parent: Some("body".to_string()),
            tag: "div".to_string(),
            class: Some("hello-world-class".to_string()),
            text: Some("Hello World".to_string()),
            attributes: vec![("id".to_string(), "helloWorldId".to_string())],
            styles: vec![
                ("color".to_string(), "blue".to_string()),
                ("zIndex".to_string(), "1000".to_string()),
            ],
        }
    }
}

impl BannerConfig {
    pub fn to_spec<N>(&self) -> ElementSpec<N> {
        let spec = ElementSpec::new(self.tag.as_str())
            .maybe_class(self.class.clone())
            .maybe_text(self.text.clone())
            .attrs(self.attributes.iter().cloned())
            .styles(self.styles.iter().cloned());
        match &self.parent {
            Some(locator) => spec.parent(locator.as_str()),
            None => spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ParentRef;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn null_disables_optional_parts() {
        let config = Config::from_json(r#"{"banner": null, "readyEvent": null}"#).unwrap();
        assert_eq!(config.banner, None);
        assert_eq!(config.ready_event, None);
        assert_eq!(config.resource_path, "prompts.json");
    }

    #[test]
    fn partial_banner_fills_defaults() {
        let config = Config::from_json(
            r#"{"banner": {"tag": "aside", "attributes": [["role", "note"]]}}"#,
        )
        .unwrap();
        let banner = config.banner.unwrap();
        assert_eq!(banner.tag, "aside");
        assert_eq!(banner.parent.as_deref(), Some("body"));
        assert_eq!(banner.attributes, vec![("role".to_string(), "note".to_string())]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{").is_err());
        assert!(Config::from_json(r#"{"logLevel": 3}"#).is_err());
    }

    #[test]
    fn level_filter_parses_names() {
        let mut config = Config::default();
        assert_eq!(config.level_filter(), LevelFilter::Info);
        config.log_level = "TRACE".into();
        assert_eq!(config.level_filter(), LevelFilter::Trace);
        config.log_level = "loud".into();
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn default_banner_spec() {
        let spec: ElementSpec<()> = BannerConfig::default().to_spec();
        assert_eq!(spec.tag, "div");
        assert_eq!(spec.parent, Some(ParentRef::Locator("body".into())));
        assert_eq!(spec.styles.len(), 2);
    }
}
