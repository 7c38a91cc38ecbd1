//! Host-independent core of the Momentum content script.
//!
//! Everything here talks to the page through the [`Dom`] trait and to the
//! extension through [`ResourceHost`], so the same code runs against the
//! browser (see `momentum-wasm`) and against [`MemoryDom`] in tests.

pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod factory;
pub mod memory;
pub mod query;
pub mod spec;
pub mod style;

pub use bootstrap::{BootstrapError, Prompts, ResourceHost, bootstrap, load_prompts};
pub use config::{BannerConfig, Config, ConfigError};
pub use dom::{Dom, DomError, NameKind};
pub use factory::{CreateError, DecorationStage, create_element, supplied};
pub use memory::{MemoryDom, NodeHandle};
pub use query::{by_id, query, query_all};
pub use spec::{ElementSpec, ParentRef};
