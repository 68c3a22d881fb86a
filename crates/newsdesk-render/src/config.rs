//! Engine configuration.
//!
//! Configuration is read from `NEWSDESK_*` environment variables:
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NEWSDESK_BASE_URL` | Public URL including any path prefix | `http://localhost` |
//! | `NEWSDESK_ROOT_URL` | Scheme and host of the public URL | `http://localhost` |
//! | `NEWSDESK_TEMPLATES_DIR` | Load templates from disk instead of the embedded set | unset |

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost";
const DEFAULT_ROOT_URL: &str = "http://localhost";

/// Settings consumed by the engine and its static template functions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Value of the `base_url()` template function.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `root_url()` template function.
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// Directory with `common/`, `views/` and `standalone/` subdirectories.
    /// `None` uses the templates compiled into the binary.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            root_url: default_root_url(),
            templates_dir: None,
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("root_url", DEFAULT_ROOT_URL)?
            .add_source(Environment::with_prefix("NEWSDESK"))
            .build()?
            .try_deserialize()
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the root URL.
    pub fn with_root_url(mut self, url: impl Into<String>) -> Self {
        self.root_url = url.into();
        self
    }

    /// Loads templates from `dir` instead of the embedded set.
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }
}
