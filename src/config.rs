//! Configuration loading
//!
//! Settings come from `config.toml` under the user's config directory (or an
//! explicit path), with `PUBFLOW_ENDPOINT` overriding the endpoint.

use crate::error::{Error, Result};
use crate::remix::DEFAULT_REMIX_TEMPLATE;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Default hosting service endpoint
pub const DEFAULT_ENDPOINT: &str = "https://publish.example.org/";

/// pubflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the hosting service
    pub endpoint: Url,
    /// Remix URL template containing `{{VIEW_URL}}`
    pub remix_template: String,
    /// Anti-forgery token sent with every submission
    pub data_protector: Option<String>,
    /// API token (prefer `PUBFLOW_TOKEN`)
    pub token: Option<String>,
    /// Sharing media shown after a publish
    pub share_media: Vec<String>,
    /// Localized string overrides
    pub strings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            remix_template: DEFAULT_REMIX_TEMPLATE.to_string(),
            data_protector: None,
            token: None,
            share_media: vec!["twitter".to_string(), "facebook".to_string(), "email".to_string()],
            strings: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pubflow").join("config.toml"))
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load the config
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_endpoint_override(env::var("PUBFLOW_ENDPOINT").ok())?;
        Ok(config)
    }

    /// Replace the endpoint with `endpoint` when one is given
    pub fn apply_endpoint_override(&mut self, endpoint: Option<String>) -> Result<()> {
        if let Some(endpoint) = endpoint {
            self.endpoint = Url::parse(&endpoint).map_err(|e| {
                Error::Config(format!("invalid PUBFLOW_ENDPOINT '{endpoint}': {e}"))
            })?;
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading config");
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
