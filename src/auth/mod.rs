//! Authentication for the hosting service
//!
//! Supports an environment variable and the config file.

use crate::config::Config;
use std::env;
use tracing::debug;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from the config file
    ConfigFile,
    /// No token; requests are sent anonymously
    Anonymous,
}

/// Publish authentication configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishAuthConfig {
    /// Bearer token, if any
    pub token: Option<String>,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Get publish authentication
///
/// Priority:
/// 1. `PUBFLOW_TOKEN` environment variable
/// 2. `token` in the config file
/// 3. anonymous
pub fn get_publish_auth(config: &Config) -> PublishAuthConfig {
    debug!("checking PUBFLOW_TOKEN env var");
    resolve_auth(env::var("PUBFLOW_TOKEN").ok(), config)
}

/// Pick a token from an already-read env value and the config
pub fn resolve_auth(env_token: Option<String>, config: &Config) -> PublishAuthConfig {
    let trimmed = |token: &str| {
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    };

    if let Some(token) = env_token.as_deref().and_then(trimmed) {
        debug!("obtained token from PUBFLOW_TOKEN env var");
        return PublishAuthConfig {
            token: Some(token),
            source: AuthSource::EnvVar,
        };
    }

    if let Some(token) = config.token.as_deref().and_then(trimmed) {
        debug!("obtained token from config file");
        return PublishAuthConfig {
            token: Some(token),
            source: AuthSource::ConfigFile,
        };
    }

    debug!("no publish token found, continuing anonymously");
    PublishAuthConfig {
        token: None,
        source: AuthSource::Anonymous,
    }
}
