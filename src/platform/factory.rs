//! Persistence service factory
//!
//! Creates the hosting service client based on configuration.

use crate::auth::get_publish_auth;
use crate::config::Config;
use crate::error::Result;
use crate::platform::HttpPublisher;
use std::sync::Arc;
use tracing::debug;

/// Create the hosting service client from configuration
///
/// Handles authentication and client construction. The returned client
/// serves both persistence and discovery.
pub fn create_persistence_service(config: &Config) -> Result<Arc<HttpPublisher>> {
    let auth = get_publish_auth(config);
    debug!(endpoint = %config.endpoint, source = ?auth.source, "creating publish service");
    Ok(Arc::new(HttpPublisher::new(
        config.endpoint.clone(),
        auth.token,
    )?))
}
