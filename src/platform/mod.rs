//! Persistence and discovery services
//!
//! The controller only sees these traits; [`HttpPublisher`] is the bundled
//! implementation talking to a hosting service over HTTP.

mod factory;
mod http;

pub use factory::create_persistence_service;
pub use http::HttpPublisher;

use crate::error::Result;
use crate::types::{Metadata, PublishRequest, SavedArtifact};
use async_trait::async_trait;
use url::Url;

/// Persists code artifacts and makes them viewable
#[async_trait]
pub trait PersistenceService: Send + Sync {
    /// Save (and optionally publish) an artifact
    ///
    /// `prior_url` is the artifact previously published in this session; when
    /// present the service updates it rather than creating a new one.
    async fn save_code(
        &self,
        request: &PublishRequest,
        prior_url: Option<&Url>,
    ) -> Result<SavedArtifact>;
}

/// Looks up existing metadata for a URL, used to prefill the form
#[async_trait]
pub trait DiscoveryService: Send + Sync {
    /// Metadata known for `url`, if any
    async fn discover(&self, url: &Url) -> Result<Option<Metadata>>;
}
