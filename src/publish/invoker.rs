//! Single-submission wrapper around the persistence service

use crate::error::Result;
use crate::platform::PersistenceService;
use crate::publish::PublishSurface;
use crate::types::{PublishRequest, SavedArtifact};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Issues one submission per confirm action
///
/// The invoker does not guard against re-entry; the controller only calls it
/// once per armed confirmation.
pub struct PublishInvoker {
    service: Arc<dyn PersistenceService>,
    surface: Arc<dyn PublishSurface>,
}

impl PublishInvoker {
    /// Create an invoker submitting to `service`
    pub fn new(service: Arc<dyn PersistenceService>, surface: Arc<dyn PublishSurface>) -> Self {
        Self { service, surface }
    }

    /// Submit `request`, updating `session_url` when one exists
    ///
    /// Errors from the service are passed through unchanged.
    pub async fn submit(
        &self,
        request: PublishRequest,
        session_url: Option<&Url>,
    ) -> Result<SavedArtifact> {
        self.surface.set_in_progress(true);
        debug!(
            published = request.published,
            updating = session_url.is_some(),
            "submitting artifact"
        );

        let outcome = self.service.save_code(&request, session_url).await;
        match &outcome {
            Ok(saved) => debug!(url = %saved.url, path = %saved.path, "submission succeeded"),
            Err(e) => debug!(error = %e, "submission failed"),
        }
        outcome
    }
}
