//! Mock persistence service for testing

use async_trait::async_trait;
use pubflow::error::{Error, Result};
use pubflow::platform::PersistenceService;
use pubflow::types::{PublishRequest, SavedArtifact};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use url::Url;

/// Persistence service replaying queued outcomes and recording calls
#[derive(Default)]
pub struct MockPersistenceService {
    outcomes: Mutex<VecDeque<Result<SavedArtifact>>>,
    calls: Mutex<Vec<(PublishRequest, Option<Url>)>>,
    release: Option<Arc<Notify>>,
}

#[allow(dead_code)]
impl MockPersistenceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every submission until `release` is notified
    pub fn gated(release: Arc<Notify>) -> Self {
        Self {
            release: Some(release),
            ..Self::default()
        }
    }

    pub fn succeed_with(self, url: &str, path: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(SavedArtifact {
            url: Url::parse(url).unwrap(),
            path: path.to_string(),
        }));
        self
    }

    pub fn fail_with(self, detail: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(Error::Submission {
            detail: detail.to_string(),
        }));
        self
    }

    pub fn calls(&self) -> Vec<(PublishRequest, Option<Url>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PersistenceService for MockPersistenceService {
    async fn save_code(
        &self,
        request: &PublishRequest,
        prior_url: Option<&Url>,
    ) -> Result<SavedArtifact> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), prior_url.cloned()));
        if let Some(release) = &self.release {
            release.notified().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Internal("no outcome queued".to_string())))
    }
}
