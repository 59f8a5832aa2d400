//! Publish notifications

use crate::types::PublishResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Receives a notification for every successful publish
#[async_trait]
pub trait PublishListener: Send + Sync {
    /// Called once per successful publish
    async fn on_publish(&self, result: &PublishResult);
}

/// No-op listener for testing or when notifications aren't needed
pub struct NoopListener;

#[async_trait]
impl PublishListener for NoopListener {
    async fn on_publish(&self, _result: &PublishResult) {}
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Per-controller listener set
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Arc<dyn PublishListener>)>,
}

impl ListenerRegistry {
    pub(crate) fn subscribe(&mut self, listener: Arc<dyn PublishListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn PublishListener>> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}
