//! Per-result activation record for sharing elements

use crate::error::Result;
use crate::share::SharingIntegration;
use crate::types::SharingElement;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

struct ArmedResult {
    view_url: Url,
    elements: Vec<SharingElement>,
    activated: HashSet<String>,
}

/// An integration call handed out by the gate, to be run by the caller
///
/// The element counts as activated as soon as the activation is handed out,
/// so a failing integration is not retried for the same result.
pub struct Activation {
    integration: Arc<dyn SharingIntegration>,
    element: SharingElement,
    view_url: Url,
}

impl Activation {
    /// Element being activated
    pub const fn element(&self) -> &SharingElement {
        &self.element
    }

    /// Initialize the integration for the element
    pub fn run(&self) -> Result<()> {
        debug!(
            id = %self.element.id,
            medium = %self.element.medium,
            "activating sharing integration"
        );
        self.integration.activate(&self.element, &self.view_url)
    }

    /// Run every activation, logging failures; returns how many succeeded
    pub fn run_all(activations: Vec<Self>) -> usize {
        let mut succeeded = 0;
        for activation in activations {
            match activation.run() {
                Ok(()) => succeeded += 1,
                Err(e) => warn!(
                    id = %activation.element.id,
                    medium = %activation.element.medium,
                    error = %e,
                    "sharing activation failed"
                ),
            }
        }
        succeeded
    }
}

/// Tracks which sharing elements have been activated for the current result
///
/// The gate is armed once per successful publish. Each element is activated
/// at most once per arming, on its first reveal; reveals of elements whose
/// medium has no registered integration are ignored. The gate never calls
/// integrations itself: reveals hand back [`Activation`]s for the caller to
/// run once it has released whatever lock guards the gate.
#[derive(Default)]
pub struct SharingGate {
    integrations: HashMap<String, Arc<dyn SharingIntegration>>,
    armed: Option<ArmedResult>,
}

impl SharingGate {
    /// Create a gate with no integrations
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the integration used for `medium`
    pub fn register(&mut self, medium: impl Into<String>, integration: Arc<dyn SharingIntegration>) {
        self.integrations.insert(medium.into(), integration);
    }

    /// Whether `medium` has a registered integration
    pub fn has_integration(&self, medium: &str) -> bool {
        self.integrations.contains_key(medium)
    }

    /// Arm against a new result, forgetting any previous activations
    pub fn arm(&mut self, view_url: Url, elements: Vec<SharingElement>) {
        debug!(%view_url, elements = elements.len(), "arming sharing gate");
        self.armed = Some(ArmedResult {
            view_url,
            elements,
            activated: HashSet::new(),
        });
    }

    /// Drop the current result; reveals are no-ops until the next `arm`
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Whether the gate is armed against a result
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Whether the element with `id` was activated for the current result
    pub fn is_activated(&self, id: &str) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|armed| armed.activated.contains(id))
    }

    /// Handle a reveal event for the element with `id`
    ///
    /// Returns the activation to run if this is the element's first reveal.
    pub fn reveal(&mut self, id: &str) -> Option<Activation> {
        let armed = self.armed.as_mut()?;
        let element = armed.elements.iter().find(|e| e.id == id)?;
        let Some(integration) = self.integrations.get(&element.medium) else {
            debug!(medium = %element.medium, "no integration for medium");
            return None;
        };
        if !armed.activated.insert(element.id.clone()) {
            return None;
        }

        Some(Activation {
            integration: integration.clone(),
            element: element.clone(),
            view_url: armed.view_url.clone(),
        })
    }

    /// Handle a reveal of the whole sharing surface
    ///
    /// Returns one activation per element not yet activated.
    pub fn reveal_all(&mut self) -> Vec<Activation> {
        let ids: Vec<String> = self
            .armed
            .as_ref()
            .map(|armed| armed.elements.iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default();

        ids.iter().filter_map(|id| self.reveal(id)).collect()
    }
}
