//! Publish workflow state machine

use crate::error::{Error, Result};
use crate::platform::{DiscoveryService, PersistenceService};
use crate::publish::listener::{ListenerId, ListenerRegistry, PublishListener};
use crate::publish::{
    Analytics, CodeEditor, ErrorReporter, Localizer, MetadataForm, MetadataFormFactory,
    MetadataFormOptions, PublishInvoker, PublishSurface,
};
use crate::remix::{DEFAULT_REMIX_TEMPLATE, resolve_remix_url};
use crate::share::{Activation, SharingGate};
use crate::types::{
    Metadata, PublishRequest, PublishResult, PublishState, SavedArtifact, TriggerBounds,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use url::Url;

/// Localization key for the submission failure prefix
pub const PUBLISH_ERROR_KEY: &str = "publish-err";

/// Host-side collaborators of a controller
#[derive(Clone)]
pub struct Collaborators {
    /// Dialog surfaces
    pub surface: Arc<dyn PublishSurface>,
    /// Code source
    pub editor: Arc<dyn CodeEditor>,
    /// Builds the metadata form on first `start`
    pub forms: Arc<dyn MetadataFormFactory>,
    /// Error dialog host
    pub reporter: Arc<dyn ErrorReporter>,
    /// String lookup
    pub localizer: Arc<dyn Localizer>,
    /// Telemetry sink
    pub analytics: Arc<dyn Analytics>,
}

/// Binding of a confirm action to one `start`
///
/// Only the handle returned by the latest `start` is armed, and it fires at
/// most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmHandle {
    generation: u64,
}

/// What a confirm action led to
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The handle was stale or had already fired; nothing was submitted
    Ignored,
    /// The submission succeeded
    Published(PublishResult),
    /// The submission failed; the error has been reported to the user
    Failed(Error),
}

impl ConfirmOutcome {
    /// The publish result, if the submission succeeded
    pub const fn result(&self) -> Option<&PublishResult> {
        match self {
            Self::Published(result) => Some(result),
            _ => None,
        }
    }
}

struct Inner {
    state: PublishState,
    current_url: Option<Url>,
    form: Option<Arc<dyn MetadataForm>>,
    prefill: Option<Metadata>,
    code_error: Option<String>,
    generation: u64,
    armed: Option<u64>,
    gate: SharingGate,
}

/// Sequences confirmation, submission, success and failure of a publish
///
/// The state lock is never held across the awaited submission nor while a
/// collaborator runs, so `start`, reveals and overrides may run while a
/// confirm is pending and collaborators may call back into the controller.
pub struct PublishController {
    invoker: PublishInvoker,
    collab: Collaborators,
    remix_template: String,
    data_protector: Option<String>,
    inner: Mutex<Inner>,
    listeners: Mutex<ListenerRegistry>,
}

impl PublishController {
    /// Create a controller submitting to `service`
    pub fn new(service: Arc<dyn PersistenceService>, collab: Collaborators) -> Self {
        Self {
            invoker: PublishInvoker::new(service, collab.surface.clone()),
            collab,
            remix_template: DEFAULT_REMIX_TEMPLATE.to_string(),
            data_protector: None,
            inner: Mutex::new(Inner {
                state: PublishState::Idle,
                current_url: None,
                form: None,
                prefill: None,
                code_error: None,
                generation: 0,
                armed: None,
                gate: SharingGate::new(),
            }),
            listeners: Mutex::new(ListenerRegistry::default()),
        }
    }

    /// Use `template` to build remix URLs
    pub fn with_remix_template(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        resolve_remix_url(&template, "check")?;
        self.remix_template = template;
        Ok(self)
    }

    /// Attach an anti-forgery token to every request
    #[must_use]
    pub fn with_data_protector(mut self, data_protector: Option<String>) -> Self {
        self.data_protector = data_protector;
        self
    }

    /// Use `gate` (with its registered integrations) for sharing elements
    #[must_use]
    pub fn with_sharing_gate(self, gate: SharingGate) -> Self {
        self.inner().gate = gate;
        self
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners(&self) -> MutexGuard<'_, ListenerRegistry> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current workflow state
    pub fn state(&self) -> PublishState {
        self.inner().state
    }

    /// URL of the artifact this session publishes to
    pub fn current_url(&self) -> Option<Url> {
        self.inner().current_url.clone()
    }

    /// Override the session's artifact, e.g. after loading a published one
    pub fn set_current_url(&self, url: Option<Url>) {
        debug!(url = ?url.as_ref().map(Url::as_str), "overriding current URL");
        self.inner().current_url = url;
    }

    /// Register a listener for publish notifications
    pub fn subscribe(&self, listener: Arc<dyn PublishListener>) -> ListenerId {
        self.listeners().subscribe(listener)
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners().unsubscribe(id)
    }

    /// Open the confirmation surface
    ///
    /// Any previously returned handle is invalidated. Refused with
    /// [`Error::PublishInFlight`] while a submission is pending.
    pub fn start(&self, save_and_publish: bool, trigger: TriggerBounds) -> Result<ConfirmHandle> {
        let surface = &self.collab.surface;
        let (handle, form, has_code_error) = {
            let mut inner = self.inner();
            if !inner.state.is_restartable() {
                warn!("start requested while a publish is in flight");
                return Err(Error::PublishInFlight);
            }
            inner.generation += 1;
            inner.armed = Some(inner.generation);
            inner.state = PublishState::Confirming;
            let handle = ConfirmHandle {
                generation: inner.generation,
            };
            (handle, inner.form.clone(), inner.code_error.is_some())
        };

        surface.anchor_to(trigger);
        let form = match form {
            Some(form) => form,
            None => self.build_form(save_and_publish),
        };
        let prefill = self.inner().prefill.clone();
        if let Some(prefill) = prefill {
            form.update_all(&prefill);
        }

        if save_and_publish {
            surface.set_publish_checked(true);
        }
        surface.flag_code_errors(has_code_error);
        surface.open_confirmation();

        debug!(generation = handle.generation, "confirmation armed");
        self.collab.analytics.event(
            "Publish dialog opened",
            &[("saveAndPublish", bool_attr(save_and_publish))],
        );
        Ok(handle)
    }

    fn build_form(&self, save_and_publish: bool) -> Arc<dyn MetadataForm> {
        debug!(save_and_publish, "building metadata form");
        let built = self.collab.forms.create(MetadataFormOptions {
            editor: self.collab.editor.clone(),
            save_and_publish,
        });
        self.inner().form.get_or_insert(Arc::from(built)).clone()
    }

    /// Fire the confirm action bound to `handle`
    pub async fn confirm(&self, handle: ConfirmHandle) -> ConfirmOutcome {
        let surface = &self.collab.surface;
        let (form, prior_url) = {
            let mut inner = self.inner();
            if inner.state != PublishState::Confirming || inner.armed != Some(handle.generation) {
                debug!(generation = handle.generation, "ignoring stale confirm");
                return ConfirmOutcome::Ignored;
            }
            inner.armed = None;
            inner.gate.disarm();
            inner.state = PublishState::Publishing;
            (inner.form.clone(), inner.current_url.clone())
        };

        let published = surface.publish_checked();
        let metadata = form.map_or_else(Metadata::default, |form| form.value());
        surface.restore_result_view();
        let request = PublishRequest {
            code: self.collab.editor.value(),
            metadata,
            published,
            data_protector: self.data_protector.clone(),
        };

        self.collab.analytics.event(
            "Publish confirmed",
            &[("published", bool_attr(request.published))],
        );
        surface.fade_out_confirmation();
        surface.hide_confirmation();

        let outcome = self
            .invoker
            .submit(request, prior_url.as_ref())
            .await
            .and_then(|saved| self.resolve(saved));

        match outcome {
            Ok(result) => self.succeed(result).await,
            Err(error) => {
                self.fail(&error);
                ConfirmOutcome::Failed(error)
            }
        }
    }

    fn resolve(&self, saved: SavedArtifact) -> Result<PublishResult> {
        let remix_url = resolve_remix_url(&self.remix_template, &saved.path)?;
        Ok(PublishResult {
            view_url: saved.url,
            remix_url,
            path: saved.path,
        })
    }

    async fn succeed(&self, result: PublishResult) -> ConfirmOutcome {
        let surface = &self.collab.surface;
        surface.render_result(&result);
        let elements = surface.sharing_elements();
        let revealed = surface.sharing_revealed();
        let activations = {
            let mut inner = self.inner();
            inner.gate.arm(result.view_url.clone(), elements);
            if revealed {
                inner.gate.reveal_all()
            } else {
                Vec::new()
            }
        };
        Activation::run_all(activations);
        {
            let mut inner = self.inner();
            inner.current_url = Some(result.view_url.clone());
            inner.state = PublishState::Published;
        }
        surface.set_in_progress(false);
        surface.reveal_result();

        info!(view_url = %result.view_url, path = %result.path, "published");
        self.collab.analytics.event("Publish", &[]);

        let listeners = self.listeners().snapshot();
        for listener in listeners {
            listener.on_publish(&result).await;
        }
        ConfirmOutcome::Published(result)
    }

    fn fail(&self, error: &Error) {
        self.inner().state = PublishState::Error;
        self.collab.surface.set_in_progress(false);

        warn!(error = %error, "publish failed");
        let detail = error.detail();
        let text = format!("{} {detail}", self.collab.localizer.get(PUBLISH_ERROR_KEY));
        self.collab.reporter.show_error_dialog(&text);
        self.collab.analytics.event(
            "Error",
            &[
                ("label", "Error Publishing"),
                ("nonInteraction", "true"),
                ("detail", &detail),
            ],
        );
    }

    /// Close an open confirmation or a finished result; returns whether the
    /// controller went back to idle
    ///
    /// Does nothing while a submission is in flight.
    pub fn dismiss(&self) -> bool {
        let mut inner = self.inner();
        match inner.state {
            PublishState::Publishing | PublishState::Idle => false,
            PublishState::Confirming => {
                inner.armed = None;
                inner.state = PublishState::Idle;
                drop(inner);
                self.collab.surface.hide_confirmation();
                true
            }
            PublishState::Published | PublishState::Error => {
                inner.state = PublishState::Idle;
                true
            }
        }
    }

    /// Record the outcome of an editor reparse
    ///
    /// `error` describes an unresolved code error; it does not block publishing.
    pub fn on_reparse(&self, error: Option<String>) {
        if let Some(ref message) = error {
            debug!(message = %message, "code has unresolved errors");
        }
        let has_errors = error.is_some();
        let confirming = {
            let mut inner = self.inner();
            inner.code_error = error;
            inner.state == PublishState::Confirming
        };
        if confirming {
            self.collab.surface.flag_code_errors(has_errors);
        }
    }

    /// Store discovered prefill data, refreshing the form if it exists
    pub fn apply_prefill(&self, prefill: Metadata) {
        let form = {
            let mut inner = self.inner();
            inner.prefill = Some(prefill.clone());
            inner.form.clone()
        };
        if let Some(form) = form {
            form.update_all(&prefill);
        }
    }

    /// Query `service` once for `url` and apply whatever it finds
    pub async fn discover(&self, service: &dyn DiscoveryService, url: &Url) {
        match service.discover(url).await {
            Ok(Some(prefill)) => {
                debug!(%url, "applying discovered metadata");
                self.apply_prefill(prefill);
            }
            Ok(None) => debug!(%url, "no metadata discovered"),
            Err(e) => warn!(%url, error = %e, "metadata discovery failed"),
        }
    }

    /// Handle a reveal event for one sharing element
    ///
    /// Returns `true` if this reveal activated the element.
    pub fn reveal_sharing(&self, element_id: &str) -> Result<bool> {
        let activation = self.inner().gate.reveal(element_id);
        match activation {
            Some(activation) => activation.run().map(|()| true),
            None => Ok(false),
        }
    }

    /// Handle a reveal of the whole sharing surface
    ///
    /// Failing integrations are logged and skipped; returns the number of
    /// elements activated by this pass.
    pub fn reveal_all_sharing(&self) -> usize {
        let activations = self.inner().gate.reveal_all();
        Activation::run_all(activations)
    }
}

const fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
