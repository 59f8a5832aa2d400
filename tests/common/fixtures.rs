//! Recording collaborators and a controller harness

#![allow(dead_code)]

use async_trait::async_trait;
use pubflow::error::{Error, Result};
use pubflow::i18n::Catalog;
use pubflow::platform::DiscoveryService;
use pubflow::publish::{
    Analytics, CodeEditor, Collaborators, ErrorReporter, MetadataForm, MetadataFormFactory,
    MetadataFormOptions, PublishController, PublishListener, PublishSurface,
};
use pubflow::share::{SharingGate, SharingIntegration};
use pubflow::types::{Metadata, PublishResult, PublishState, SharingElement, TriggerBounds};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use url::Url;

use crate::common::MockPersistenceService;

pub const REMIX_TEMPLATE: &str = "https://example.org/remix/{{VIEW_URL}}";

pub fn trigger() -> TriggerBounds {
    TriggerBounds {
        x: 10.0,
        y: 20.0,
        width: 80.0,
        height: 24.0,
    }
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Surface that logs every call
#[derive(Default)]
pub struct RecordingSurface {
    log: Mutex<Vec<String>>,
    publish_checked: Mutex<bool>,
    sharing_revealed: Mutex<bool>,
    elements: Mutex<Vec<SharingElement>>,
}

impl RecordingSurface {
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.log().iter().filter(|e| *e == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.log().iter().position(|e| e == entry)
    }

    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }

    /// Simulate the user toggling the publish option
    pub fn toggle_publish(&self, checked: bool) {
        *self.publish_checked.lock().unwrap() = checked;
    }

    pub fn set_sharing_revealed(&self, revealed: bool) {
        *self.sharing_revealed.lock().unwrap() = revealed;
    }

    pub fn set_elements(&self, media: &[&str]) {
        *self.elements.lock().unwrap() =
            media.iter().map(|m| SharingElement::for_medium(*m)).collect();
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }
}

impl PublishSurface for RecordingSurface {
    fn anchor_to(&self, _trigger: TriggerBounds) {
        self.record("anchor");
    }
    fn open_confirmation(&self) {
        self.record("open_confirmation");
    }
    fn set_publish_checked(&self, checked: bool) {
        *self.publish_checked.lock().unwrap() = checked;
        self.record(format!("publish_checked:{checked}"));
    }
    fn publish_checked(&self) -> bool {
        *self.publish_checked.lock().unwrap()
    }
    fn flag_code_errors(&self, has_errors: bool) {
        self.record(format!("code_errors:{has_errors}"));
    }
    fn restore_result_view(&self) {
        self.record("restore_result_view");
    }
    fn set_in_progress(&self, in_progress: bool) {
        self.record(format!("in_progress:{in_progress}"));
    }
    fn fade_out_confirmation(&self) {
        self.record("fade_out_confirmation");
    }
    fn hide_confirmation(&self) {
        self.record("hide_confirmation");
    }
    fn render_result(&self, result: &PublishResult) {
        self.record(format!("render_result:{}", result.view_url));
    }
    fn reveal_result(&self) {
        self.record("reveal_result");
    }
    fn sharing_elements(&self) -> Vec<SharingElement> {
        self.elements.lock().unwrap().clone()
    }
    fn sharing_revealed(&self) -> bool {
        *self.sharing_revealed.lock().unwrap()
    }
}

pub struct StaticEditor(pub String);

impl CodeEditor for StaticEditor {
    fn value(&self) -> String {
        self.0.clone()
    }
}

/// Form whose value is whatever was last applied as prefill
#[derive(Default)]
pub struct RecordingForm {
    value: Mutex<Metadata>,
    updates: Arc<Mutex<Vec<Metadata>>>,
}

impl MetadataForm for RecordingForm {
    fn value(&self) -> Metadata {
        self.value.lock().unwrap().clone()
    }
    fn update_all(&self, prefill: &Metadata) {
        self.value.lock().unwrap().merge_missing(prefill);
        self.updates.lock().unwrap().push(prefill.clone());
    }
}

#[derive(Default)]
pub struct RecordingFormFactory {
    pub created: Mutex<Vec<bool>>,
    pub updates: Arc<Mutex<Vec<Metadata>>>,
}

impl MetadataFormFactory for RecordingFormFactory {
    fn create(&self, options: MetadataFormOptions) -> Box<dyn MetadataForm> {
        self.created.lock().unwrap().push(options.save_and_publish);
        Box::new(RecordingForm {
            value: Mutex::new(Metadata::default()),
            updates: self.updates.clone(),
        })
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingReporter {
    fn show_error_dialog(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    pub events: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingAnalytics {
    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Analytics for RecordingAnalytics {
    fn event(&self, name: &str, attributes: &[(&str, &str)]) {
        self.events.lock().unwrap().push((
            name.to_string(),
            attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ));
    }
}

#[derive(Default)]
pub struct RecordingListener {
    pub results: Mutex<Vec<PublishResult>>,
}

#[async_trait]
impl PublishListener for RecordingListener {
    async fn on_publish(&self, result: &PublishResult) {
        self.results.lock().unwrap().push(result.clone());
    }
}

#[derive(Default)]
pub struct RecordingIntegration {
    pub activations: Mutex<Vec<(String, Url)>>,
}

impl SharingIntegration for RecordingIntegration {
    fn activate(&self, element: &SharingElement, view_url: &Url) -> Result<()> {
        self.activations
            .lock()
            .unwrap()
            .push((element.id.clone(), view_url.clone()));
        Ok(())
    }
}

/// Integration that reads the session back from its controller when activated
#[derive(Default)]
pub struct SessionReadingIntegration {
    controller: OnceLock<Weak<PublishController>>,
    pub seen: Mutex<Vec<(PublishState, Option<Url>)>>,
}

impl SessionReadingIntegration {
    pub fn attach(&self, controller: &Arc<PublishController>) {
        let _ = self.controller.set(Arc::downgrade(controller));
    }
}

impl SharingIntegration for SessionReadingIntegration {
    fn activate(&self, _element: &SharingElement, _view_url: &Url) -> Result<()> {
        let controller = self
            .controller
            .get()
            .and_then(Weak::upgrade)
            .ok_or_else(|| Error::Internal("controller not attached".to_string()))?;
        self.seen
            .lock()
            .unwrap()
            .push((controller.state(), controller.current_url()));
        Ok(())
    }
}

type ControllerCell = Arc<OnceLock<Weak<PublishController>>>;

fn state_of(cell: &ControllerCell) -> Option<PublishState> {
    cell.get().and_then(Weak::upgrade).map(|c| c.state())
}

/// Form factory whose forms read the controller state on every call
#[derive(Default)]
pub struct SessionReadingForms {
    controller: ControllerCell,
    pub seen: Arc<Mutex<Vec<(&'static str, Option<PublishState>)>>>,
}

impl SessionReadingForms {
    pub fn attach(&self, controller: &Arc<PublishController>) {
        let _ = self.controller.set(Arc::downgrade(controller));
    }
}

struct SessionReadingForm {
    controller: ControllerCell,
    seen: Arc<Mutex<Vec<(&'static str, Option<PublishState>)>>>,
}

impl MetadataForm for SessionReadingForm {
    fn value(&self) -> Metadata {
        self.seen
            .lock()
            .unwrap()
            .push(("value", state_of(&self.controller)));
        Metadata::default()
    }
    fn update_all(&self, _prefill: &Metadata) {
        self.seen
            .lock()
            .unwrap()
            .push(("update", state_of(&self.controller)));
    }
}

impl MetadataFormFactory for SessionReadingForms {
    fn create(&self, _options: MetadataFormOptions) -> Box<dyn MetadataForm> {
        self.seen
            .lock()
            .unwrap()
            .push(("create", state_of(&self.controller)));
        Box::new(SessionReadingForm {
            controller: self.controller.clone(),
            seen: self.seen.clone(),
        })
    }
}

/// Integration that always fails to load
pub struct FailingIntegration;

impl SharingIntegration for FailingIntegration {
    fn activate(&self, element: &SharingElement, _view_url: &Url) -> Result<()> {
        Err(Error::Sharing {
            medium: element.medium.clone(),
            message: "widget script unavailable".to_string(),
        })
    }
}

/// Discovery service answering once with a canned outcome
pub struct StubDiscovery {
    outcome: Mutex<Option<Result<Option<Metadata>>>>,
    pub lookups: Mutex<Vec<Url>>,
}

impl StubDiscovery {
    pub fn found(metadata: Metadata) -> Self {
        Self::answering(Ok(Some(metadata)))
    }

    pub fn failing(message: &str) -> Self {
        Self::answering(Err(Error::Discovery(message.to_string())))
    }

    fn answering(outcome: Result<Option<Metadata>>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DiscoveryService for StubDiscovery {
    async fn discover(&self, url: &Url) -> Result<Option<Metadata>> {
        self.lookups.lock().unwrap().push(url.clone());
        self.outcome.lock().unwrap().take().unwrap_or(Ok(None))
    }
}

pub struct Harness {
    pub controller: Arc<PublishController>,
    pub service: Arc<MockPersistenceService>,
    pub surface: Arc<RecordingSurface>,
    pub forms: Arc<RecordingFormFactory>,
    pub reporter: Arc<RecordingReporter>,
    pub analytics: Arc<RecordingAnalytics>,
    pub integration: Arc<RecordingIntegration>,
}

/// Controller wired to recording collaborators; "twitter" has an integration
pub fn harness(service: MockPersistenceService) -> Harness {
    harness_with_integrations(service, Vec::new())
}

/// Like [`harness`], with extra integrations registered per medium
pub fn harness_with_integrations(
    service: MockPersistenceService,
    extra: Vec<(&str, Arc<dyn SharingIntegration>)>,
) -> Harness {
    let service = Arc::new(service);
    let surface = Arc::new(RecordingSurface::default());
    let forms = Arc::new(RecordingFormFactory::default());
    let reporter = Arc::new(RecordingReporter::default());
    let analytics = Arc::new(RecordingAnalytics::default());
    let integration = Arc::new(RecordingIntegration::default());

    let mut gate = SharingGate::new();
    gate.register("twitter", integration.clone());
    for (medium, extra) in extra {
        gate.register(medium, extra);
    }

    let collab = Collaborators {
        surface: surface.clone(),
        editor: Arc::new(StaticEditor("<h1>hello</h1>".to_string())),
        forms: forms.clone(),
        reporter: reporter.clone(),
        localizer: Arc::new(Catalog::new()),
        analytics: analytics.clone(),
    };

    let controller = Arc::new(
        PublishController::new(service.clone(), collab)
            .with_remix_template(REMIX_TEMPLATE)
            .unwrap()
            .with_sharing_gate(gate),
    );

    Harness {
        controller,
        service,
        surface,
        forms,
        reporter,
        analytics,
        integration,
    }
}
