//! Publish workflow
//!
//! Sequences a publish/save action through its states:
//! 1. Confirming - the host opened the confirmation surface via `start`
//! 2. Publishing - the user confirmed and a submission is in flight
//! 3. Published / Error - the submission resolved; `start` may run again

mod controller;
mod host;
mod invoker;
mod listener;

pub use controller::{
    Collaborators, ConfirmHandle, ConfirmOutcome, PUBLISH_ERROR_KEY, PublishController,
};
pub use host::{
    Analytics, CodeEditor, ErrorReporter, Localizer, MetadataForm, MetadataFormFactory,
    MetadataFormOptions, PublishSurface,
};
pub use invoker::PublishInvoker;
pub use listener::{ListenerId, NoopListener, PublishListener};
