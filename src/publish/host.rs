//! Collaborator traits implemented by the host
//!
//! These keep rendering, form handling, localization and telemetry out of
//! the controller. Calls are expected to return promptly; none of them is
//! awaited.

use crate::types::{Metadata, PublishResult, SharingElement, TriggerBounds};
use std::sync::Arc;

/// Dialog surfaces driven by the controller
pub trait PublishSurface: Send + Sync {
    /// Anchor the confirmation dialog near the trigger
    fn anchor_to(&self, trigger: TriggerBounds);

    /// Show the confirmation surface
    fn open_confirmation(&self);

    /// Set the publish/save option
    fn set_publish_checked(&self, checked: bool);

    /// Current value of the publish/save option
    fn publish_checked(&self) -> bool;

    /// Flag (or clear) unresolved code errors on the confirmation surface
    fn flag_code_errors(&self, has_errors: bool);

    /// Restore the result view to its pristine content
    fn restore_result_view(&self);

    /// Mark the publish surface as busy
    fn set_in_progress(&self, in_progress: bool);

    /// Fade out the confirmation overlay
    fn fade_out_confirmation(&self);

    /// Hide the confirmation surface
    fn hide_confirmation(&self);

    /// Render a successful result into the result view
    fn render_result(&self, result: &PublishResult);

    /// Fade the result view in
    fn reveal_result(&self);

    /// Sharing elements present on the rendered result view
    fn sharing_elements(&self) -> Vec<SharingElement>;

    /// Whether the sharing part of the result view is currently visible
    fn sharing_revealed(&self) -> bool;
}

/// Source of the code being published
pub trait CodeEditor: Send + Sync {
    /// Current editor contents
    fn value(&self) -> String;
}

/// Metadata entry form
pub trait MetadataForm: Send + Sync {
    /// Metadata as currently entered
    fn value(&self) -> Metadata;

    /// Refresh the form with discovered prefill data
    fn update_all(&self, prefill: &Metadata);
}

/// Options passed when the metadata form is first built
#[derive(Clone)]
pub struct MetadataFormOptions {
    /// Editor whose contents the form describes
    pub editor: Arc<dyn CodeEditor>,
    /// Whether the form was opened for a publish (vs. a save)
    pub save_and_publish: bool,
}

/// Builds the metadata form on first use
pub trait MetadataFormFactory: Send + Sync {
    /// Construct the form
    fn create(&self, options: MetadataFormOptions) -> Box<dyn MetadataForm>;
}

/// Error dialog host
pub trait ErrorReporter: Send + Sync {
    /// Show an error dialog with `text`
    fn show_error_dialog(&self, text: &str);
}

/// Localized string lookup
pub trait Localizer: Send + Sync {
    /// String for `key`
    fn get(&self, key: &str) -> String;
}

/// Fire-and-forget analytics sink
pub trait Analytics: Send + Sync {
    /// Record an event
    fn event(&self, name: &str, attributes: &[(&str, &str)]);
}
