//! Terminal implementations of the publish collaborators

use crate::cli::style::{Stylize, check, cross, link, spinner_style};
use anstream::{eprintln, println};
use indicatif::ProgressBar;
use pubflow::publish::{
    CodeEditor, ErrorReporter, Localizer, MetadataForm, MetadataFormFactory,
    MetadataFormOptions, PublishSurface,
};
use pubflow::types::{Metadata, PublishResult, SharingElement, TriggerBounds};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Publish surface that prints to the terminal
///
/// The result view is the block printed after a successful publish; its
/// sharing part counts as revealed once that block has been printed.
pub struct TerminalSurface {
    localizer: Arc<dyn Localizer>,
    share_media: Vec<String>,
    publish_checked: AtomicBool,
    code_errors: AtomicBool,
    result_shown: AtomicBool,
    rendered: Mutex<Option<PublishResult>>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalSurface {
    /// Create a surface offering `share_media` after a publish
    pub fn new(localizer: Arc<dyn Localizer>, share_media: Vec<String>) -> Self {
        Self {
            localizer,
            share_media,
            publish_checked: AtomicBool::new(false),
            code_errors: AtomicBool::new(false),
            result_shown: AtomicBool::new(false),
            rendered: Mutex::new(None),
            spinner: Mutex::new(None),
        }
    }
}

impl PublishSurface for TerminalSurface {
    fn anchor_to(&self, trigger: TriggerBounds) {
        debug!(?trigger, "terminal surface ignores anchoring");
    }

    fn open_confirmation(&self) {
        if self.code_errors.load(Ordering::SeqCst) {
            println!("{}", self.localizer.get("code-errors").warning());
        }
    }

    fn set_publish_checked(&self, checked: bool) {
        self.publish_checked.store(checked, Ordering::SeqCst);
    }

    fn publish_checked(&self) -> bool {
        self.publish_checked.load(Ordering::SeqCst)
    }

    fn flag_code_errors(&self, has_errors: bool) {
        self.code_errors.store(has_errors, Ordering::SeqCst);
    }

    fn restore_result_view(&self) {
        self.result_shown.store(false, Ordering::SeqCst);
        *self.rendered.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn set_in_progress(&self, in_progress: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if in_progress {
            let bar = ProgressBar::new_spinner();
            bar.set_style(spinner_style());
            bar.set_message(self.localizer.get("publish-in-progress"));
            bar.enable_steady_tick(Duration::from_millis(80));
            *spinner = Some(bar);
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn fade_out_confirmation(&self) {}

    fn hide_confirmation(&self) {}

    fn render_result(&self, result: &PublishResult) {
        *self.rendered.lock().unwrap_or_else(PoisonError::into_inner) = Some(result.clone());
    }

    fn reveal_result(&self) {
        let rendered = self.rendered.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(result) = rendered.as_ref() else {
            return;
        };
        println!(
            "{} {} {}",
            check(),
            self.localizer.get("view-url"),
            link(&result.view_url).accent()
        );
        println!(
            "  {} {}",
            self.localizer.get("remix-url").muted(),
            link(&result.remix_url)
        );
        self.result_shown.store(true, Ordering::SeqCst);
    }

    fn sharing_elements(&self) -> Vec<SharingElement> {
        self.share_media
            .iter()
            .map(|medium| SharingElement::for_medium(medium.clone()))
            .collect()
    }

    fn sharing_revealed(&self) -> bool {
        self.result_shown.load(Ordering::SeqCst)
    }
}

/// Error dialog printed to stderr
pub struct TerminalReporter;

impl ErrorReporter for TerminalReporter {
    fn show_error_dialog(&self, text: &str) {
        eprintln!("{} {text}", cross());
    }
}

/// Editor backed by a file read at startup
pub struct FileEditor {
    code: String,
}

impl FileEditor {
    /// Wrap already-read file contents
    pub const fn new(code: String) -> Self {
        Self { code }
    }
}

impl CodeEditor for FileEditor {
    fn value(&self) -> String {
        self.code.clone()
    }
}

/// Metadata form filled from command-line flags
struct FlagForm {
    value: Mutex<Metadata>,
}

impl MetadataForm for FlagForm {
    fn value(&self) -> Metadata {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_all(&self, prefill: &Metadata) {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .merge_missing(prefill);
    }
}

/// Builds a form holding the metadata given on the command line
pub struct FlagFormFactory {
    metadata: Metadata,
}

impl FlagFormFactory {
    /// Factory for forms starting from `metadata`
    pub const fn new(metadata: Metadata) -> Self {
        Self { metadata }
    }
}

impl MetadataFormFactory for FlagFormFactory {
    fn create(&self, options: MetadataFormOptions) -> Box<dyn MetadataForm> {
        debug!(save_and_publish = options.save_and_publish, "creating flag form");
        Box::new(FlagForm {
            value: Mutex::new(self.metadata.clone()),
        })
    }
}
