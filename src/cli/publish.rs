//! Publish command - publish or save a file to the hosting service

use crate::cli::history::History;
use crate::cli::style::Stylize;
use crate::cli::surface::{FileEditor, FlagFormFactory, TerminalReporter, TerminalSurface};
use anstream::println;
use dialoguer::Select;
use pubflow::config::Config;
use pubflow::error::{Error, Result};
use pubflow::i18n::Catalog;
use pubflow::platform::create_persistence_service;
use pubflow::publish::{Collaborators, ConfirmOutcome, Localizer, PublishController, PublishSurface};
use pubflow::share::{LinkIntegration, LinkSink, SharingGate};
use pubflow::telemetry::TracingAnalytics;
use pubflow::types::{Metadata, TriggerBounds};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Options for the publish command
#[derive(Debug, Clone, Default)]
pub struct PublishOptions<'a> {
    /// Only save, don't publish publicly
    pub save_only: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Metadata given on the command line
    pub metadata: Metadata,
    /// Artifact URL to update instead of the remembered one
    pub url: Option<&'a str>,
    /// Explicit config file
    pub config: Option<&'a Path>,
}

/// Flag markup that is obviously broken; publishing is still allowed
fn check_markup(code: &str) -> Option<String> {
    let opened = code.matches('<').count();
    let closed = code.matches('>').count();
    (opened != closed).then(|| format!("{opened} '<' but {closed} '>'"))
}

/// Run the publish command
///
/// Returns `Ok(false)` when the submission failed; the failure has already
/// been shown to the user by then.
pub async fn run_publish(file: &Path, options: PublishOptions<'_>) -> Result<bool> {
    let config = Config::load(options.config)?;
    let code = std::fs::read_to_string(file)
        .map_err(|e| Error::InvalidArgument(format!("cannot read {}: {e}", file.display())))?;

    let catalog: Arc<dyn Localizer> = Arc::new(Catalog::with_overrides(config.strings.clone()));
    let service = create_persistence_service(&config)?;
    let surface = Arc::new(TerminalSurface::new(
        catalog.clone(),
        config.share_media.clone(),
    ));

    let share_label = catalog.get("share-via");
    let sink: LinkSink = Arc::new(move |element, link| {
        println!("  {} {}: {}", share_label.muted(), element.medium, link);
    });
    let mut gate = SharingGate::new();
    LinkIntegration::register_all(&mut gate, &config.share_media, &sink);

    let collab = Collaborators {
        surface: surface.clone(),
        editor: Arc::new(FileEditor::new(code.clone())),
        forms: Arc::new(FlagFormFactory::new(options.metadata.clone())),
        reporter: Arc::new(TerminalReporter),
        localizer: catalog.clone(),
        analytics: Arc::new(TracingAnalytics),
    };
    let controller = PublishController::new(service.clone(), collab)
        .with_remix_template(config.remix_template.as_str())?
        .with_data_protector(config.data_protector.clone())
        .with_sharing_gate(gate);

    let mut history = History::load(History::default_path())?;
    let prior = match options.url {
        Some(url) => Some(Url::parse(url)?),
        None => history.url_for(file),
    };
    if let Some(prior) = &prior {
        controller.discover(service.as_ref(), prior).await;
    }
    controller.set_current_url(prior);
    controller.on_reparse(check_markup(&code));

    let handle = controller.start(!options.save_only, TriggerBounds::default())?;

    if !options.yes {
        let items = [
            catalog.get("publish-option"),
            catalog.get("save-option"),
            catalog.get("cancel-option"),
        ];
        let choice = Select::new()
            .with_prompt(catalog.get("publish-prompt"))
            .items(&items)
            .default(usize::from(!surface.publish_checked()))
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?;
        match choice {
            0 => surface.set_publish_checked(true),
            1 => surface.set_publish_checked(false),
            _ => {
                controller.dismiss();
                println!("Aborted");
                return Ok(true);
            }
        }
    }

    match controller.confirm(handle).await {
        ConfirmOutcome::Published(result) => {
            history.record(file, &result);
            history.save()?;
            controller.reveal_all_sharing();
            Ok(true)
        }
        ConfirmOutcome::Failed(_) => Ok(false),
        ConfirmOutcome::Ignored => Err(Error::Internal(
            "confirmation was no longer armed".to_string(),
        )),
    }
}
