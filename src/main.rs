//! pubflow - publish code artifacts to a shareable location
//!
//! CLI binary driving the publish workflow from a terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pubflow::types::Metadata;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "pubflow")]
#[command(about = "Publish code artifacts and share them")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by PUBFLOW_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish (or save) a file
    Publish {
        /// File whose contents are published
        file: PathBuf,

        /// Save without publishing publicly
        #[arg(long)]
        save_only: bool,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Artifact title
        #[arg(long)]
        title: Option<String>,

        /// Artifact description
        #[arg(long)]
        description: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Update this previously published URL instead of the remembered one
        #[arg(long)]
        url: Option<String>,
    },

    /// Print the remix URL for an artifact path
    RemixUrl {
        /// Artifact path as reported by the hosting service
        path: String,

        /// Template containing {{VIEW_URL}} (defaults to the configured one)
        #[arg(long)]
        template: Option<String>,
    },

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Show where the publish token comes from
    Test,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pubflow=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PUBFLOW_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Publish {
            file,
            save_only,
            yes,
            title,
            description,
            author,
            tags,
            url,
        } => {
            let saved = cli::run_publish(
                &file,
                cli::PublishOptions {
                    save_only,
                    yes,
                    metadata: Metadata {
                        title,
                        description,
                        author,
                        tags,
                    },
                    url: url.as_deref(),
                    config,
                },
            )
            .await?;
            if !saved {
                std::process::exit(1);
            }
        }
        Commands::RemixUrl { path, template } => {
            cli::run_remix_url(&path, template.as_deref(), config)?;
        }
        Commands::Auth { action } => match action {
            AuthAction::Test => cli::run_auth_test(config)?,
        },
    }

    Ok(())
}
