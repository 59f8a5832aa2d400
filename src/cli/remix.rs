//! Remix command - print the remix URL for an artifact path

use anstream::println;
use pubflow::config::Config;
use pubflow::error::Result;
use pubflow::remix::resolve_remix_url;
use std::path::Path;

/// Run the remix-url command
pub fn run_remix_url(path: &str, template: Option<&str>, config: Option<&Path>) -> Result<()> {
    let url = match template {
        Some(template) => resolve_remix_url(template, path)?,
        None => resolve_remix_url(&Config::load(config)?.remix_template, path)?,
    };
    println!("{url}");
    Ok(())
}
