//! Auth command - show where the publish token comes from

use crate::cli::style::{Stylize, check};
use anstream::println;
use pubflow::auth::{AuthSource, get_publish_auth};
use pubflow::config::Config;
use pubflow::error::Result;
use std::path::Path;

/// Run the auth test command
pub fn run_auth_test(config: Option<&Path>) -> Result<()> {
    let config = Config::load(config)?;
    let auth = get_publish_auth(&config);

    println!("{}", "Publish authentication".emphasis());
    match auth.source {
        AuthSource::Anonymous => {
            println!("{}", "No publish token configured".warning());
            println!("  {} {}", "Set".muted(), "PUBFLOW_TOKEN".accent());
        }
        source => {
            println!("{} Token found", check());
            println!("  {} {:?}", "Token source:".muted(), source);
        }
    }
    println!("  {} {}", "Endpoint:".muted(), config.endpoint.accent());
    Ok(())
}
