//! CLI command implementations

mod auth;
mod history;
mod publish;
mod remix;
mod style;
mod surface;

pub use auth::run_auth_test;
pub use publish::{PublishOptions, run_publish};
pub use remix::run_remix_url;
