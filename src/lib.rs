//! pubflow - publish code artifacts from an editor to a shareable location
//!
//! The core of the crate is [`publish::PublishController`], a state machine
//! that sequences confirmation, submission, success and failure of a
//! publish/save action. Everything around it (dialogs, metadata forms,
//! social widgets, analytics, localization, persistence) is a collaborator
//! reached through a trait.

pub mod auth;
pub mod config;
pub mod error;
pub mod i18n;
pub mod platform;
pub mod publish;
pub mod remix;
pub mod share;
pub mod telemetry;
pub mod types;
