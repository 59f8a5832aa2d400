//! Core types for the publish workflow

use serde::{Deserialize, Serialize};
use url::Url;

/// Workflow state of a [`PublishController`](crate::publish::PublishController)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishState {
    /// Nothing in progress
    #[default]
    Idle,
    /// Confirmation surface is open, waiting for the user
    Confirming,
    /// A submission is in flight
    Publishing,
    /// Last submission succeeded
    Published,
    /// Last submission failed
    Error,
}

impl PublishState {
    /// Whether `start` may open a new confirmation from this state
    pub const fn is_restartable(self) -> bool {
        !matches!(self, Self::Publishing)
    }
}

impl std::fmt::Display for PublishState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Confirming => write!(f, "confirming"),
            Self::Publishing => write!(f, "publishing"),
            Self::Published => write!(f, "published"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Descriptive metadata attached to a published artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Artifact title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Metadata {
    /// Fill fields that are still empty from `prefill`, keeping user input
    pub fn merge_missing(&mut self, prefill: &Self) {
        if self.title.is_none() {
            self.title.clone_from(&prefill.title);
        }
        if self.description.is_none() {
            self.description.clone_from(&prefill.description);
        }
        if self.author.is_none() {
            self.author.clone_from(&prefill.author);
        }
        if self.tags.is_empty() {
            self.tags.clone_from(&prefill.tags);
        }
    }
}

/// A single submission, built fresh for every confirm action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Source code of the artifact
    pub code: String,
    /// Metadata read from the form at confirm time
    pub metadata: Metadata,
    /// `true` to publish publicly, `false` to only save
    pub published: bool,
    /// Anti-forgery token supplied by the host, if any
    pub data_protector: Option<String>,
}

/// What the persistence service reports for a successful save
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedArtifact {
    /// Public view URL of the artifact
    pub url: Url,
    /// Service-side path of the artifact
    pub path: String,
}

/// Outcome of a successful publish, handed to listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// Where the artifact can be viewed
    pub view_url: Url,
    /// Where a remix of the artifact can be started
    pub remix_url: Url,
    /// Service-side path of the artifact
    pub path: String,
}

/// Bounds of the element that triggered `start`, used to anchor dialogs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriggerBounds {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// A sharing widget found on the rendered result surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharingElement {
    /// Unique element id within the result surface
    pub id: String,
    /// Medium identifier (e.g. "twitter")
    pub medium: String,
}

impl SharingElement {
    /// Create an element whose id equals its medium
    pub fn for_medium(medium: impl Into<String>) -> Self {
        let medium = medium.into();
        Self {
            id: medium.clone(),
            medium,
        }
    }
}
