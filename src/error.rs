//! Error types for pubflow

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the publish workflow and its services
#[derive(Debug, Error)]
pub enum Error {
    /// The persistence service rejected or failed the submission.
    ///
    /// `detail` is the raw failure text reported by the service.
    #[error("submission failed: {detail}")]
    Submission {
        /// Raw failure detail (e.g. the response body)
        detail: String,
    },

    /// A submission is already in flight
    #[error("a publish is already in progress")]
    PublishInFlight,

    /// A sharing integration failed to activate
    #[error("sharing integration '{medium}' failed: {message}")]
    Sharing {
        /// Medium identifier of the element being activated
        medium: String,
        /// Failure description
        message: String,
    },

    /// Discovery lookup failed
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// Parse error (URLs, templates, responses)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid argument from the host
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL error
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Raw failure detail suitable for showing next to a localized message
    pub fn detail(&self) -> String {
        match self {
            Self::Submission { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}
