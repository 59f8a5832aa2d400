//! Lazy activation of sharing integrations
//!
//! Sharing widgets on the result surface are only initialized the first time
//! they are revealed to the user.

mod gate;
mod links;

pub use gate::{Activation, SharingGate};
pub use links::{LinkIntegration, LinkSink, SHARE_MEDIA, share_link};

use crate::error::Result;
use crate::types::SharingElement;
use url::Url;

/// A third-party sharing integration for one medium
pub trait SharingIntegration: Send + Sync {
    /// Initialize the integration for `element`, pointing it at `view_url`
    fn activate(&self, element: &SharingElement, view_url: &Url) -> Result<()>;
}
