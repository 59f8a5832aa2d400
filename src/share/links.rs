//! Link-based sharing integrations

use crate::error::{Error, Result};
use crate::share::{SharingGate, SharingIntegration};
use crate::types::SharingElement;
use std::sync::Arc;
use tracing::warn;
use url::Url;

/// Media with a built-in share link
pub const SHARE_MEDIA: &[&str] = &["twitter", "facebook", "email"];

/// Build the share link for `medium` pointing at `view_url`
pub fn share_link(medium: &str, view_url: &Url) -> Option<Url> {
    let target = view_url.as_str();
    let link = match medium {
        "twitter" => Url::parse_with_params("https://twitter.com/intent/tweet", [("url", target)]),
        "facebook" => {
            Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", [("u", target)])
        }
        "email" => Url::parse_with_params("mailto:", [("body", target)]),
        _ => return None,
    };
    link.ok()
}

/// Receives share links produced on activation
pub type LinkSink = Arc<dyn Fn(&SharingElement, &Url) + Send + Sync>;

/// Integration that activates an element by handing its share link to a sink
pub struct LinkIntegration {
    sink: LinkSink,
}

impl LinkIntegration {
    /// Create an integration emitting links to `sink`
    pub fn new(sink: LinkSink) -> Self {
        Self { sink }
    }

    /// Register link integrations on `gate` for every supported medium in `media`
    pub fn register_all(gate: &mut SharingGate, media: &[String], sink: &LinkSink) {
        for medium in media {
            if SHARE_MEDIA.contains(&medium.as_str()) {
                gate.register(medium.clone(), Arc::new(Self::new(sink.clone())));
            } else {
                warn!(medium = %medium, "no share link available for medium");
            }
        }
    }
}

impl SharingIntegration for LinkIntegration {
    fn activate(&self, element: &SharingElement, view_url: &Url) -> Result<()> {
        let link = share_link(&element.medium, view_url).ok_or_else(|| Error::Sharing {
            medium: element.medium.clone(),
            message: "no share link for medium".to_string(),
        })?;
        (self.sink)(element, &link);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::Activation;
    use std::sync::Mutex;

    fn view_url() -> Url {
        Url::parse("https://example.org/u/a b").unwrap()
    }

    #[test]
    fn test_twitter_link() {
        let link = share_link("twitter", &view_url()).unwrap();
        assert_eq!(
            link.as_str(),
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.org%2Fu%2Fa%2520b"
        );
    }

    #[test]
    fn test_email_link() {
        let link = share_link("email", &view_url()).unwrap();
        assert_eq!(link.scheme(), "mailto");
        assert!(link.query().unwrap().starts_with("body="));
    }

    #[test]
    fn test_unknown_medium() {
        assert!(share_link("myspace", &view_url()).is_none());
    }

    #[test]
    fn test_register_all_skips_unknown() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let sink: LinkSink = Arc::new(move |element, link| {
            sink_seen
                .lock()
                .unwrap()
                .push(format!("{}={}", element.medium, link.host_str().unwrap_or("")));
        });

        let mut gate = SharingGate::new();
        LinkIntegration::register_all(
            &mut gate,
            &["facebook".to_string(), "myspace".to_string()],
            &sink,
        );
        assert!(gate.has_integration("facebook"));
        assert!(!gate.has_integration("myspace"));

        gate.arm(view_url(), vec![SharingElement::for_medium("facebook")]);
        assert_eq!(Activation::run_all(gate.reveal_all()), 1);
        assert_eq!(*seen.lock().unwrap(), vec!["facebook=www.facebook.com"]);
    }
}
