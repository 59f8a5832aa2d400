//! Remix URL resolution

use crate::error::{Error, Result};
use url::Url;

/// Placeholder replaced by the escaped artifact path in remix templates
pub const VIEW_URL_PLACEHOLDER: &str = "{{VIEW_URL}}";

/// Default remix template used when none is configured
pub const DEFAULT_REMIX_TEMPLATE: &str = "https://example.org/remix/{{VIEW_URL}}";

/// Percent-encode each `/`-separated segment of an artifact path
pub fn escape_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve the remix URL for an artifact path
///
/// Every occurrence of [`VIEW_URL_PLACEHOLDER`] in `template` is replaced by
/// the escaped form of `path`.
pub fn resolve_remix_url(template: &str, path: &str) -> Result<Url> {
    if !template.contains(VIEW_URL_PLACEHOLDER) {
        return Err(Error::Parse(format!(
            "remix template has no {VIEW_URL_PLACEHOLDER} placeholder: {template}"
        )));
    }
    let resolved = template.replace(VIEW_URL_PLACEHOLDER, &escape_path(path));
    Ok(Url::parse(&resolved)?)
}
