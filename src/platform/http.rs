//! HTTP hosting service implementation

use crate::error::{Error, Result};
use crate::platform::{DiscoveryService, PersistenceService};
use crate::types::{Metadata, PublishRequest, SavedArtifact};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Connection timeout in seconds; in-flight requests are not timed out
const CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavePayload<'a> {
    html: &'a str,
    meta_data: &'a Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_protector: Option<&'a str>,
    published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

/// Hosting service client using reqwest
pub struct HttpPublisher {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpPublisher {
    /// Create a client for the service at `endpoint`
    pub fn new(endpoint: Url, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        // Url::join replaces the last segment unless the base ends with '/'
        let mut endpoint = endpoint;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Base URL of the service
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl PersistenceService for HttpPublisher {
    async fn save_code(
        &self,
        request: &PublishRequest,
        prior_url: Option<&Url>,
    ) -> Result<SavedArtifact> {
        let address = self.endpoint.join("publish")?;
        debug!(%address, published = request.published, "posting artifact");

        let payload = SavePayload {
            html: &request.code,
            meta_data: &request.metadata,
            data_protector: request.data_protector.as_deref(),
            published: request.published,
            url: prior_url.map(Url::as_str),
        };

        let response = self
            .authorize(self.client.post(address))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Submission {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "service rejected artifact");
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(Error::Submission { detail });
        }

        let saved: SavedArtifact = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("invalid publish response: {e}")))?;
        debug!(url = %saved.url, "artifact saved");
        Ok(saved)
    }
}

#[async_trait]
impl DiscoveryService for HttpPublisher {
    async fn discover(&self, url: &Url) -> Result<Option<Metadata>> {
        let mut address = self.endpoint.join("discover")?;
        address.query_pairs_mut().append_pair("url", url.as_str());
        debug!(%address, "discovering metadata");

        let response = self
            .authorize(self.client.get(address))
            .send()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                debug!(%status, "discovery refused credentials");
                return Err(Error::Auth(format!("discovery rejected with {status}")));
            }
            _ => {}
        }
        let metadata = response
            .error_for_status()
            .map_err(|e| Error::Discovery(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::Parse(format!("invalid discovery response: {e}")))?;
        Ok(Some(metadata))
    }
}
