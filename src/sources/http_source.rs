use crate::sources::error::SourceError;
use crate::sources::payload::ExternalPayload;
use crate::sources::{ExternalSource, FetchRequest};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

/// Posts the request to a results backend over HTTP.
///
/// The backend may answer with a bare [`ExternalPayload`] or wrap it as
/// `{"success": true, "data": {"current_weather": ..., "forecast": [...]}}`;
/// `{"success": false, ...}` is reported as [`SourceError::Rejected`].
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseBody {
    Envelope {
        success: bool,
        #[serde(default)]
        data: Option<ExternalPayload>,
        #[serde(default, alias = "error")]
        message: Option<String>,
    },
    Bare(ExternalPayload),
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn unwrap_body(bytes: &[u8]) -> Result<ExternalPayload, SourceError> {
        match serde_json::from_slice::<ResponseBody>(bytes) {
            Ok(ResponseBody::Envelope {
                success: true,
                data: Some(payload),
                ..
            }) => Ok(payload),
            Ok(ResponseBody::Envelope { success: true, .. }) => Err(SourceError::EmptyPayload),
            Ok(ResponseBody::Envelope { message, .. }) => Err(SourceError::Rejected(
                message.unwrap_or_else(|| "backend reported failure".to_string()),
            )),
            Ok(ResponseBody::Bare(payload)) => Ok(payload),
            // Re-parse as a bare payload to surface a useful serde error
            Err(_) => ExternalPayload::from_slice(bytes),
        }
    }
}

#[async_trait]
impl ExternalSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<ExternalPayload, SourceError> {
        info!("Requesting weather results from {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SourceError::NetworkRequest(self.url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", self.url, e);
                return Err(if let Some(status) = e.status() {
                    SourceError::HttpStatus {
                        url: self.url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    SourceError::NetworkRequest(self.url.clone(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::NetworkRequest(self.url.clone(), e))?;
        Self::unwrap_body(&bytes)
    }
}
