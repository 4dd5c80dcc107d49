//! HTTPS client for the document generation service
//!
//! Thin pass-through: one request per call, no retry, no timeout. Non-success
//! statuses surface as `Error::Upstream` with the response body attached.

use reqwest::{Response, StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::protocol::{GenerationCreated, GenerationRequest};

/// Header carrying the service API key
const API_KEY_HEADER: &str = "X-API-KEY";

/// Client handle for the generation service
#[derive(Clone)]
pub struct GammaClient {
    http: reqwest::Client,
    api_url: Url,
    api_key: String,
}

impl std::fmt::Debug for GammaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GammaClient")
            .field("api_url", &self.api_url.as_str())
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}

impl GammaClient {
    /// Create a client for the generations endpoint at `api_url`
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_url = api_url.into();
        let api_url = Url::parse(api_url.trim_end_matches('/'))
            .map_err(|e| Error::Protocol(format!("invalid generation service URL: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::Protocol(format!(
                "generation service URL cannot take a path: {api_url}"
            )));
        }

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_url,
            api_key: api_key.into(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Submit a document and return the generation job id
    #[instrument(skip(self, request), fields(input_len = request.input_text.len()))]
    pub async fn submit(&self, request: &GenerationRequest) -> Result<String> {
        let response = self
            .http
            .post(self.api_url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let text = Self::success_text(response).await?;
        let created: GenerationCreated = serde_json::from_str(&text)
            .map_err(|e| Error::Protocol(format!("invalid generation response: {e}")))?;

        debug!(generation_id = %created.generation_id, "Generation submitted");
        Ok(created.generation_id)
    }

    /// Fetch the status payload of a generation job, verbatim
    #[instrument(skip(self))]
    pub async fn poll_status(&self, generation_id: &str) -> Result<Value> {
        let url = self.status_url(generation_id)?;
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let text = Self::success_text(response).await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Protocol(format!("invalid status response: {e}")))
    }

    /// Endpoint of one generation job, with the id as a single escaped segment
    fn status_url(&self, generation_id: &str) -> Result<Url> {
        if matches!(generation_id, "" | "." | "..") {
            return Err(Error::Protocol(format!(
                "invalid generation id: {generation_id:?}"
            )));
        }
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Protocol("generation service URL cannot take a path".to_string()))?
            .pop_if_empty()
            .push(generation_id);
        Ok(url)
    }

    /// Read the body, failing with `Upstream` on a non-success status
    async fn success_text(response: Response) -> Result<String> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }

        warn!(status = status.as_u16(), "Generation service returned an error");
        Err(Error::Upstream {
            status: status.as_u16(),
            body: upstream_body(status, &text),
        })
    }
}

/// Parse an error body as JSON, wrapping plain text as `{"message": text}`
fn upstream_body(status: StatusCode, text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) if text.is_empty() => json!({ "message": status.canonical_reason().unwrap_or("") }),
        Err(_) => json!({ "message": text }),
    }
}
