//! Tutor API client.
//!
//! Builds the requests for the two server endpoints on top of an
//! [`HttpClient`]: the streaming topic endpoint and one-shot text-to-speech.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{TutorConfig, DEFAULT_BASE_URL};
use crate::error::{ErrorContext, NetworkError, ResultExt, TutorResult};
use crate::models::{TopicRequest, TtsRequest, TtsResponse};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Client for the tutoring server.
#[derive(Clone)]
pub struct TutorClient {
    /// Server base URL, without a trailing slash
    pub base_url: String,
    stream_path: String,
    tts_path: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TutorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TutorClient")
            .field("base_url", &self.base_url)
            .field("stream_path", &self.stream_path)
            .field("tts_path", &self.tts_path)
            .finish_non_exhaustive()
    }
}

impl TutorClient {
    /// Create a client for the default local server.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            stream_path: "/".to_string(),
            tts_path: "/tts".to_string(),
            http,
        }
    }

    pub fn from_config(http: Arc<dyn HttpClient>, config: &TutorConfig) -> Self {
        let mut client = Self::with_base_url(http, config.base_url.clone());
        client.stream_path = config.stream_path.clone();
        client.tts_path = config.tts_path.clone();
        client
    }

    pub fn stream_url(&self) -> String {
        join_url(&self.base_url, &self.stream_path)
    }

    pub fn tts_url(&self) -> String {
        join_url(&self.base_url, &self.tts_path)
    }

    /// Open the response stream for a topic.
    ///
    /// A non-2xx status comes back as `HttpError::ServerError` and no body
    /// is read.
    pub async fn stream_topic(&self, request: &TopicRequest) -> Result<ByteStream, HttpError> {
        let url = self.stream_url();
        let body =
            serde_json::to_string(request).map_err(|e| HttpError::Other(e.to_string()))?;
        debug!(url = %url, "Opening tutoring stream");
        self.http.post_stream(&url, &body, &json_headers()).await
    }

    /// Ask the server to synthesize speech and return where to fetch it.
    ///
    /// Errors carry a `text-to-speech` context.
    pub async fn synthesize(&self, request: &TtsRequest) -> TutorResult<TtsResponse> {
        self.request_speech(request)
            .await
            .with_context(|| ErrorContext::new("text-to-speech").with_component("client"))
    }

    async fn request_speech(&self, request: &TtsRequest) -> TutorResult<TtsResponse> {
        let url = self.tts_url();
        let body = serde_json::to_string(request)?;

        let response = self
            .http
            .post(&url, &body, &json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;

        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).into_owned(),
            }
            .into());
        }

        let tts: TtsResponse = response.json()?;
        info!(audio_url = %tts.audio_url, "Speech synthesized");
        Ok(tts)
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
