//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `tutor::adapters::mock` and adds builders for
//! common response setups.

pub use tutor::adapters::mock::{ChunkSender, MockHttpClient, MockPlayer, MockResponse};
pub use tutor::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Stream the given chunks as the response body.
    pub fn with_stream(self, url: &str, chunks: &[String]) -> Self {
        let chunks = chunks.iter().map(|c| Bytes::from(c.clone())).collect();
        self.client.set_response(url, MockResponse::Stream(chunks));
        self
    }

    /// Respond with a status and no body.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::new())),
        );
        self
    }

    /// Configures a successful JSON response.
    #[allow(dead_code)]
    pub fn with_json_response(self, url: &str, json: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(200, Bytes::from(json.to_string()))),
        );
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
