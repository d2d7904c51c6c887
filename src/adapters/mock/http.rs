//! Mock HTTP client for testing.
//!
//! Streams are scripted chunk by chunk, so tests control exactly where the
//! body is split.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Deliver these chunks, then end the body
    Stream(Vec<Bytes>),
    /// Deliver these chunks, then fail the body with the error
    StreamThenError(Vec<Bytes>, HttpError),
    /// Deliver these chunks, then never produce another one
    StreamThenHang(Vec<Bytes>),
    /// Fail the request itself
    Error(HttpError),
}

impl MockResponse {
    /// Split `body` into chunks of at most `chunk_size` bytes.
    ///
    /// Splits fall on byte offsets, so multi-byte characters may be cut.
    pub fn chunked(body: &[u8], chunk_size: usize) -> Self {
        MockResponse::Stream(
            body.chunks(chunk_size.max(1))
                .map(Bytes::copy_from_slice)
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request(url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(stream::iter(items)))
            }
            Some(MockResponse::StreamThenHang(chunks)) => Ok(Box::pin(
                stream::iter(chunks.into_iter().map(Ok)).chain(stream::pending()),
            )),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://iris.test/chat/stream";

    async fn collect(stream: ByteStream) -> Vec<Result<Bytes, HttpError>> {
        stream.collect().await
    }

    #[tokio::test]
    async fn test_stream_chunks_in_order() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::chunked(b"abcdefg", 3));

        let stream = client.post_stream(URL, "{}", &Headers::new()).await.unwrap();
        let chunks: Vec<Bytes> = collect(stream)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        assert_eq!(
            chunks,
            vec![Bytes::from("abc"), Bytes::from("def"), Bytes::from("g")]
        );
    }

    #[tokio::test]
    async fn test_stream_then_error() {
        let client = MockHttpClient::new();
        client.set_response(
            URL,
            MockResponse::StreamThenError(
                vec![Bytes::from("partial")],
                HttpError::Io("reset".to_string()),
            ),
        );

        let stream = client.post_stream(URL, "{}", &Headers::new()).await.unwrap();
        let items = collect(stream).await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1], Err(HttpError::Io("reset".to_string())));
    }

    #[tokio::test]
    async fn test_request_error_and_recording() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        let result = client.post_stream(URL, r#"{"a":1}"#, &headers).await;
        assert!(matches!(result, Err(HttpError::ConnectionFailed(_))));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body, r#"{"a":1}"#);
        assert_eq!(
            requests[0].headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.post_stream(URL, "{}", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }
}
