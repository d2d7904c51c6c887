//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let client = mock_client(MockResponse::chunked(body.as_bytes(), 3));
//! let mut handler = RecordingHandler::default();
//! client.run(&chat_request(), &mut handler, &CancellationToken::new()).await;
//! assert_eq!(handler.calls, vec![Call::Close]);
//! ```

#![allow(dead_code)]

pub use iris::adapters::{MockHttpClient, MockResponse};

use iris::client::IrisClient;
use iris::models::{ChatRequest, UiComponent};
use iris::traits::StreamHandler;
use serde_json::Value;

pub const BASE_URL: &str = "http://iris.test";

/// One handler invocation, as recorded by [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UiComponent(Vec<UiComponent>),
    TextChunk(String),
    MessageComplete(i64),
    Error(String),
    Close,
}

/// Handler that records every callback in order.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub calls: Vec<Call>,
}

impl RecordingHandler {
    /// Concatenation of every text chunk received.
    pub fn text(&self) -> String {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::TextChunk(chunk) => Some(chunk.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| wanted(call)).count()
    }
}

impl StreamHandler for RecordingHandler {
    fn on_ui_component(&mut self, components: Vec<UiComponent>) {
        self.calls.push(Call::UiComponent(components));
    }

    fn on_text_chunk(&mut self, chunk: &str) {
        self.calls.push(Call::TextChunk(chunk.to_string()));
    }

    fn on_message_complete(&mut self, message_id: i64) {
        self.calls.push(Call::MessageComplete(message_id));
    }

    fn on_error(&mut self, message: &str) {
        self.calls.push(Call::Error(message.to_string()));
    }

    fn on_close(&mut self) {
        self.calls.push(Call::Close);
    }
}

/// The request used throughout the integration tests.
pub fn chat_request() -> ChatRequest {
    ChatRequest::new("u1", "Is TCS a buy?", "t1").expect("valid request")
}

/// A client whose transport answers every request with `response`.
pub fn mock_client(response: MockResponse) -> IrisClient<MockHttpClient> {
    let http = MockHttpClient::new();
    http.set_default_response(response);
    IrisClient::with_http_client(BASE_URL, http)
}

/// One SSE block for `event` carrying `data`.
pub fn block(event: &str, data: Value) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

pub fn text_chunk(chunk: &str) -> String {
    block("text_chunk", serde_json::json!({ "chunk": chunk }))
}

pub fn message_complete(id: i64) -> String {
    block("message_complete", serde_json::json!({ "messageId": id }))
}

pub fn error_event(message: &str) -> String {
    block("error", serde_json::json!({ "error": message }))
}

pub fn end() -> String {
    block("end", serde_json::json!({}))
}
