//! IRIS API client.
//!
//! Sends one chat message and reads the streamed reply. Two shapes are offered
//! over the same read loop: [`IrisClient::run`] pushes events into a
//! [`StreamHandler`], [`IrisClient::events`] hands back a lazy `Stream`.

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::adapters::ReqwestHttpClient;
use crate::error::{classify_http_error, IrisError, IrisResult, NetworkError, StreamError};
use crate::models::ChatRequest;
use crate::sse::{EventReader, ReaderStats, StreamEvent};
use crate::startup::{IrisConfig, DEFAULT_API_URL};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError, StreamHandler};

/// Path of the streaming chat endpoint under the base URL.
pub const CHAT_STREAM_PATH: &str = "/chat/stream";

/// Shown to the handler when the backend cannot be reached or the connection
/// drops. The underlying error only goes to the log.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Sorry, I couldn't reach the IRIS server. Please try again.";

/// Events pulled lazily from one chat stream.
pub type EventStream = Pin<Box<dyn Stream<Item = IrisResult<StreamEvent>> + Send>>;

/// How a call to [`IrisClient::run`] finished.
#[derive(Debug)]
pub enum StreamOutcome {
    /// The server sent `end`
    Ended,
    /// The body ran out without an `end` event
    Exhausted,
    /// The request or the body failed
    Failed(IrisError),
    /// The cancellation token fired
    Cancelled,
}

impl StreamOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StreamOutcome::Ended | StreamOutcome::Exhausted)
    }
}

/// Result of one call to [`IrisClient::run`].
#[derive(Debug)]
pub struct StreamSummary {
    pub outcome: StreamOutcome,
    /// Events handed to the handler, `end` included
    pub events_dispatched: usize,
    /// Blocks skipped because they could not be decoded
    pub malformed_blocks: usize,
    /// Blocks skipped because their event name is unknown
    pub ignored_events: usize,
}

impl StreamSummary {
    fn new(outcome: StreamOutcome, stats: ReaderStats) -> Self {
        Self {
            outcome,
            events_dispatched: stats.events,
            malformed_blocks: stats.malformed_blocks,
            ignored_events: stats.ignored_events,
        }
    }
}

/// Client for the IRIS chat backend.
#[derive(Debug, Clone)]
pub struct IrisClient<C = ReqwestHttpClient> {
    /// Base URL for the IRIS API
    pub base_url: String,
    http: C,
}

impl IrisClient<ReqwestHttpClient> {
    /// Create a client for the default local backend.
    pub fn new() -> Self {
        Self::with_http_client(DEFAULT_API_URL, ReqwestHttpClient::new())
    }

    /// Create a client from validated configuration.
    pub fn from_config(config: &IrisConfig) -> IrisResult<Self> {
        config.validate()?;
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout).map_err(
            |e| IrisError::Config {
                message: format!("failed to build HTTP client: {}", e),
            },
        )?;
        Ok(Self::with_http_client(config.base_url.clone(), http))
    }
}

impl Default for IrisClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

enum Next {
    Cancelled,
    Chunk(Option<Result<bytes::Bytes, HttpError>>),
}

async fn next_chunk(body: &mut ByteStream, cancel: &CancellationToken) -> Next {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Next::Cancelled,
        item = body.next() => Next::Chunk(item),
    }
}

impl<C: HttpClient> IrisClient<C> {
    /// Create a client over any transport.
    pub fn with_http_client(base_url: impl Into<String>, http: C) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!("{}{}", self.base_url, CHAT_STREAM_PATH)
    }

    /// Send `request` and open the response body.
    ///
    /// Returns `Ok(None)` when `cancel` fires before the server answers.
    async fn open(
        &self,
        request: &ChatRequest,
        cancel: &CancellationToken,
    ) -> IrisResult<Option<ByteStream>> {
        request.validate()?;

        let url = self.stream_url();
        let body = serde_json::to_string(request).map_err(|e| NetworkError::Other {
            message: format!("failed to encode request: {}", e),
        })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        debug!(url = %url, "Sending chat request");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Ok(None),
            result = self.http.post_stream(&url, &body, &headers) => result
                .map(Some)
                .map_err(|e| classify_http_error(&e, &url).into()),
        }
    }

    /// Stream the reply to `request` into `handler`.
    ///
    /// Never fails: connection problems are reported to the handler as
    /// [`CONNECTION_ERROR_MESSAGE`] followed by `on_close`, and to the caller
    /// through [`StreamOutcome::Failed`]. Once `end` arrives the handler's
    /// `on_close` runs and everything after it is discarded.
    #[tracing::instrument(name = "chat_stream", skip_all, fields(thread_id = %request.thread_id))]
    pub async fn run<H: StreamHandler + ?Sized>(
        &self,
        request: &ChatRequest,
        handler: &mut H,
        cancel: &CancellationToken,
    ) -> StreamSummary {
        let mut body = match self.open(request, cancel).await {
            Ok(Some(body)) => body,
            Ok(None) => {
                info!("Chat stream cancelled before the server answered");
                return StreamSummary::new(StreamOutcome::Cancelled, ReaderStats::default());
            }
            Err(err) => return fail(handler, err, ReaderStats::default()),
        };
        info!("Chat stream opened");

        let mut reader = EventReader::new();
        loop {
            if cancel.is_cancelled() {
                info!("Chat stream cancelled");
                return StreamSummary::new(StreamOutcome::Cancelled, reader.stats());
            }

            if let Some(event) = reader.next_event() {
                if dispatch(handler, event) {
                    info!("Chat stream ended");
                    return StreamSummary::new(StreamOutcome::Ended, reader.stats());
                }
                continue;
            }

            match next_chunk(&mut body, cancel).await {
                Next::Cancelled => {
                    info!("Chat stream cancelled");
                    return StreamSummary::new(StreamOutcome::Cancelled, reader.stats());
                }
                Next::Chunk(Some(Ok(chunk))) => reader.feed(&chunk),
                Next::Chunk(Some(Err(e))) => {
                    let err = StreamError::ConnectionLost {
                        message: e.to_string(),
                    };
                    return fail(handler, err.into(), reader.stats());
                }
                Next::Chunk(None) => {
                    let stats = reader.finish();
                    info!("Chat stream closed without an end event");
                    return StreamSummary::new(StreamOutcome::Exhausted, stats);
                }
            }
        }
    }

    /// Stream the reply to `request` as typed events.
    ///
    /// `End` is yielded as the last item when the server sends it. A transport
    /// failure while reading is yielded once, then the stream stops. When
    /// `cancel` fires the stream simply stops.
    pub async fn events(
        &self,
        request: &ChatRequest,
        cancel: CancellationToken,
    ) -> IrisResult<EventStream> {
        let body = match self.open(request, &cancel).await? {
            Some(body) => body,
            None => return Err(StreamError::Cancelled.into()),
        };
        info!(thread_id = %request.thread_id, "Chat stream opened");

        let state = PullState {
            body,
            reader: EventReader::new(),
            cancel,
            done: false,
        };

        let events = stream::unfold(state, |mut state| async move {
            if state.done {
                return None;
            }
            loop {
                if state.cancel.is_cancelled() {
                    debug!("Chat stream cancelled");
                    return None;
                }

                if let Some(event) = state.reader.next_event() {
                    state.done = event.is_terminal();
                    return Some((Ok(event), state));
                }

                match next_chunk(&mut state.body, &state.cancel).await {
                    Next::Cancelled => {
                        debug!("Chat stream cancelled");
                        return None;
                    }
                    Next::Chunk(Some(Ok(chunk))) => state.reader.feed(&chunk),
                    Next::Chunk(Some(Err(e))) => {
                        error!(error = %e, "Chat stream connection lost");
                        state.done = true;
                        let err = StreamError::ConnectionLost {
                            message: e.to_string(),
                        };
                        return Some((Err(err.into()), state));
                    }
                    Next::Chunk(None) => {
                        state.reader.finish();
                        return None;
                    }
                }
            }
        });

        Ok(Box::pin(events))
    }
}

struct PullState {
    body: ByteStream,
    reader: EventReader,
    cancel: CancellationToken,
    done: bool,
}

/// Hand one event to the handler. Returns true once the stream is over.
fn dispatch<H: StreamHandler + ?Sized>(handler: &mut H, event: StreamEvent) -> bool {
    debug!(event = event.event_name(), "Dispatching event");
    match event {
        StreamEvent::UiComponent(components) => handler.on_ui_component(components),
        StreamEvent::TextChunk { chunk } => handler.on_text_chunk(&chunk),
        StreamEvent::MessageComplete { message_id } => handler.on_message_complete(message_id),
        StreamEvent::Error { error } => {
            warn!(error = %error, "Backend reported an error");
            handler.on_error(&error);
        }
        StreamEvent::End => {
            handler.on_close();
            return true;
        }
    }
    false
}

fn fail<H: StreamHandler + ?Sized>(
    handler: &mut H,
    err: IrisError,
    stats: ReaderStats,
) -> StreamSummary {
    error!(
        code = err.error_code(),
        category = %err.category(),
        retryable = err.is_retryable(),
        error = %err,
        "Chat stream failed"
    );
    handler.on_error(CONNECTION_ERROR_MESSAGE);
    handler.on_close();
    StreamSummary::new(StreamOutcome::Failed(err), stats)
}
