//! Prelude module for convenient imports.
//!
//! ```ignore
//! use iris::prelude::*;
//! ```
//!
//! This will import:
//! - The client and its outcome types
//! - Request and reply model types
//! - The handler trait and stream events
//! - The unified error type

// Client
pub use crate::client::{IrisClient, StreamOutcome, StreamSummary, CONNECTION_ERROR_MESSAGE};

// Model types
pub use crate::models::{AssembledMessage, ChatRequest, ChatThread, MessageStatus, UiComponent};

// Events and handlers
pub use crate::sse::StreamEvent;
pub use crate::traits::StreamHandler;

// Errors
pub use crate::error::{IrisError, IrisResult};

// Cancellation
pub use tokio_util::sync::CancellationToken;
