use serde::{Deserialize, Serialize};

use super::ui_component::UiComponent;
use crate::traits::StreamHandler;

/// Lifecycle of an assistant message being reassembled from a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Events are still arriving
    #[default]
    Streaming,
    /// The stream finished without an error being reported
    Complete,
    /// An error was reported for this message
    Failed,
}

/// One assistant reply, rebuilt from the events of a single stream.
///
/// Implements [`StreamHandler`], so it can be handed straight to
/// [`IrisClient::run`](crate::client::IrisClient::run).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssembledMessage {
    /// Concatenation of every text chunk, in arrival order
    pub text_content: String,
    /// One entry per `ui_component` event
    pub ui_components: Vec<Vec<UiComponent>>,
    /// Durable id assigned by the backend on `message_complete`
    pub message_id: Option<i64>,
    /// Last error reported for this message
    pub error: Option<String>,
    pub status: MessageStatus,
}

impl AssembledMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text fragment.
    pub fn append_chunk(&mut self, chunk: &str) {
        self.text_content.push_str(chunk);
    }

    /// Record one batch of UI components.
    pub fn push_components(&mut self, components: Vec<UiComponent>) {
        self.ui_components.push(components);
    }

    /// Record an error and mark the message failed.
    ///
    /// Later chunks are still appended: the backend may keep streaming after
    /// reporting an error.
    pub fn fail(&mut self, error: &str) {
        self.error = Some(error.to_string());
        self.status = MessageStatus::Failed;
    }

    /// Mark the message finished. A failed message stays failed.
    pub fn finalize(&mut self) {
        if self.status == MessageStatus::Streaming {
            self.status = MessageStatus::Complete;
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.status == MessageStatus::Streaming
    }

    /// All UI components across every batch, in arrival order.
    pub fn components(&self) -> impl Iterator<Item = &UiComponent> {
        self.ui_components.iter().flatten()
    }
}

impl StreamHandler for AssembledMessage {
    fn on_ui_component(&mut self, components: Vec<UiComponent>) {
        self.push_components(components);
    }

    fn on_text_chunk(&mut self, chunk: &str) {
        self.append_chunk(chunk);
    }

    fn on_message_complete(&mut self, message_id: i64) {
        self.message_id = Some(message_id);
    }

    fn on_error(&mut self, message: &str) {
        self.fail(message);
    }

    fn on_close(&mut self) {
        self.finalize();
    }
}
