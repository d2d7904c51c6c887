//! Callback interface for chat stream consumers.

use crate::models::UiComponent;

/// Receives the events of one chat stream, in the order they arrived.
///
/// Every method is called synchronously from the read loop, so a slow handler
/// slows down reading (the next chunk is only requested once the handler has
/// returned). A panic inside a handler is not caught: it unwinds out of
/// [`IrisClient::run`](crate::client::IrisClient::run) and ends the stream.
pub trait StreamHandler: Send {
    /// A batch of UI component descriptors (one `ui_component` event).
    fn on_ui_component(&mut self, components: Vec<UiComponent>);

    /// An incremental fragment of the assistant's reply.
    fn on_text_chunk(&mut self, chunk: &str);

    /// The backend persisted the message under `message_id`.
    fn on_message_complete(&mut self, message_id: i64);

    /// A failure description, either sent by the backend or produced by the
    /// client when the connection could not be established.
    fn on_error(&mut self, message: &str);

    /// The stream is finished.
    ///
    /// Called after an `end` event and after a connection failure. Not called
    /// when the body simply runs out without an `end` event, nor after
    /// cancellation.
    fn on_close(&mut self);
}

impl<H: StreamHandler + ?Sized> StreamHandler for &mut H {
    fn on_ui_component(&mut self, components: Vec<UiComponent>) {
        (**self).on_ui_component(components)
    }

    fn on_text_chunk(&mut self, chunk: &str) {
        (**self).on_text_chunk(chunk)
    }

    fn on_message_complete(&mut self, message_id: i64) {
        (**self).on_message_complete(message_id)
    }

    fn on_error(&mut self, message: &str) {
        (**self).on_error(message)
    }

    fn on_close(&mut self) {
        (**self).on_close()
    }
}
