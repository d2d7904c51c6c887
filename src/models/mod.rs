mod message;
mod request;
mod thread;
mod ui_component;

pub use message::{AssembledMessage, MessageStatus};
pub use request::ChatRequest;
pub use thread::{ChatThread, ThreadEntry};
pub use ui_component::{ComponentView, DataPoint, PricePoint, UiComponent};
