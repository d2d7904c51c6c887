//! Trait abstractions at the seams of the chat client.
//!
//! - [`HttpClient`] - streaming HTTP transport
//! - [`StreamHandler`] - per-event callbacks for stream consumers

pub mod handler;
pub mod http;

pub use handler::StreamHandler;
pub use http::{ByteStream, Headers, HttpClient, HttpError};
