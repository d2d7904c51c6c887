//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - scripted streaming responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
