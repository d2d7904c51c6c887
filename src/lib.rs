//! IRIS - streaming chat client for the IRIS financial analysis assistant.
//!
//! A chat request is sent with [`client::IrisClient`]; the reply arrives as
//! Server-Sent Events that are decoded by [`sse`] and delivered to a
//! [`traits::StreamHandler`] in arrival order.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod startup;
pub mod traits;
