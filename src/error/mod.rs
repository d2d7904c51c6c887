//! Error handling for the IRIS client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: [`NetworkError`] and [`StreamError`]
//! - **Unified Error Type**: [`IrisError`] consolidates them
//! - **Result Type Alias**: [`IrisResult<T>`]
//!
//! | Category | Description |
//! |----------|-------------|
//! | Network | Connection, timeout, lost stream |
//! | Server | Backend errors (5xx) |
//! | Client | Undecodable frames |
//! | User | Invalid request, cancellation |
//! | Configuration | Bad `IRIS_*` settings |

mod category;
mod iris_error;
mod network;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use iris_error::IrisError;
pub use network::{classify_http_error, NetworkError};
pub use result::IrisResult;
pub use stream::StreamError;
