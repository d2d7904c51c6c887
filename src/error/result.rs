//! Result type alias for IRIS operations.

use super::iris_error::IrisError;

/// Type alias for Results using [`IrisError`].
pub type IrisResult<T> = Result<T, IrisError>;
