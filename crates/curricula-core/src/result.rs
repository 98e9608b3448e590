//! Convenience result type alias for Curricula.

use crate::error::AppError;

/// A specialized `Result` type for Curricula operations.
pub type AppResult<T> = Result<T, AppError>;
