//! Error reporting capability.

use crate::error::AppError;

/// Accepts structured application errors.
///
/// Implementations forward each error as-is; they never filter, deduplicate,
/// rate-limit, or batch.
pub trait ErrorReporter: Send + Sync + 'static {
    /// Report one error.
    fn report_error(&self, error: AppError);
}
