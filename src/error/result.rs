//! Result type alias for tutor operations.

use super::context::ErrorContext;
use super::tutor_error::TutorError;

/// Type alias for Results using TutorError.
pub type TutorResult<T> = Result<T, TutorError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err. The closure only runs
    /// on error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tutor::error::{ErrorContext, ResultExt};
    ///
    /// let audio = client.request_speech(&request).await
    ///     .with_context(|| ErrorContext::new("text-to-speech"))?;
    /// ```
    fn with_context<F>(self, f: F) -> TutorResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<TutorError>,
{
    fn with_context<F>(self, f: F) -> TutorResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
