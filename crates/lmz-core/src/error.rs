use http::StatusCode;

use crate::Context;

/// Trait for errors that can be converted to HTTP responses
///
/// Implemented by [`ExpectedError`](crate::ExpectedError) and by any
/// boundary error that wraps it. The server layer converts these into
/// actual HTTP responses, keeping domain errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `not_found_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Structured context that may be included in the response body
    ///
    /// `None` means nothing beyond the message may be exposed.
    fn client_context(&self) -> Option<&Context> {
        None
    }
}
