use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

use crate::{Context, ContextValue, ErrorKind, HttpError};

/// Boxed underlying failure recorded as the cause of an expected error
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A failure anticipated by domain logic
///
/// Carries a message, a context mapping and optionally the failure that
/// triggered it. The message is always present but may be empty; the
/// context always exists but may be empty. Only the context can change
/// after construction.
///
/// Domain crates keep their own error enums and convert them into this
/// type, choosing the [`ErrorKind`] and context for each variant:
///
/// ```
/// use lmz_core::{Context, ErrorKind, ExpectedError};
///
/// let err = ExpectedError::new(
///     ErrorKind::NotFound,
///     "user not found",
///     Context::from([("userId", "42")]),
/// );
/// assert_eq!(err.message(), "user not found");
/// assert_eq!(err.context().get("userId").and_then(|v| v.as_str()), Some("42"));
/// ```
#[derive(Debug)]
pub struct ExpectedError {
    kind: ErrorKind,
    message: String,
    context: Context,
    cause: Option<BoxError>,
}

impl ExpectedError {
    /// Create an expected error without an underlying cause
    pub fn new(kind: ErrorKind, message: impl Into<String>, context: Context) -> Self {
        Self {
            kind,
            message: message.into(),
            context,
            cause: None,
        }
    }

    /// Create an expected error that wraps the failure which triggered it
    ///
    /// The cause may be any error, expected or not.
    pub fn with_cause(
        kind: ErrorKind,
        message: impl Into<String>,
        context: Context,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            context,
            cause: Some(cause.into()),
        }
    }

    /// Not-found error with an empty context
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, Context::new())
    }

    /// Invalid-request error with an empty context
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message, Context::new())
    }

    /// Conflict error with an empty context
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message, Context::new())
    }

    /// Permission-denied error with an empty context
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message, Context::new())
    }

    /// Unauthenticated error with an empty context
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message, Context::new())
    }

    /// Unavailable error with an empty context
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message, Context::new())
    }

    /// Add one context entry, replacing any existing value for the key
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.context.insert(key, value);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current context
    ///
    /// Borrowed read-only; use [`set_context`](Self::set_context) or
    /// [`context_mut`](Self::context_mut) to change it.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Replace the context wholesale
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    /// Mutable access for layers that annotate the error in place
    pub const fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// The failure recorded at construction, if any
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Iterate this error followed by every transitive source
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// All messages in the chain joined by `": "`, for diagnostics
    #[must_use]
    pub fn display_chain(&self) -> String {
        self.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ")
    }

    /// Split into kind, message, context and cause
    #[must_use]
    pub fn into_parts(self) -> (ErrorKind, String, Context, Option<BoxError>) {
        (self.kind, self.message, self.context, self.cause)
    }
}

impl fmt::Display for ExpectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ExpectedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|cause| &**cause as &(dyn StdError + 'static))
    }
}

impl HttpError for ExpectedError {
    fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    fn error_type(&self) -> &str {
        self.kind.error_type()
    }

    fn client_message(&self) -> String {
        self.message.clone()
    }

    fn client_context(&self) -> Option<&Context> {
        Some(&self.context)
    }
}

/// Iterator over an error and its sources, outermost first
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}
