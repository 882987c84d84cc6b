use crate::{ContextValue, ExpectedError};

/// Extension trait for propagating expected errors through intermediate layers
///
/// Intermediate code should pass an expected failure up unchanged. The one
/// thing it may do on the way is add diagnostic context:
///
/// ```
/// use lmz_core::{ExpectedError, ResultExt};
///
/// fn load(_id: u64) -> Result<(), ExpectedError> {
///     Err(ExpectedError::not_found("user not found"))
/// }
///
/// let err = load(42).annotate("userId", 42_u64).unwrap_err();
/// assert_eq!(err.context().get("userId").and_then(|v| v.as_i64()), Some(42));
/// ```
pub trait ResultExt<T> {
    /// Convert the error into an [`ExpectedError`] and add one context entry
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and annotated
    fn annotate(self, key: impl Into<String>, value: impl Into<ContextValue>) -> Result<T, ExpectedError>;

    /// Like [`annotate`](Self::annotate) but only builds the value on failure
    ///
    /// # Errors
    ///
    /// Returns the original error, converted and annotated
    fn annotate_with<V, F>(self, key: impl Into<String>, value: F) -> Result<T, ExpectedError>
    where
        V: Into<ContextValue>,
        F: FnOnce() -> V;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ExpectedError>,
{
    fn annotate(self, key: impl Into<String>, value: impl Into<ContextValue>) -> Result<T, ExpectedError> {
        self.map_err(|e| e.into().with_context(key, value))
    }

    fn annotate_with<V, F>(self, key: impl Into<String>, value: F) -> Result<T, ExpectedError>
    where
        V: Into<ContextValue>,
        F: FnOnce() -> V,
    {
        self.map_err(|e| e.into().with_context(key, value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, ErrorKind};

    #[test]
    fn annotate_keeps_kind_message_and_existing_context() {
        let result: Result<(), ExpectedError> = Err(ExpectedError::new(
            ErrorKind::Conflict,
            "already exists",
            Context::from([("field", "email")]),
        ));

        let err = result.annotate("requestId", "abc").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "already exists");
        assert_eq!(err.context(), &Context::from([("field", "email"), ("requestId", "abc")]));
    }

    #[test]
    fn annotate_passes_ok_through() {
        let result: Result<u8, ExpectedError> = Ok(7);
        assert_eq!(result.annotate("unused", 1).unwrap(), 7);
    }

    #[test]
    fn annotate_with_is_lazy_on_success() {
        let result: Result<u8, ExpectedError> = Ok(1);
        let value = result
            .annotate_with("expensive", || -> String { panic!("must not be evaluated") })
            .unwrap();
        assert_eq!(value, 1);
    }
}
