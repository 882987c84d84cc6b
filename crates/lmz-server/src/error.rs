use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use lmz_accounts::AccountError;
use lmz_core::{Context, ExpectedError, HttpError};
use thiserror::Error;

use crate::boundary::ErrorPolicy;

/// Failure returned by a request handler
///
/// Expected failures carry their own message and context. Anything else is
/// internal and renders as a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure anticipated by domain logic
    #[error(transparent)]
    Expected(#[from] ExpectedError),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self::Expected(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Expected(
            ExpectedError::invalid("malformed request body").with_context("reason", rejection.body_text()),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        // Missing route parameters are a routing bug, not a bad request
        if rejection.status().is_server_error() {
            return Self::Internal(anyhow::Error::new(rejection));
        }
        Self::Expected(
            ExpectedError::invalid("malformed path parameter").with_context("reason", rejection.body_text()),
        )
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Expected(err) => err.status_code(),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Expected(err) => err.error_type(),
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Expected(err) => err.client_message(),
            Self::Internal(_) => "an internal error occurred".to_owned(),
        }
    }

    fn client_context(&self) -> Option<&Context> {
        match self {
            Self::Expected(err) => err.client_context(),
            Self::Internal(_) => None,
        }
    }
}

/// Handler error carried in response extensions
///
/// Lets the error-boundary middleware log the original error and re-render
/// it under the configured policy.
#[derive(Debug, Clone)]
pub struct ErrorReport(Arc<ApiError>);

impl ErrorReport {
    pub fn error(&self) -> &ApiError {
        &self.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = ErrorPolicy::default().render(&self);
        response.extensions_mut().insert(ErrorReport(Arc::new(self)));
        response
    }
}
