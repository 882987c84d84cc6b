use std::sync::Arc;

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header;
use lmz_config::ErrorsConfig;
use lmz_core::{Context, ContextValue, HttpError};
use serde::Serialize;

use crate::error::{ApiError, ErrorReport};

const REDACTED: &str = "[redacted]";

/// Decides which parts of an error reach API consumers
#[derive(Debug, Clone)]
pub struct ErrorPolicy {
    expose_context: bool,
    redact_keys: Vec<String>,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            expose_context: true,
            redact_keys: Vec::new(),
        }
    }
}

impl From<&ErrorsConfig> for ErrorPolicy {
    fn from(config: &ErrorsConfig) -> Self {
        Self {
            expose_context: config.expose_context,
            redact_keys: config.redact_keys.clone(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: ErrorDetails<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetails<'a> {
    r#type: &'a str,
    message: String,
    code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<Context>,
}

impl ErrorPolicy {
    /// Render an error into a JSON response
    pub fn render<E: HttpError + ?Sized>(&self, error: &E) -> Response {
        let status = error.status_code();

        let body = ErrorResponse {
            error: ErrorDetails {
                r#type: error.error_type(),
                message: error.client_message(),
                code: status.as_u16(),
                context: self.visible_context(error.client_context()),
            },
        };

        (status, Json(body)).into_response()
    }

    fn visible_context(&self, context: Option<&Context>) -> Option<Context> {
        if !self.expose_context {
            return None;
        }

        let mut context = context?.clone();
        for key in &self.redact_keys {
            if let Some(value) = context.get_mut(key) {
                *value = ContextValue::from(REDACTED);
            }
        }
        Some(context)
    }
}

/// Middleware that logs handler errors and renders them under the policy
///
/// Responses produced by [`ApiError`] carry an [`ErrorReport`]; everything
/// else passes through untouched. Headers set on the original error response
/// are kept, except the body headers the re-render replaces.
pub async fn error_boundary_middleware(policy: Arc<ErrorPolicy>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let error = report.error();
    let status = error.status_code().as_u16();

    match error {
        ApiError::Expected(err) => {
            tracing::warn!(
                %method,
                %path,
                status,
                kind = %err.kind(),
                error_message = err.message(),
                chain = %err.display_chain(),
                "request failed with expected error"
            );
        }
        ApiError::Internal(err) => {
            tracing::error!(%method, %path, status, error = %format!("{err:#}"), "request failed with internal error");
        }
    }

    let mut rendered = policy.render(error);
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}
