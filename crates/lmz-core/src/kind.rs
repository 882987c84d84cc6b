use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Category of an expected failure
///
/// Selects the response shape at the boundary. Domain errors pick one
/// when converting into [`ExpectedError`](crate::ExpectedError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Request was malformed or carried an invalid value
    InvalidRequest,
    /// Caller did not authenticate
    Unauthenticated,
    /// Caller is authenticated but not allowed to do this
    PermissionDenied,
    /// Addressed resource does not exist
    NotFound,
    /// Resource exists but does not support the request method
    MethodNotAllowed,
    /// Request conflicts with the current state of a resource
    Conflict,
    /// Request was well-formed but failed semantic validation
    Unprocessable,
    /// Caller exceeded a rate limit
    RateLimited,
    /// A dependency needed to serve the request is unavailable
    Unavailable,
}

impl ErrorKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 9] = [
        Self::InvalidRequest,
        Self::Unauthenticated,
        Self::PermissionDenied,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::Conflict,
        Self::Unprocessable,
        Self::RateLimited,
        Self::Unavailable,
    ];

    /// HTTP status code for this kind
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable error type string for response bodies
    #[must_use]
    pub const fn error_type(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request_error",
            Self::Unauthenticated => "authentication_error",
            Self::PermissionDenied => "permission_error",
            Self::NotFound => "not_found_error",
            Self::MethodNotAllowed => "method_not_allowed_error",
            Self::Conflict => "conflict_error",
            Self::Unprocessable => "validation_error",
            Self::RateLimited => "rate_limit_error",
            Self::Unavailable => "unavailable_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_a_client_error_or_unavailable() {
        for kind in ErrorKind::ALL {
            let status = kind.status_code();
            assert!(
                status.is_client_error() || status == StatusCode::SERVICE_UNAVAILABLE,
                "{kind} mapped to {status}"
            );
        }
    }

    #[test]
    fn error_types_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in ErrorKind::ALL {
            assert!(seen.insert(kind.error_type()), "duplicate type for {kind:?}");
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ErrorKind::PermissionDenied).unwrap();
        assert_eq!(json, "\"permission_denied\"");
    }
}
