use std::path::PathBuf;

use lmz_core::{Context, ErrorKind, ExpectedError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Account directory errors
#[derive(Debug, Error)]
pub enum AccountError {
    /// No account with this id
    #[error("account {id} not found")]
    NotFound { id: u64 },

    /// Email address is not well-formed
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    /// A required field was absent or blank
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// Another account already uses this email
    #[error("email {email} already registered to account {existing_id}")]
    DuplicateEmail { email: String, existing_id: u64 },

    /// Seed file could not be read
    #[error("failed to read account seed file {}", path.display())]
    SeedUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not a JSON array of accounts
    #[error("failed to parse account seed file {}", path.display())]
    SeedMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AccountError {
    /// Category used when this error reaches the boundary
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidEmail { .. } => ErrorKind::InvalidRequest,
            Self::MissingField { .. } => ErrorKind::Unprocessable,
            Self::DuplicateEmail { .. } => ErrorKind::Conflict,
            Self::SeedUnreadable { .. } | Self::SeedMalformed { .. } => ErrorKind::Unavailable,
        }
    }
}

impl From<AccountError> for ExpectedError {
    fn from(err: AccountError) -> Self {
        let kind = err.kind();
        match err {
            AccountError::NotFound { id } => {
                Self::new(kind, "user not found", Context::from([("userId", id.to_string())]))
            }
            AccountError::InvalidEmail { email } => Self::new(
                kind,
                "invalid email address",
                Context::new()
                    .with("field", "email")
                    .with("value", email)
                    .with("reason", "malformed"),
            ),
            AccountError::MissingField { field } => Self::new(
                kind,
                format!("missing required field: {field}"),
                Context::from([("field", field), ("reason", "required")]),
            ),
            AccountError::DuplicateEmail { existing_id, .. } => Self::new(
                kind,
                "email already registered",
                Context::new()
                    .with("field", "email")
                    .with("reason", "duplicate")
                    .with("existingId", existing_id),
            ),
            // Path and parse detail stay in the cause chain for logs only
            err @ (AccountError::SeedUnreadable { .. } | AccountError::SeedMalformed { .. }) => Self::with_cause(
                kind,
                "account directory unavailable",
                Context::from([("resource", "accounts")]),
                err,
            ),
        }
    }
}
