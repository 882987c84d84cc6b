//! Expected errors for LMZ services
//!
//! An [`ExpectedError`] is a failure anticipated by domain logic. It is
//! returned up the call chain unchanged and rendered into a structured
//! response by the boundary layer, which reaches every kind of expected
//! failure through the [`HttpError`] capability.

mod context;
mod error;
mod expected;
mod kind;
mod result_ext;

pub use context::{Context, ContextValue};
pub use error::HttpError;
pub use expected::{BoxError, Chain, ExpectedError};
pub use kind::ErrorKind;
pub use result_ext::ResultExt;
