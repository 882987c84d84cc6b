//! Account directory
//!
//! A small in-memory domain whose failures are expressed as
//! [`AccountError`] and handed to the boundary as
//! [`lmz_core::ExpectedError`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod account;
mod error;
mod store;

pub use account::{Account, NewAccount, is_valid_email};
pub use error::{AccountError, Result};
pub use store::AccountStore;
