use serde::{Deserialize, Serialize};

use crate::{AccountError, Result};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: u64,
    pub email: String,
    pub display_name: String,
}

/// Request to register an account
///
/// Fields are optional on the wire so that an absent field can be reported
/// by name instead of as a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NewAccount {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            display_name: Some(display_name.into()),
        }
    }

    /// Check required fields and email shape, returning trimmed values
    pub(crate) fn validate(&self) -> Result<(String, String)> {
        let email = required(self.email.as_deref(), "email")?;
        let display_name = required(self.display_name.as_deref(), "displayName")?;

        if !is_valid_email(email) {
            return Err(AccountError::InvalidEmail {
                email: email.to_owned(),
            });
        }

        Ok((email.to_owned(), display_name.to_owned()))
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AccountError::MissingField { field }),
    }
}

/// Check that an address looks like `local@domain.tld`
///
/// Exactly one `@`, a non-empty local part, and a domain containing a `.`
/// that is neither its first nor its last character. Whitespace anywhere is
/// rejected.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.nz"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "@example.com", "a@b", "a@.com", "a@com.", "a@@b.com", "a b@c.com", "a@b@c.com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn validate_trims_and_reports_missing_fields() {
        let (email, name) = NewAccount::new("  ada@example.com ", " Ada ").validate().unwrap();
        assert_eq!(email, "ada@example.com");
        assert_eq!(name, "Ada");

        let err = NewAccount {
            email: None,
            display_name: Some("Ada".to_owned()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AccountError::MissingField { field: "email" }));

        let err = NewAccount::new("ada@example.com", "   ").validate().unwrap_err();
        assert!(matches!(err, AccountError::MissingField { field: "displayName" }));
    }

    #[test]
    fn validate_rejects_bad_email() {
        let err = NewAccount::new("not-an-email", "Ada").validate().unwrap_err();
        assert!(matches!(err, AccountError::InvalidEmail { ref email } if email == "not-an-email"));
    }

    #[test]
    fn account_serializes_camel_case() {
        let account = Account {
            id: 1,
            email: "ada@example.com".to_owned(),
            display_name: "Ada".to_owned(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["displayName"], "Ada");
    }
}
