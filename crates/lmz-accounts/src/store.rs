use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{Account, AccountError, NewAccount, Result};

/// In-memory account directory
///
/// Cheap to clone; clones share the same directory.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    inner: Arc<RwLock<Directory>>,
}

#[derive(Debug)]
struct Directory {
    accounts: IndexMap<u64, Account>,
    next_id: u64,
}

impl Default for Directory {
    fn default() -> Self {
        Self {
            accounts: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl Directory {
    fn find_email(&self, email: &str) -> Option<u64> {
        self.accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .map(|a| a.id)
    }

    fn insert(&mut self, request: &NewAccount) -> Result<Account> {
        let (email, display_name) = request.validate()?;

        if let Some(existing_id) = self.find_email(&email) {
            return Err(AccountError::DuplicateEmail { email, existing_id });
        }

        let account = Account {
            id: self.next_id,
            email,
            display_name,
        };
        self.next_id += 1;
        self.accounts.insert(account.id, account.clone());

        Ok(account)
    }
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON seed file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// seeded account is invalid or duplicated
    pub async fn from_seed_file(path: &Path) -> Result<Self> {
        let store = Self::new();
        let count = store.import(path).await?;
        tracing::info!(path = %path.display(), count, "seeded account directory");
        Ok(store)
    }

    /// Import every account in a JSON seed file
    ///
    /// The import is all-or-nothing: if any entry fails validation, no
    /// account from the file is added.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// entry is invalid or duplicated
    pub async fn import(&self, path: &Path) -> Result<usize> {
        let requests = read_seed(path).await?;

        let mut directory = self.inner.write().await;

        // Stage on a copy so a bad entry leaves the directory untouched
        let mut staged = Directory {
            accounts: directory.accounts.clone(),
            next_id: directory.next_id,
        };
        for request in &requests {
            staged.insert(request)?;
        }
        *directory = staged;

        Ok(requests.len())
    }

    /// Replace the whole directory with the contents of a seed file
    ///
    /// Ids restart from 1. On any error the current directory is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// entry is invalid or duplicated
    pub async fn reload(&self, path: &Path) -> Result<usize> {
        let requests = read_seed(path).await?;

        let mut fresh = Directory::default();
        for request in &requests {
            fresh.insert(request)?;
        }
        *self.inner.write().await = fresh;

        tracing::info!(path = %path.display(), count = requests.len(), "account directory reloaded");
        Ok(requests.len())
    }

    /// Look up an account by id
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if no account has this id
    pub async fn get(&self, id: u64) -> Result<Account> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or(AccountError::NotFound { id })
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns an error if a field is missing, the email is malformed, or
    /// the email is already registered
    pub async fn create(&self, request: NewAccount) -> Result<Account> {
        let account = self.inner.write().await.insert(&request)?;
        tracing::debug!(id = account.id, "account created");
        Ok(account)
    }

    /// Remove an account
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if no account has this id
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.inner
            .write()
            .await
            .accounts
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(AccountError::NotFound { id })
    }

    /// All accounts ordered by id
    pub async fn list(&self) -> Vec<Account> {
        self.inner.read().await.accounts.values().cloned().collect()
    }
}

async fn read_seed(path: &Path) -> Result<Vec<NewAccount>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AccountError::SeedUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| AccountError::SeedMalformed {
        path: path.to_path_buf(),
        source,
    })
}
