//! Mock `MaznaClient` used by unit tests.
#![cfg(test)]

use async_trait::async_trait;
use tokio::sync::Mutex;

use mazna_client::{
    Credentials, Entry, EntryCreated, EntryUpdate, LoginResponse, MaznaClient, MaznaError,
    MessageResponse, NewAccount, NewEntry,
};

/// Answers `list_entries` with a canned result and records the account asked for.
/// Every other operation reports `NotFound`.
pub struct MockClient {
    entries: Result<Vec<Entry>, u16>,
    last_account_id: Mutex<Option<Option<i64>>>,
}

impl MockClient {
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Ok(entries),
            last_account_id: Mutex::new(None),
        }
    }

    pub fn empty() -> Self {
        Self::with_entries(Vec::new())
    }

    /// `list_entries` fails as if the backend answered `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            entries: Err(status),
            last_account_id: Mutex::new(None),
        }
    }

    /// `None` until `list_entries` has been called.
    pub async fn last_account_id(&self) -> Option<Option<i64>> {
        *self.last_account_id.lock().await
    }
}

fn unsupported(op: &str) -> MaznaError {
    MaznaError::NotFound(format!("{op} is not mocked"))
}

#[async_trait]
impl MaznaClient for MockClient {
    async fn list_entries(&self, account_id: Option<i64>) -> Result<Vec<Entry>, MaznaError> {
        *self.last_account_id.lock().await = Some(account_id);
        match &self.entries {
            Ok(entries) => Ok(entries.clone()),
            Err(status) => Err(MaznaError::from_status(*status, "mock failure".to_string())),
        }
    }

    async fn get_entry(&self, _entry_id: i64) -> Result<Entry, MaznaError> {
        Err(unsupported("get_entry"))
    }

    async fn create_entry(&self, _entry: &NewEntry) -> Result<EntryCreated, MaznaError> {
        Err(unsupported("create_entry"))
    }

    async fn update_entry(
        &self,
        _entry_id: i64,
        _update: &EntryUpdate,
    ) -> Result<MessageResponse, MaznaError> {
        Err(unsupported("update_entry"))
    }

    async fn delete_entry(&self, _entry_id: i64) -> Result<(), MaznaError> {
        Err(unsupported("delete_entry"))
    }

    async fn validate_login(
        &self,
        _credentials: &Credentials,
    ) -> Result<LoginResponse, MaznaError> {
        Err(unsupported("validate_login"))
    }

    async fn create_account(&self, _account: &NewAccount) -> Result<MessageResponse, MaznaError> {
        Err(unsupported("create_account"))
    }
}
