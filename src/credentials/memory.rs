//! In-process [`UserRepository`] for tests and local experiments.

use super::error::PersistenceError;
use super::repository::{InsertOutcome, UserRecord, UserRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Map keyed by username; the lock makes insert-if-absent atomic.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().map_or(0, |users| users.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the stored record, if any.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.users
            .lock()
            .ok()
            .and_then(|users| users.get(username).cloned())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<InsertOutcome, PersistenceError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;

        if users.contains_key(&record.username) {
            return Ok(InsertOutcome::Conflict);
        }

        users.insert(record.username.clone(), record.clone());

        Ok(InsertOutcome::Created)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, PersistenceError> {
        let users = self.users.lock().map_err(|_| poisoned())?;

        Ok(users.get(username).cloned())
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        self.users.lock().map(|_| ()).map_err(|_| poisoned())
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Database(sqlx::Error::Protocol(
        "memory repository lock poisoned".to_string(),
    ))
}
