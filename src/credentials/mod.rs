//! Credential store: creates and verifies username/password pairs.
//!
//! Uniqueness of usernames is left entirely to the repository's atomic
//! insert. There is no lookup before insert, so two concurrent signups for
//! the same name cannot both succeed.

pub mod error;
pub mod hasher;
pub mod memory;
pub mod repository;

pub use self::error::{CredentialError, HashError, PersistenceError};
pub use self::hasher::{BcryptHasher, PasswordHasher};
pub use self::memory::MemoryUserRepository;
pub use self::repository::{InsertOutcome, PgUserRepository, UserRecord, UserRepository};

use secrecy::{ExposeSecret, SecretString};
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{debug, info, instrument};

/// Default bound on every repository call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Confirmation returned by a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registered;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    pub username: String,
}

pub struct CredentialStore {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    timeout: Duration,
}

impl CredentialStore {
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            hasher,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a user record holding a salted hash of `password`.
    ///
    /// # Errors
    /// - [`CredentialError::Validation`] when either field is empty
    /// - [`CredentialError::InvalidField`] when the username contains NUL
    /// - [`CredentialError::DuplicateUsername`] when the username is taken
    /// - [`CredentialError::Persistence`] when the store fails or times out
    /// - [`CredentialError::Hashing`] when the hasher fails
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Registered, CredentialError> {
        validate(username, password)?;

        let password_hash = self.hash(password).await?;
        let record = UserRecord::new(username.to_string(), password_hash);

        match self.bounded(self.repository.insert(&record)).await? {
            InsertOutcome::Created => {
                info!("user registered");
                Ok(Registered)
            }
            InsertOutcome::Conflict => {
                debug!("username already taken");
                Err(CredentialError::DuplicateUsername)
            }
        }
    }

    /// Check `password` against the stored hash for `username`.
    ///
    /// # Errors
    /// - [`CredentialError::Validation`] when either field is empty
    /// - [`CredentialError::InvalidField`] when the username contains NUL
    /// - [`CredentialError::UserNotFound`] when no record exists
    /// - [`CredentialError::InvalidCredentials`] when the password does not match
    /// - [`CredentialError::Persistence`] when the store fails or times out
    /// - [`CredentialError::Hashing`] when the stored hash cannot be read
    #[instrument(skip(self, password))]
    pub async fn verify(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Verified, CredentialError> {
        validate(username, password)?;

        let record = self
            .bounded(self.repository.find_by_username(username))
            .await?
            .ok_or(CredentialError::UserNotFound)?;

        if self.matches(password, record.password_hash).await? {
            debug!("password verified");
            Ok(Verified {
                username: record.username,
            })
        } else {
            debug!("password mismatch");
            Err(CredentialError::InvalidCredentials)
        }
    }

    /// # Errors
    /// Returns an error if the repository is unreachable within the timeout.
    pub async fn ping(&self) -> Result<(), PersistenceError> {
        self.bounded(self.repository.ping()).await
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, PersistenceError>>,
    ) -> Result<T, PersistenceError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| PersistenceError::Timeout(self.timeout))?
    }

    async fn hash(&self, password: &SecretString) -> Result<String, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
            .await
            .map_err(|e| HashError::Task(e.to_string()))?
    }

    async fn matches(&self, password: &SecretString, hash: String) -> Result<bool, HashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();

        tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &hash))
            .await
            .map_err(|e| HashError::Task(e.to_string()))?
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn validate(username: &str, password: &SecretString) -> Result<(), CredentialError> {
    if username.is_empty() {
        return Err(CredentialError::Validation("username"));
    }

    // Postgres TEXT cannot hold NUL
    if username.contains('\0') {
        return Err(CredentialError::InvalidField("username"));
    }

    if password.expose_secret().is_empty() {
        return Err(CredentialError::Validation("password"));
    }

    Ok(())
}
