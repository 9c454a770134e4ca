use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by `CredentialStore::register` and `CredentialStore::verify`.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// A required field was absent or empty.
    #[error("Missing {0}")]
    Validation(&'static str),

    /// A field holds a value the users table cannot store.
    #[error("Invalid {0}")]
    InvalidField(&'static str),

    #[error("User already exists")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Hashing(#[from] HashError),
}

/// The users table could not be reached or rejected the operation.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid bcrypt cost {0}, expected a value between 4 and 31")]
    InvalidCost(u32),

    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(String),
}
