//! Password hashing collaborator.
//!
//! The store only talks to [`PasswordHasher`]; [`BcryptHasher`] is the
//! production implementation. Both calls are CPU bound and are always invoked
//! from `spawn_blocking` by the store, never on an async worker.

use super::error::HashError;

/// Lowest cost accepted by bcrypt.
pub const MIN_COST: u32 = 4;
/// Highest cost accepted by bcrypt.
pub const MAX_COST: u32 = 31;
/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash suitable for storage.
    ///
    /// # Errors
    /// Returns an error if the underlying algorithm fails.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Check `password` against a hash previously produced by [`PasswordHasher::hash`].
    ///
    /// # Errors
    /// Returns an error if `hash` is not a well-formed hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// # Errors
    /// Returns [`HashError::InvalidCost`] when `cost` is outside `4..=31`.
    pub fn new(cost: u32) -> Result<Self, HashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashError::InvalidCost(cost));
        }

        Ok(Self { cost })
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(bcrypt::verify(password, hash)?)
    }
}
