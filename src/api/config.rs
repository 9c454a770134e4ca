use crate::credentials::{hasher::DEFAULT_COST, DEFAULT_TIMEOUT};
use std::{path::PathBuf, time::Duration};

/// Runtime settings for the HTTP server and the credential store.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    views_dir: PathBuf,
    bcrypt_cost: u32,
    db_timeout: Duration,
    signup_redirect_url: Option<String>,
    signin_redirect_url: Option<String>,
}

impl ServerConfig {
    /// Defaults: `views` directory, bcrypt cost 10, 5s database timeout and
    /// plain-text responses instead of redirects.
    #[must_use]
    pub fn new() -> Self {
        Self {
            views_dir: PathBuf::from("views"),
            bcrypt_cost: DEFAULT_COST,
            db_timeout: DEFAULT_TIMEOUT,
            signup_redirect_url: None,
            signin_redirect_url: None,
        }
    }

    #[must_use]
    pub fn with_views_dir(mut self, views_dir: impl Into<PathBuf>) -> Self {
        self.views_dir = views_dir.into();
        self
    }

    #[must_use]
    pub const fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub const fn with_db_timeout(mut self, timeout: Duration) -> Self {
        self.db_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_signup_redirect_url(mut self, url: Option<String>) -> Self {
        self.signup_redirect_url = url;
        self
    }

    #[must_use]
    pub fn with_signin_redirect_url(mut self, url: Option<String>) -> Self {
        self.signin_redirect_url = url;
        self
    }

    #[must_use]
    pub fn views_dir(&self) -> &PathBuf {
        &self.views_dir
    }

    #[must_use]
    pub const fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    #[must_use]
    pub const fn db_timeout(&self) -> Duration {
        self.db_timeout
    }

    #[must_use]
    pub fn signup_redirect_url(&self) -> Option<&str> {
        self.signup_redirect_url.as_deref()
    }

    #[must_use]
    pub fn signin_redirect_url(&self) -> Option<&str> {
        self.signin_redirect_url.as_deref()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
