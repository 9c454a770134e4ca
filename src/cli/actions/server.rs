use crate::api::{self, ServerConfig};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{path::PathBuf, time::Duration};
use tracing::{debug, info};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub views_dir: PathBuf,
    pub bcrypt_cost: u32,
    pub db_timeout: Duration,
    pub signup_redirect_url: Option<String>,
    pub signin_redirect_url: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the DSN is invalid, the database is unreachable, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let dsn = Url::parse(args.dsn.expose_secret()).context("invalid --dsn")?;

    info!("Connecting to database: {}", redact_dsn(&dsn));

    let config = ServerConfig::new()
        .with_views_dir(args.views_dir)
        .with_bcrypt_cost(args.bcrypt_cost)
        .with_db_timeout(args.db_timeout)
        .with_signup_redirect_url(args.signup_redirect_url)
        .with_signin_redirect_url(args.signin_redirect_url);

    debug!("Server config: {:?}", config);

    api::new(args.port, dsn.to_string(), config).await
}

/// Hide the password before the DSN reaches the logs.
fn redact_dsn(dsn: &Url) -> String {
    let mut redacted = dsn.clone();

    if redacted.password().is_some() {
        // only fails for cannot-be-a-base URLs, which carry no password
        let _ = redacted.set_password(Some("****"));
    }

    redacted.to_string()
}
