//! Map validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{credentials, pages, ARG_DSN, ARG_PORT};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --dsn")?;

    let credential_opts = credentials::Options::parse(matches)?;
    let page_opts = pages::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        views_dir: page_opts.views_dir,
        bcrypt_cost: credential_opts.bcrypt_cost,
        db_timeout: credential_opts.db_timeout,
        signup_redirect_url: page_opts.signup_redirect_url,
        signin_redirect_url: page_opts.signin_redirect_url,
    }))
}
