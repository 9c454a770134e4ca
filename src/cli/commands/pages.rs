use clap::{builder::ValueParser, Arg, ArgMatches, Command};
use std::path::PathBuf;
use url::Url;

pub const ARG_VIEWS_DIR: &str = "views-dir";
pub const ARG_SIGNUP_REDIRECT_URL: &str = "signup-redirect-url";
pub const ARG_SIGNIN_REDIRECT_URL: &str = "signin-redirect-url";

#[derive(Debug, Clone)]
pub struct Options {
    pub views_dir: PathBuf,
    pub signup_redirect_url: Option<String>,
    pub signin_redirect_url: Option<String>,
}

impl Options {
    /// Parse static page and redirect arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the views directory is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let views_dir = matches
            .get_one::<String>(ARG_VIEWS_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_VIEWS_DIR}"))?;

        Ok(Self {
            views_dir,
            signup_redirect_url: matches.get_one::<String>(ARG_SIGNUP_REDIRECT_URL).cloned(),
            signin_redirect_url: matches.get_one::<String>(ARG_SIGNIN_REDIRECT_URL).cloned(),
        })
    }
}

/// Accept absolute URLs (`https://...`) or paths on this server (`/signin.html`).
#[must_use]
pub fn validator_redirect_url() -> ValueParser {
    ValueParser::from(move |location: &str| -> std::result::Result<String, String> {
        if location.starts_with('/') && !location.starts_with("//") {
            return Ok(location.to_string());
        }

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(location.to_string()),
            Ok(url) => Err(format!("unsupported redirect scheme: {}", url.scheme())),
            Err(e) => Err(format!("invalid redirect URL: {e}")),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VIEWS_DIR)
                .long(ARG_VIEWS_DIR)
                .help("Directory with the static signup and signin pages")
                .env("SIGNET_VIEWS_DIR")
                .default_value("views"),
        )
        .arg(
            Arg::new(ARG_SIGNUP_REDIRECT_URL)
                .long(ARG_SIGNUP_REDIRECT_URL)
                .help("Redirect here after a successful signup instead of replying with text")
                .env("SIGNET_SIGNUP_REDIRECT_URL")
                .value_parser(validator_redirect_url()),
        )
        .arg(
            Arg::new(ARG_SIGNIN_REDIRECT_URL)
                .long(ARG_SIGNIN_REDIRECT_URL)
                .help("Redirect here after a successful signin instead of replying with text")
                .env("SIGNET_SIGNIN_REDIRECT_URL")
                .value_parser(validator_redirect_url()),
        )
}
