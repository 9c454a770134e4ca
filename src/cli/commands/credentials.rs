use crate::credentials::hasher::{MAX_COST, MIN_COST};
use clap::{builder::ValueParser, Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_BCRYPT_COST: &str = "bcrypt-cost";
pub const ARG_DB_TIMEOUT: &str = "db-timeout";

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub bcrypt_cost: u32,
    pub db_timeout: Duration,
}

impl Options {
    /// Parse credential store arguments from matches.
    ///
    /// # Errors
    /// Returns an error if an argument is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let bcrypt_cost = matches
            .get_one::<u32>(ARG_BCRYPT_COST)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_BCRYPT_COST}"))?;
        let db_timeout = matches
            .get_one::<u64>(ARG_DB_TIMEOUT)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_DB_TIMEOUT}"))?;

        Ok(Self {
            bcrypt_cost,
            db_timeout: Duration::from_secs(db_timeout),
        })
    }
}

#[must_use]
pub fn validator_bcrypt_cost() -> ValueParser {
    ValueParser::from(move |cost: &str| -> std::result::Result<u32, String> {
        let parsed = cost
            .parse::<u32>()
            .map_err(|_| format!("invalid bcrypt cost: {cost}"))?;

        if (MIN_COST..=MAX_COST).contains(&parsed) {
            Ok(parsed)
        } else {
            Err(format!("bcrypt cost must be between {MIN_COST} and {MAX_COST}"))
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_BCRYPT_COST)
                .long(ARG_BCRYPT_COST)
                .help("bcrypt work factor used when hashing new passwords")
                .env("SIGNET_BCRYPT_COST")
                .default_value("10")
                .value_parser(validator_bcrypt_cost()),
        )
        .arg(
            Arg::new(ARG_DB_TIMEOUT)
                .long(ARG_DB_TIMEOUT)
                .help("Timeout in seconds for each database operation")
                .env("SIGNET_DB_TIMEOUT")
                .default_value("5")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
