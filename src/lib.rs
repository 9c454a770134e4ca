//! # Signet
//!
//! `signet` is a small signup/signin service. Users register a username and a
//! password; the password is stored only as a salted bcrypt hash, and later
//! sign-ins are checked against that hash.
//!
//! ## Credential store
//!
//! [`credentials::CredentialStore`] holds the only real logic:
//!
//! - **Register** hashes the password off the async workers and inserts the
//!   record in one statement. A unique index on `username` decides who wins
//!   when two signups race; the loser gets `DuplicateUsername`.
//! - **Verify** loads the record and compares the password with bcrypt.
//!   Unknown users and wrong passwords are reported separately.
//!
//! No session or token is issued after a successful sign-in.
//!
//! ## HTTP boundary
//!
//! [`api`] exposes `POST /signup` and `POST /signin` (JSON or form bodies), a
//! greeting on `/`, static pages from the views directory, and `/health`.

pub mod api;
pub mod cli;
pub mod credentials;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
