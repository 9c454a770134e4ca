//! Route handlers and the mapping from credential errors to HTTP responses.

pub mod credentials;
pub mod health;
pub mod root;
pub mod signin;
pub mod signup;

pub use self::credentials::{CredentialsBody, UserCredentials};
pub use self::health::health;
pub use self::root::root;
pub use self::signin::signin;
pub use self::signup::signup;

use crate::credentials::CredentialError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

/// Render a credential failure. `action` names the operation in the
/// generic server error message ("signup" or "signin").
pub(crate) fn error_response(err: &CredentialError, action: &str) -> (StatusCode, String) {
    match err {
        CredentialError::Validation(_) | CredentialError::InvalidField(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        CredentialError::DuplicateUsername => {
            (StatusCode::BAD_REQUEST, "User already exists".to_string())
        }
        CredentialError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
        CredentialError::InvalidCredentials => {
            (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
        }
        CredentialError::Persistence(e) => {
            error!("{action} persistence error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error during {action}"),
            )
        }
        CredentialError::Hashing(e) => {
            error!("{action} hashing error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error during {action}"),
            )
        }
    }
}

/// Either a plain-text confirmation or a redirect, depending on configuration.
pub(crate) fn success_response(
    status: StatusCode,
    message: &str,
    redirect: Option<&str>,
) -> Response {
    match redirect {
        Some(location) => Redirect::to(location).into_response(),
        None => (status, message.to_string()).into_response(),
    }
}
