use super::{error_response, success_response, CredentialsBody, UserCredentials};
use crate::{api::config::ServerConfig, credentials::CredentialStore};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, response::Response};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path= "/signin",
    request_body(
        description = "Username and password, as JSON or an urlencoded form",
        content(
            (UserCredentials = "application/json"),
            (UserCredentials = "application/x-www-form-urlencoded")
        )
    ),
    responses (
        (status = 200, description = "Login successful", body = String, content_type = "text/plain"),
        (status = 303, description = "Login successful, redirecting to the configured page"),
        (status = 400, description = "Missing fields or invalid credentials", body = String),
        (status = 404, description = "User not found", body = String),
        (status = 500, description = "Server error during signin", body = String),
    ),
    tag= "credentials"
)]
// axum handler for signin
#[instrument(skip(store, config, body))]
pub async fn signin(
    store: Extension<Arc<CredentialStore>>,
    config: Extension<Arc<ServerConfig>>,
    body: CredentialsBody,
) -> Response {
    let CredentialsBody(user) = body;

    debug!("user: {:?}", user);

    match store.verify(&user.username, &user.password).await {
        Ok(verified) => {
            debug!("Login successful for {}", verified.username);

            success_response(
                StatusCode::OK,
                "Login successful",
                config.signin_redirect_url(),
            )
        }
        Err(e) => error_response(&e, "signin").into_response(),
    }
}
