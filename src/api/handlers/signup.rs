use super::{error_response, success_response, CredentialsBody, UserCredentials};
use crate::{api::config::ServerConfig, credentials::CredentialStore};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, response::Response};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    post,
    path= "/signup",
    request_body(
        description = "Username and password, as JSON or an urlencoded form",
        content(
            (UserCredentials = "application/json"),
            (UserCredentials = "application/x-www-form-urlencoded")
        )
    ),
    responses (
        (status = 201, description = "Signup successful", body = String, content_type = "text/plain"),
        (status = 303, description = "Signup successful, redirecting to the configured page"),
        (status = 400, description = "Missing username or password, or the username is already taken", body = String),
        (status = 500, description = "Server error during signup", body = String),
    ),
    tag= "credentials"
)]
// axum handler for signup
#[instrument(skip(store, config, body))]
pub async fn signup(
    store: Extension<Arc<CredentialStore>>,
    config: Extension<Arc<ServerConfig>>,
    body: CredentialsBody,
) -> Response {
    let CredentialsBody(user) = body;

    debug!("user: {:?}", user);

    match store.register(&user.username, &user.password).await {
        Ok(_) => success_response(
            StatusCode::CREATED,
            "Signup successful",
            config.signup_redirect_url(),
        ),
        Err(e) => error_response(&e, "signup").into_response(),
    }
}
