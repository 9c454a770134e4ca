use crate::{credentials::CredentialStore, GIT_COMMIT_HASH};
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Database is healthy", body = [Health]),
        (status = 503, description = "Database is unhealthy", body = [Health])
    ),
    tag= "health"
)]
// axum handler for health
pub async fn health(method: Method, store: Extension<Arc<CredentialStore>>) -> impl IntoResponse {
    let status = match store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(error) => {
            error!("Failed to ping database: {}", error);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if status.is_success() { "ok" } else { "error" }.to_string(),
    };

    debug!("health: {:?}", health);

    let headers = x_app_header(&health);

    // OPTIONS only carries the status and the X-App header
    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    (status, headers, body)
}

/// `name:version:short-commit`, empty commit part when the build had no git hash.
fn x_app_header(health: &Health) -> HeaderMap {
    let short_hash = health.commit.get(..7).filter(|_| health.commit.len() > 7);

    let mut headers = HeaderMap::new();

    match format!(
        "{}:{}:{}",
        health.name,
        health.version,
        short_hash.unwrap_or_default()
    )
    .parse::<HeaderValue>()
    {
        Ok(value) => {
            headers.insert("X-App", value);
        }
        Err(err) => error!("Failed to parse X-App header: {}", err),
    }

    headers
}
