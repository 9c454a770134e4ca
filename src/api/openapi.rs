#![allow(clippy::needless_for_each)]

use super::handlers::{
    credentials::UserCredentials, health, health::__path_health, signin::__path_signin,
    signup::__path_signup,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health, signup, signin),
    components(schemas(health::Health, UserCredentials)),
    tags(
        (name = "credentials", description = "Username and password signup and signin"),
        (name = "health", description = "Service and database health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
