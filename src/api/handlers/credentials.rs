//! Request body shared by `/signup` and `/signin`.
//!
//! Browsers post the static forms as `application/x-www-form-urlencoded`;
//! API clients send JSON. Both decode into [`UserCredentials`]. Absent and
//! `null` fields decode as empty strings and are rejected by the credential
//! store.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Default)]
pub struct UserCredentials {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Extractor picking JSON or form decoding from the `Content-Type` header.
#[derive(Debug)]
pub struct CredentialsBody(pub UserCredentials);

#[async_trait]
impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(credentials) = Json::<UserCredentials>::from_request(req, state)
                .await
                .map_err(|rejection| (rejection.status(), rejection.body_text()))?;
            Ok(Self(credentials))
        } else {
            let Form(credentials) = Form::<UserCredentials>::from_request(req, state)
                .await
                .map_err(|rejection| (rejection.status(), rejection.body_text()))?;
            Ok(Self(credentials))
        }
    }
}

/// `application/json` or any `application/*+json`, ignoring case and parameters.
fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
        .and_then(|essence| {
            essence
                .strip_prefix("application/")
                .map(|subtype| subtype == "json" || subtype.ends_with("+json"))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use axum::body::Body;
    use secrecy::ExposeSecret;

    async fn extract(
        content_type: Option<&str>,
        body: &str,
    ) -> Result<CredentialsBody, (StatusCode, String)> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/signup");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
        CredentialsBody::from_request(request, &()).await
    }

    #[tokio::test]
    async fn decodes_json() -> Result<()> {
        let CredentialsBody(credentials) = extract(
            Some("application/json"),
            r#"{"username":"alice","password":"secret123"}"#,
        )
        .await
        .map_err(|(status, body)| anyhow::anyhow!("{status}: {body}"))?;

        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password.expose_secret(), "secret123");
        Ok(())
    }

    #[tokio::test]
    async fn decodes_form() -> Result<()> {
        let CredentialsBody(credentials) = extract(
            Some("application/x-www-form-urlencoded"),
            "username=alice&password=s%26cret",
        )
        .await
        .map_err(|(status, body)| anyhow::anyhow!("{status}: {body}"))?;

        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password.expose_secret(), "s&cret");
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_decode_empty() -> Result<()> {
        let CredentialsBody(credentials) = extract(Some("application/json"), "{}")
            .await
            .map_err(|(status, body)| anyhow::anyhow!("{status}: {body}"))?;

        assert!(credentials.username.is_empty());
        assert!(credentials.password.expose_secret().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn null_fields_decode_empty() -> Result<()> {
        let CredentialsBody(credentials) = extract(
            Some("application/json"),
            r#"{"username":null,"password":null}"#,
        )
        .await
        .map_err(|(status, body)| anyhow::anyhow!("{status}: {body}"))?;

        assert!(credentials.username.is_empty());
        assert!(credentials.password.expose_secret().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn json_media_type_ignores_case_and_accepts_suffix() -> Result<()> {
        for content_type in [
            "Application/JSON",
            "application/vnd.signet+json",
            "application/json; charset=utf-8",
        ] {
            let CredentialsBody(credentials) = extract(
                Some(content_type),
                r#"{"username":"alice","password":"secret123"}"#,
            )
            .await
            .map_err(|(status, body)| anyhow::anyhow!("{content_type}: {status}: {body}"))?;

            assert_eq!(credentials.username, "alice");
        }
        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let result = extract(Some("application/json"), "{not json").await;
        assert!(matches!(result, Err((StatusCode::BAD_REQUEST, _))));
    }

    #[tokio::test]
    async fn unknown_content_type_is_unsupported() {
        let result = extract(Some("text/plain"), "username=alice").await;
        assert!(matches!(result, Err((StatusCode::UNSUPPORTED_MEDIA_TYPE, _))));
    }

    #[test]
    fn debug_hides_password() {
        let credentials = UserCredentials {
            username: "alice".to_string(),
            password: SecretString::from("secret123".to_string()),
        };
        assert!(!format!("{credentials:?}").contains("secret123"));
    }
}
