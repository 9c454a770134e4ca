//! Router tests for the signup/signin HTTP surface.
//!
//! The app is built with the in-memory repository and bcrypt's minimum cost,
//! then driven request by request with `oneshot`.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use signet::{
    api::{router, ServerConfig},
    credentials::{BcryptHasher, CredentialStore, MemoryUserRepository},
};
use std::{fs, sync::Arc};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    repository: Arc<MemoryUserRepository>,
    _views: TempDir,
}

impl TestApp {
    fn new() -> Result<Self> {
        Self::with_config(ServerConfig::new())
    }

    fn with_config(config: ServerConfig) -> Result<Self> {
        let views = tempfile::tempdir()?;
        fs::write(
            views.path().join("signup.html"),
            "<form action=\"/signup\" method=\"post\"></form>",
        )?;

        let repository = Arc::new(MemoryUserRepository::new());
        let store = CredentialStore::new(repository.clone(), Arc::new(BcryptHasher::new(4)?));
        let config = config.with_views_dir(views.path());

        Ok(Self {
            app: router(Arc::new(store), Arc::new(config)),
            repository,
            _views: views,
        })
    }

    async fn send(&self, request: Request<Body>) -> Result<Response> {
        Ok(self.app.clone().oneshot(request).await?)
    }

    async fn post_json(&self, path: &str, body: &str) -> Result<Response> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await
    }

    async fn post_form(&self, path: &str, body: &str) -> Result<Response> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))?,
        )
        .await
    }

    async fn get(&self, path: &str) -> Result<Response> {
        self.send(Request::builder().uri(path).body(Body::empty())?)
            .await
    }
}

async fn text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

const ALICE: &str = r#"{"username":"alice","password":"secret123"}"#;

#[tokio::test]
async fn signup_then_duplicate() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.post_json("/signup", ALICE).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(text(response).await?, "Signup successful");

    let response = app
        .post_json("/signup", r#"{"username":"alice","password":"other"}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "User already exists");

    assert_eq!(app.repository.len(), 1);
    Ok(())
}

#[tokio::test]
async fn signin_outcomes() -> Result<()> {
    let app = TestApp::new()?;
    app.post_json("/signup", ALICE).await?;

    let response = app.post_json("/signin", ALICE).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await?, "Login successful");

    let response = app
        .post_json("/signin", r#"{"username":"alice","password":"wrong"}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "Invalid credentials");

    let response = app
        .post_json("/signin", r#"{"username":"bob","password":"secret123"}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(response).await?, "User not found");
    Ok(())
}

#[tokio::test]
async fn form_bodies_round_trip() -> Result<()> {
    let app = TestApp::new()?;

    let response = app
        .post_form("/signup", "username=carol&password=p%40ss+word")
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .post_form("/signin", "username=carol&password=p%40ss+word")
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_json("/signin", r#"{"username":"carol","password":"p@ss word"}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_rejected() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.post_json("/signup", r#"{"username":"dave"}"#).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "Missing password");

    let response = app.post_form("/signup", "password=secret").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "Missing username");

    let response = app
        .post_json("/signin", r#"{"username":"","password":""}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.repository.is_empty());
    Ok(())
}

#[tokio::test]
async fn null_fields_count_as_missing() -> Result<()> {
    let app = TestApp::new()?;

    let response = app
        .post_json("/signup", r#"{"username":null,"password":"x"}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "Missing username");

    let response = app
        .post_json("/signin", r#"{"username":"alice","password":null}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "Missing password");

    assert!(app.repository.is_empty());
    Ok(())
}

#[tokio::test]
async fn nul_in_username_is_a_client_error() -> Result<()> {
    let app = TestApp::new()?;

    let response = app
        .post_json("/signup", r#"{"username":"ali\u0000ce","password":"x"}"#)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await?, "Invalid username");

    let response = app.post_form("/signup", "username=a%00b&password=x").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.repository.is_empty());
    Ok(())
}

#[tokio::test]
async fn json_content_type_is_case_insensitive() -> Result<()> {
    let app = TestApp::new()?;

    for (content_type, username) in [
        ("Application/JSON", "frank"),
        ("application/vnd.signet+json", "grace"),
    ] {
        let body = format!(r#"{{"username":"{username}","password":"pw"}}"#);
        let response = app
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/signup")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED, "{content_type}");
    }

    assert_eq!(app.repository.len(), 2);
    Ok(())
}

#[tokio::test]
async fn malformed_body_never_reaches_store() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.post_json("/signup", "{not json").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/signup")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("alice secret123"))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert!(app.repository.is_empty());
    Ok(())
}

#[tokio::test]
async fn configured_redirects() -> Result<()> {
    let app = TestApp::with_config(
        ServerConfig::new()
            .with_signup_redirect_url(Some("/signin.html".to_string()))
            .with_signin_redirect_url(Some("https://example.com/welcome".to_string())),
    )?;

    let response = app.post_form("/signup", "username=erin&password=pw").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/signin.html")
    );

    let response = app.post_form("/signin", "username=erin&password=pw").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("https://example.com/welcome")
    );

    // failures are still reported as text
    let response = app
        .post_form("/signin", "username=erin&password=nope")
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn root_and_static_pages() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.get("/").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("/signup.html"));
    assert!(body.contains("/signin.html"));

    let response = app.get("/signup.html").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await?.contains("action=\"/signup\""));

    let response = app.get("/missing.html").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn request_id_is_generated_and_propagated() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.get("/").await?;
    let generated = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    assert_eq!(generated.map(|id| id.len()), Some(26));

    let response = app
        .send(
            Request::builder()
                .uri("/")
                .header("x-request-id", "req-42")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
    Ok(())
}

#[tokio::test]
async fn health_reports_database() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.get("/health").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-app"));

    let health: serde_json::Value = serde_json::from_str(&text(response).await?)?;
    assert_eq!(health["name"], "signet");
    assert_eq!(health["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> Result<()> {
    let app = TestApp::new()?;

    let response = app.get("/api-docs/openapi.json").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("/signup"));
    assert!(body.contains("/signin"));
    Ok(())
}
