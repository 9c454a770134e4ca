use axum::response::{Html, IntoResponse};

const GREETING: &str = r#"<h1>Signet auth server running</h1>
<p><a href="/signup.html">Signup</a> | <a href="/signin.html">Signin</a></p>
"#;

// axum handler for /, works without any static index page
pub async fn root() -> impl IntoResponse {
    Html(GREETING)
}
