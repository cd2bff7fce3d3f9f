//! Landing page (`GET /`).
//!
//! Serves `index.html` from the configured static directory, falling back to
//! a minimal built-in upload form.

use axum::{extract::State, response::Html};
use tokio::fs;
use tracing::debug;

use crate::server::GatewayState;

const BUILTIN_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>KrishiMitra</title>
</head>
<body>
  <h1>KrishiMitra</h1>
  <p>Upload a photo of a pepper, potato or tomato leaf to check it for disease.</p>
  <form action="/predict" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept="image/*">
    <button type="submit">Analyze</button>
  </form>
</body>
</html>
"#;

/// Handler for `GET /`.
pub async fn index(State(state): State<GatewayState>) -> Html<String> {
    if let Some(dir) = &state.static_dir {
        let path = dir.join("index.html");
        match fs::read_to_string(&path).await {
            Ok(page) => return Html(page),
            Err(e) => debug!(path = %path.display(), error = %e, "No custom landing page"),
        }
    }
    Html(BUILTIN_INDEX.to_string())
}
