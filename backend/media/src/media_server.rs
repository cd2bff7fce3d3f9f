//! Serves stored uploads back over HTTP.
//!
//! Mount at `/uploads`:
//!   GET /uploads/:filename  - the stored image

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::fs;
use tracing::{debug, warn};

use crate::mime_detect::{is_inline_safe, upload_mime_type};
use crate::store::UploadStore;

/// Build the upload router. Generic over the outer state so it can be nested
/// into any application router.
pub fn media_router<S>(store: UploadStore) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/:filename", get(serve_upload))
        .with_state(store)
}

/// GET /:filename - stream a stored upload.
async fn serve_upload(Path(filename): Path<String>, State(store): State<UploadStore>) -> Response {
    let Some(path) = store.resolve(&filename) else {
        warn!(filename = %filename, "Rejected suspicious upload path");
        return (StatusCode::BAD_REQUEST, "Invalid filename").into_response();
    };
    debug!(path = %path.display(), "Serving upload");

    match fs::read(&path).await {
        Ok(bytes) => {
            let mime = upload_mime_type(&filename, &bytes);
            let disposition = if is_inline_safe(mime) { "inline" } else { "attachment" };

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
            if let Ok(value) = HeaderValue::from_str(&format!("{disposition}; filename=\"{filename}\"")) {
                headers.insert(header::CONTENT_DISPOSITION, value);
            }
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=86400"),
            );

            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "Upload not found").into_response()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read upload");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read upload").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn serves_stored_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("20240101_000000_leaf.png"), PNG).unwrap();
        let app = media_router(UploadStore::new(tmp.path()));

        let resp = get(app, "/20240101_000000_leaf.png").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], PNG);
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = media_router(UploadStore::new(tmp.path()));
        assert_eq!(get(app, "/nope.jpg").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let app = media_router(UploadStore::new(tmp.path()));
        assert_eq!(get(app, "/..%2Fsecret").await.status(), StatusCode::BAD_REQUEST);
    }
}
