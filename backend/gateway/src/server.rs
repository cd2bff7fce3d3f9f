//! Main HTTP Gateway Server.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use krishimitra_media::{media_router, UploadStore, UPLOADS_URL_PREFIX};
use krishimitra_understanding::Classifier;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::{advice_api, chat_api, health_api, home, predict};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub classifier: Arc<dyn Classifier>,
    pub uploads: UploadStore,
    /// Directory holding a custom `index.html`.
    pub static_dir: Option<PathBuf>,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(classifier: Arc<dyn Classifier>, uploads: UploadStore) -> Self {
        Self {
            classifier,
            uploads,
            static_dir: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

/// Build the application router. Request bodies above `max_upload_bytes`
/// are refused with 413.
pub fn build_router(state: GatewayState, max_upload_bytes: usize) -> Router {
    let uploads = state.uploads.clone();
    Router::new()
        .route("/", get(home::index))
        .route("/predict", post(predict::predict))
        .route("/api/chat", post(chat_api::chat))
        .route("/api/health", get(health_api::get_health))
        .route("/api/labels", get(advice_api::list_labels))
        .route("/api/advice/:label", get(advice_api::get_advice))
        .nest(UPLOADS_URL_PREFIX, media_router(uploads))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Bind `addr` and serve `app` until the process receives Ctrl-C.
#[instrument(skip(app))]
pub async fn start_server(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
