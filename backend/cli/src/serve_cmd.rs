//! `krishimitra serve`

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use krishimitra_config::KrishiConfig;
use krishimitra_gateway::{build_router, start_server, GatewayState};
use krishimitra_media::UploadStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::setup::build_classifier;

pub async fn run(config: KrishiConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port());
    let ip: IpAddr = config
        .bind()
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.bind()))?;
    let addr = SocketAddr::new(ip, port);

    let classifier = build_classifier(&config)?;
    let uploads = UploadStore::new(config.upload_dir());
    uploads.ensure_dir().await?;

    info!(
        addr = %addr,
        classifier = classifier.name(),
        uploads = %uploads.dir().display(),
        max_upload_bytes = config.max_upload_bytes(),
        "Starting KrishiMitra"
    );

    let state = GatewayState::new(classifier, uploads).with_static_dir(config.static_dir());
    let app = build_router(state, config.max_upload_bytes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    start_server(addr, app).await
}
