use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::sink::PrometheusSink;

/// Routes of the scrape endpoint
pub fn router(sink: Arc<PrometheusSink>) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/healthz", get(healthz))
        .with_state(sink)
}

async fn metrics(State(sink): State<Arc<PrometheusSink>>) -> Response {
    match sink.encode_text() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Serve the scrape endpoint until `shutdown` turns true, then drain open
/// connections and return.
pub async fn serve(
    listen_addr: SocketAddr,
    sink: Arc<PrometheusSink>,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    tracing::info!("Serving metrics at http://{}/metrics", listener.local_addr()?);

    axum::serve(listener, router(sink))
        .with_graceful_shutdown(async move {
            // a dropped sender also means shutdown
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;

    tracing::info!("Metrics server stopped");
    Ok(())
}
