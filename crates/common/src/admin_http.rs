//! Lightweight admin HTTP server spawner
//!
//! Exposes `/healthz` and `/metrics` on a separate listener so health checks and
//! scrapers do not share the public API port.

use std::thread;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tracing::{error, info};

use crate::metrics::encode_metrics;

async fn healthz() -> &'static str { "OK" }

pub fn admin_router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(|| async { encode_metrics() }))
}

/// Spawn the admin server on its own thread and runtime.
pub fn spawn_admin_server(addr: &str) {
    let addr = addr.to_string();
    thread::spawn(move || {
        let rt = match Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                error!(error = %e, "failed to build admin runtime");
                return;
            }
        };
        rt.block_on(async move {
            let listener = match TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    error!(%addr, error = %e, "admin bind failed");
                    return;
                }
            };
            info!(%addr, "admin server listening");
            if let Err(e) = axum::serve(listener, admin_router()).await {
                error!(error = %e, "admin server stopped");
            }
        });
    });
}
