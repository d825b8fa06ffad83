use std::{env, future::Future, net::SocketAddr};

use axum::Router;
use common::admin_http::spawn_admin_server;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::service::AuthConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`); without a file, fall back to
/// defaults with `SERVER_HOST`/`SERVER_PORT` from the environment.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "no usable config file, using environment");
            let mut cfg = AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                cfg.server.port = port;
            }
            cfg
        }
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {}", e)))
}

/// Connect, migrate and wire the application router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrations failed: {}", e)))?;

    let state = ServerState::with_database(db, AuthConfig::from(&cfg.auth));
    if cfg.auth.password_algorithm == "plain" {
        warn!("passwords are stored in plain text; set auth.password_algorithm = \"argon2\"");
    }
    Ok(routes::build_router(state, build_cors()))
}

/// Build the app from `cfg` and serve it until `shutdown` resolves; in-flight
/// requests are drained before returning.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Some(admin) = &cfg.server.admin_addr {
        spawn_admin_server(admin);
    }

    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting finance api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("finance api drained");
    Ok(())
}
