use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{metrics::encode_metrics, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod lancamentos;
pub mod usuarios;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

/// Build the full application router: health, metrics, docs and the REST API
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let usuarios = Router::new()
        .route("/api/usuarios", post(usuarios::register))
        .route("/api/usuarios/autenticar", post(usuarios::authenticate))
        .route("/api/usuarios/:id/saldo", get(usuarios::balance));

    let lancamentos = Router::new()
        .route("/api/lancamentos", get(lancamentos::search).post(lancamentos::create))
        .route(
            "/api/lancamentos/:id",
            get(lancamentos::get).put(lancamentos::update).delete(lancamentos::delete),
        )
        .route("/api/lancamentos/:id/saldo", get(lancamentos::balance))
        .route("/api/lancamentos/:id/atualiza-status", put(lancamentos::update_status));

    public
        .merge(usuarios)
        .merge(lancamentos)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
