pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use middleware::auth::perfil_middleware;
use middleware::cors::cors_middleware;
use state::AppState;

/// Monta o router completo. Separado do binário para reuso nos testes de API.
pub fn criar_app(app_state: AppState) -> Router {
    let api = Router::new()
        .nest("/api/veiculos", routes::veiculo_routes::create_veiculo_router())
        .nest("/api/kanban", routes::kanban_routes::create_kanban_router())
        .nest("/api/docas", routes::doca_routes::create_doca_router())
        .layer(axum::middleware::from_fn(perfil_middleware));

    Router::new()
        .merge(api)
        .route("/health", get(health_endpoint))
        .layer(cors_middleware())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Health check simples
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "kanban_docas",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
