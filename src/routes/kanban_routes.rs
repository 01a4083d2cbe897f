use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;

use crate::controllers::kanban_controller::{ContagensResponse, KanbanController, QuadroResponse};
use crate::middleware::auth::Papel;
use crate::models::veiculo::AtualizarStatusRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::JsonValidado;

pub fn create_kanban_router() -> Router<AppState> {
    Router::new()
        .route("/", get(quadro))
        .route("/status", post(atualizar_status))
        .route("/arquivar", post(arquivar))
        .route("/contagens", get(contagens))
}

async fn quadro(
    Extension(_papel): Extension<Papel>,
    State(state): State<AppState>,
) -> Result<Json<QuadroResponse>, AppError> {
    let controller = KanbanController::new(state);
    let quadro = controller.quadro().await?;
    Ok(Json(quadro))
}

async fn atualizar_status(
    Extension(papel): Extension<Papel>,
    State(state): State<AppState>,
    JsonValidado(request): JsonValidado<AtualizarStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = KanbanController::new(state);
    let veiculo = controller.atualizar_status(papel, request).await?;
    Ok(Json(json!({
        "success": true,
        "veiculo": veiculo,
    })))
}

async fn arquivar(
    Extension(papel): Extension<Papel>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = KanbanController::new(state);
    let total = controller.arquivar(papel).await?;
    let message = if total == 0 {
        "Nenhum veículo de turnos anteriores para arquivar.".to_string()
    } else {
        format!("{} veículo(s) de turnos anteriores foram arquivados.", total)
    };
    Ok(Json(json!({
        "success": true,
        "archived_count": total,
        "message": message,
    })))
}

async fn contagens(
    Extension(_papel): Extension<Papel>,
    State(state): State<AppState>,
) -> Result<Json<ContagensResponse>, AppError> {
    let controller = KanbanController::new(state);
    let contagens = controller.contagens().await?;
    Ok(Json(contagens))
}
