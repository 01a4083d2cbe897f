use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::kanban_controller::KanbanController;
use crate::middleware::auth::Papel;
use crate::services::doca_service::StatusDoca;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_doca_router() -> Router<AppState> {
    Router::new().route("/status", get(status_docas))
}

async fn status_docas(
    Extension(_papel): Extension<Papel>,
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, StatusDoca>>, AppError> {
    let controller = KanbanController::new(state);
    let docas = controller.status_docas().await?;
    Ok(Json(docas))
}
