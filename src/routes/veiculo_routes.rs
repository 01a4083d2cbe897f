use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;

use crate::controllers::veiculo_controller::{ListagemResponse, VeiculoController};
use crate::middleware::auth::Papel;
use crate::models::veiculo::{
    CreateVeiculoRequest, DetalheVeiculoResponse, ListagemFiltros, UpdateVeiculoRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::JsonValidado;

pub fn create_veiculo_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(criar_veiculo).get(listar_veiculos))
        .route(
            "/:id",
            get(detalhe_veiculo)
                .put(atualizar_veiculo)
                .delete(excluir_veiculo),
        )
}

async fn criar_veiculo(
    Extension(papel): Extension<Papel>,
    State(state): State<AppState>,
    JsonValidado(request): JsonValidado<CreateVeiculoRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let controller = VeiculoController::new(state);
    let veiculo = controller.criar(papel, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": format!("Veículo com placa {} adicionado com sucesso!", veiculo.placa),
            "veiculo": DetalheVeiculoResponse::from(&veiculo),
        })),
    ))
}

async fn detalhe_veiculo(
    Extension(_papel): Extension<Papel>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DetalheVeiculoResponse>, AppError> {
    let controller = VeiculoController::new(state);
    let detalhe = controller.detalhe(id).await?;
    Ok(Json(detalhe))
}

async fn atualizar_veiculo(
    Extension(papel): Extension<Papel>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonValidado(request): JsonValidado<UpdateVeiculoRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VeiculoController::new(state);
    let veiculo = controller.atualizar(id, papel, request).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Veículo {} atualizado com sucesso!", veiculo.placa),
        "veiculo": DetalheVeiculoResponse::from(&veiculo),
    })))
}

async fn excluir_veiculo(
    Extension(papel): Extension<Papel>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VeiculoController::new(state);
    let placa = controller.excluir(id, papel).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Veículo de placa {} excluído com sucesso.", placa),
    })))
}

async fn listar_veiculos(
    Extension(_papel): Extension<Papel>,
    State(state): State<AppState>,
    Query(filtros): Query<ListagemFiltros>,
) -> Result<Json<ListagemResponse>, AppError> {
    let controller = VeiculoController::new(state);
    let listagem = controller.listagem(filtros).await?;
    Ok(Json(listagem))
}
