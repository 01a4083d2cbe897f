//! Extractors da API
//!
//! Wrapper do Json do axum que converte rejeições de parse (corpo
//! malformado, campo com tipo errado) no shape de erro padrão da API,
//! em vez da resposta de texto plano do extractor original.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::utils::errors::AppError;

pub struct JsonValidado<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonValidado<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(valor)) => Ok(JsonValidado(valor)),
            Err(rejeicao) => Err(AppError::Validacao(rejeicao.body_text())),
        }
    }
}
