//! Shared application state
//!
//! Este módulo define o estado compartilhado que o router do Axum
//! repassa aos handlers.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::auditoria_service::Auditoria;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub auditoria: Auditoria,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, auditoria: Auditoria) -> Self {
        Self {
            pool,
            config,
            auditoria,
        }
    }
}
