//! Gravação dos registros de auditoria

use sqlx::PgPool;

use crate::services::auditoria_service::RegistroAuditoria;
use crate::utils::errors::AppError;

pub struct AuditoriaRepository {
    pool: PgPool,
}

impl AuditoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn inserir(&self, registro: &RegistroAuditoria) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO registros_auditoria (usuario, acao, descricao, criado_em)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&registro.usuario)
        .bind(&registro.acao)
        .bind(&registro.descricao)
        .bind(registro.criado_em)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
