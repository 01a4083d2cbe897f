//! Queries da tabela veiculos
//!
//! Todas as consultas usam binds em tempo de execução. O conflito de
//! doca é garantido pelo índice parcial idx_veiculos_doca_ativa e
//! convertido aqui em erro de conflito legível.

use sqlx::{PgPool, QueryBuilder};

use crate::models::veiculo::{CamposAtualizacao, NovoVeiculo, StatusVeiculo, Veiculo};
use crate::repositories::FiltrosResolvidos;
use crate::services::status_service::EfeitoTransicao;
use crate::utils::errors::AppError;

const INDICE_DOCA_ATIVA: &str = "idx_veiculos_doca_ativa";

pub struct VeiculoRepository {
    pool: PgPool,
}

impl VeiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, novo: NovoVeiculo) -> Result<Veiculo, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            INSERT INTO veiculos (
                placa, origem, turno, id_viagem, data_planejada, data_checkin,
                hora_real_chegada, motorista, tipo_veiculo, tipo_carga,
                volumetria_sistematica, percent_ocupacao, rede_contencao,
                doca, observacao, status, data
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&novo.placa)
        .bind(&novo.origem)
        .bind(&novo.turno)
        .bind(&novo.id_viagem)
        .bind(&novo.data_planejada)
        .bind(&novo.data_checkin)
        .bind(&novo.hora_real_chegada)
        .bind(&novo.motorista)
        .bind(&novo.tipo_veiculo)
        .bind(&novo.tipo_carga)
        .bind(novo.volumetria_sistematica)
        .bind(novo.percent_ocupacao)
        .bind(&novo.rede_contencao)
        .bind(&novo.doca)
        .bind(&novo.observacao)
        .bind(StatusVeiculo::Aguardando.as_str())
        .bind(novo.data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| mapear_erro_doca(e, novo.doca.as_deref()))?;

        Ok(veiculo)
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Veiculo>, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>("SELECT * FROM veiculos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(veiculo)
    }

    pub async fn atualizar(
        &self,
        id: i64,
        campos: CamposAtualizacao,
    ) -> Result<Veiculo, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            UPDATE veiculos SET
                placa = $2, origem = $3, turno = $4, id_viagem = $5,
                data_planejada = $6, data_checkin = $7, hora_real_chegada = $8,
                motorista = $9, tipo_veiculo = $10, tipo_carga = $11,
                volumetria_sistematica = $12, percent_ocupacao = $13,
                rede_contencao = $14, doca = $15, observacao = $16
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&campos.placa)
        .bind(&campos.origem)
        .bind(&campos.turno)
        .bind(&campos.id_viagem)
        .bind(&campos.data_planejada)
        .bind(&campos.data_checkin)
        .bind(&campos.hora_real_chegada)
        .bind(&campos.motorista)
        .bind(&campos.tipo_veiculo)
        .bind(&campos.tipo_carga)
        .bind(campos.volumetria_sistematica)
        .bind(campos.percent_ocupacao)
        .bind(&campos.rede_contencao)
        .bind(&campos.doca)
        .bind(&campos.observacao)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound(format!("Veículo {} não encontrado", id))
            }
            outro => mapear_erro_doca(outro, campos.doca.as_deref()),
        })?;

        Ok(veiculo)
    }

    /// Persistir o efeito de uma transição de status. A regressão
    /// FINALIZADO -> EM_PROCESSO reentra no domínio do índice parcial de
    /// doca, então a violação vira conflito como na criação.
    pub async fn atualizar_status(
        &self,
        id: i64,
        efeito: &EfeitoTransicao,
        doca: Option<&str>,
    ) -> Result<Veiculo, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            UPDATE veiculos SET
                status = $2, hora_inicio = $3, horario_atualizacao = $4,
                turno_finalizacao = $5, tempo_descarga = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(efeito.status.as_str())
        .bind(efeito.hora_inicio)
        .bind(efeito.horario_atualizacao)
        .bind(&efeito.turno_finalizacao)
        .bind(&efeito.tempo_descarga)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound(format!("Veículo {} não encontrado", id))
            }
            outro => mapear_erro_doca(outro, doca),
        })?;

        Ok(veiculo)
    }

    pub async fn excluir(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM veiculos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Listagem do quadro: agrupa por status e ordena cada coluna
    /// (fila por chegada, processo por início, finalizados recentes antes)
    pub async fn listar_kanban(&self) -> Result<Vec<Veiculo>, AppError> {
        let veiculos = sqlx::query_as::<_, Veiculo>(
            r#"
            SELECT * FROM veiculos
            ORDER BY
                CASE status
                    WHEN 'AGUARDANDO' THEN 1
                    WHEN 'EM_PROCESSO' THEN 2
                    WHEN 'FINALIZADO' THEN 3
                    ELSE 4
                END,
                data ASC,
                hora_inicio ASC,
                horario_atualizacao DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(veiculos)
    }

    /// Veículo ativo ocupando a doca, opcionalmente ignorando um id
    /// (o próprio registro durante uma edição)
    pub async fn ocupante_da_doca(
        &self,
        doca: &str,
        excluir_id: Option<i64>,
    ) -> Result<Option<Veiculo>, AppError> {
        let veiculo = sqlx::query_as::<_, Veiculo>(
            r#"
            SELECT * FROM veiculos
            WHERE doca = $1
              AND status IN ('AGUARDANDO', 'EM_PROCESSO')
              AND ($2::BIGINT IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(doca)
        .bind(excluir_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(veiculo)
    }

    /// Veículos ativos com doca atribuída, para o snapshot do mapa
    pub async fn ativos_com_doca(&self) -> Result<Vec<Veiculo>, AppError> {
        let veiculos = sqlx::query_as::<_, Veiculo>(
            r#"
            SELECT * FROM veiculos
            WHERE doca IS NOT NULL
              AND status IN ('AGUARDANDO', 'EM_PROCESSO')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(veiculos)
    }

    pub async fn contar_por_status(&self, status: StatusVeiculo) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM veiculos WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Todos os finalizados da tabela ativa. A elegibilidade de
    /// arquivamento é decidida no domínio (elegivel_para_arquivamento)
    pub async fn listar_finalizados(&self) -> Result<Vec<Veiculo>, AppError> {
        let veiculos =
            sqlx::query_as::<_, Veiculo>("SELECT * FROM veiculos WHERE status = 'FINALIZADO'")
                .fetch_all(&self.pool)
                .await?;

        Ok(veiculos)
    }

    /// Listagem filtrada dos ativos para o relatório combinado
    pub async fn listar_filtrado(
        &self,
        filtros: &FiltrosResolvidos,
    ) -> Result<Vec<Veiculo>, AppError> {
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM veiculos WHERE 1=1");

        if let Some(inicio) = filtros.data_inicio {
            qb.push(" AND data >= ");
            qb.push_bind(inicio);
        }
        if let Some(fim) = filtros.data_fim {
            qb.push(" AND data <= ");
            qb.push_bind(fim);
        }
        if let Some(placa) = &filtros.placa {
            qb.push(" AND placa ILIKE ");
            qb.push_bind(format!("%{}%", placa));
        }
        if let Some(status) = &filtros.status {
            qb.push(" AND status = ");
            qb.push_bind(status.clone());
        }
        if let Some(motorista) = &filtros.motorista {
            qb.push(" AND motorista ILIKE ");
            qb.push_bind(format!("%{}%", motorista));
        }
        if let Some(tipo_veiculo) = &filtros.tipo_veiculo {
            qb.push(" AND tipo_veiculo = ");
            qb.push_bind(tipo_veiculo.clone());
        }
        if let Some(turno) = &filtros.turno {
            qb.push(" AND turno = ");
            qb.push_bind(turno.clone());
        }

        qb.push(" ORDER BY data DESC");

        let veiculos = qb
            .build_query_as::<Veiculo>()
            .fetch_all(&self.pool)
            .await?;

        Ok(veiculos)
    }
}

fn mapear_erro_doca(e: sqlx::Error, doca: Option<&str>) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.constraint() == Some(INDICE_DOCA_ATIVA) {
            return AppError::Conflito(format!(
                "A doca {} já está ocupada por outro veículo.",
                doca.unwrap_or("informada")
            ));
        }
    }
    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct ViolacaoDeConstraint(&'static str);

    impl fmt::Display for ViolacaoDeConstraint {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "duplicate key value violates unique constraint \"{}\"",
                self.0
            )
        }
    }

    impl StdError for ViolacaoDeConstraint {}

    impl sqlx::error::DatabaseError for ViolacaoDeConstraint {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.0)
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn test_violacao_do_indice_de_doca_vira_conflito() {
        let erro = sqlx::Error::Database(Box::new(ViolacaoDeConstraint(INDICE_DOCA_ATIVA)));
        match mapear_erro_doca(erro, Some("5")) {
            AppError::Conflito(msg) => assert!(msg.contains("doca 5")),
            outro => panic!("esperava conflito, veio {:?}", outro),
        }
    }

    #[test]
    fn test_outra_constraint_permanece_erro_de_banco() {
        let erro = sqlx::Error::Database(Box::new(ViolacaoDeConstraint("veiculos_pkey")));
        assert!(matches!(
            mapear_erro_doca(erro, Some("5")),
            AppError::Database(_)
        ));
    }
}
