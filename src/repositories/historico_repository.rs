//! Queries da tabela veiculos_historico
//!
//! O arquivamento move o lote inteiro em uma única transação: ou todos
//! os veículos selecionados migram para o histórico, ou nenhum.

use chrono::NaiveDateTime;
use sqlx::{PgPool, QueryBuilder};

use crate::models::historico::VeiculoHistorico;
use crate::models::veiculo::Veiculo;
use crate::repositories::FiltrosResolvidos;
use crate::utils::errors::AppError;

pub struct HistoricoRepository {
    pool: PgPool,
}

impl HistoricoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Copiar cada veículo para o histórico e remover o registro ativo,
    /// tudo dentro de uma transação só
    pub async fn arquivar_lote(
        &self,
        veiculos: &[Veiculo],
        agora: NaiveDateTime,
    ) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        for veiculo in veiculos {
            sqlx::query(
                r#"
                INSERT INTO veiculos_historico (
                    placa, origem, turno, id_viagem, data_planejada, data_checkin,
                    hora_real_chegada, motorista, tipo_veiculo, tipo_carga,
                    volumetria_sistematica, percent_ocupacao, rede_contencao,
                    doca, observacao, status_final, data, hora_inicio,
                    horario_atualizacao, turno_finalizacao, tempo_descarga,
                    data_arquivamento
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                        $14, $15, $16, $17, $18, $19, $20, $21, $22)
                "#,
            )
            .bind(&veiculo.placa)
            .bind(&veiculo.origem)
            .bind(&veiculo.turno)
            .bind(&veiculo.id_viagem)
            .bind(&veiculo.data_planejada)
            .bind(&veiculo.data_checkin)
            .bind(&veiculo.hora_real_chegada)
            .bind(&veiculo.motorista)
            .bind(&veiculo.tipo_veiculo)
            .bind(&veiculo.tipo_carga)
            .bind(veiculo.volumetria_sistematica)
            .bind(veiculo.percent_ocupacao)
            .bind(&veiculo.rede_contencao)
            .bind(&veiculo.doca)
            .bind(&veiculo.observacao)
            .bind(&veiculo.status)
            .bind(veiculo.data)
            .bind(veiculo.hora_inicio)
            .bind(veiculo.horario_atualizacao)
            .bind(&veiculo.turno_finalizacao)
            .bind(&veiculo.tempo_descarga)
            .bind(agora)
            .execute(&mut *tx)
            .await?;

            sqlx::query("DELETE FROM veiculos WHERE id = $1")
                .bind(veiculo.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(veiculos.len() as u64)
    }

    /// Listagem filtrada do histórico para o relatório combinado
    pub async fn listar_filtrado(
        &self,
        filtros: &FiltrosResolvidos,
    ) -> Result<Vec<VeiculoHistorico>, AppError> {
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM veiculos_historico WHERE 1=1");

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
            qb.push(" AND status_final = ");
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

        let historico = qb
            .build_query_as::<VeiculoHistorico>()
            .fetch_all(&self.pool)
            .await?;

        Ok(historico)
    }
}
