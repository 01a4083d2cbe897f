//! Modelo de VeiculoHistorico
//!
//! Registro imutável criado pelo arquivador. Mapeia a tabela
//! `veiculos_historico`; nunca sofre UPDATE depois de criado.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VeiculoHistorico {
    pub id: i64,
    pub placa: String,
    pub origem: String,
    pub turno: String,
    pub id_viagem: String,
    pub data_planejada: String,
    pub data_checkin: String,
    pub hora_real_chegada: String,
    pub motorista: Option<String>,
    pub tipo_veiculo: String,
    pub tipo_carga: String,
    pub volumetria_sistematica: i32,
    pub percent_ocupacao: i32,
    pub rede_contencao: String,
    pub doca: Option<String>,
    pub observacao: Option<String>,
    pub status_final: String,
    pub data: NaiveDateTime,
    pub hora_inicio: Option<NaiveDateTime>,
    pub horario_atualizacao: Option<NaiveDateTime>,
    pub turno_finalizacao: Option<String>,
    pub tempo_descarga: Option<String>,
    pub data_arquivamento: NaiveDateTime,
}

/// Item unificado da listagem combinada (ativos + histórico)
#[derive(Debug, Serialize)]
pub struct ItemListagemResponse {
    pub id: i64,
    pub placa: String,
    pub origem: String,
    pub turno: String,
    pub motorista: Option<String>,
    pub tipo_veiculo: String,
    pub tipo_carga: String,
    pub doca: Option<String>,
    pub status: String,
    pub data: NaiveDateTime,
    pub tempo_descarga: Option<String>,
    pub turno_finalizacao: Option<String>,
    pub arquivado: bool,
    pub data_arquivamento: Option<NaiveDateTime>,
}

impl From<&crate::models::veiculo::Veiculo> for ItemListagemResponse {
    fn from(v: &crate::models::veiculo::Veiculo) -> Self {
        Self {
            id: v.id,
            placa: v.placa.clone(),
            origem: v.origem.clone(),
            turno: v.turno.clone(),
            motorista: v.motorista.clone(),
            tipo_veiculo: v.tipo_veiculo.clone(),
            tipo_carga: v.tipo_carga.clone(),
            doca: v.doca.clone(),
            status: v.status.clone(),
            data: v.data,
            tempo_descarga: v.tempo_descarga.clone(),
            turno_finalizacao: v.turno_finalizacao.clone(),
            arquivado: false,
            data_arquivamento: None,
        }
    }
}

impl From<&VeiculoHistorico> for ItemListagemResponse {
    fn from(h: &VeiculoHistorico) -> Self {
        Self {
            id: h.id,
            placa: h.placa.clone(),
            origem: h.origem.clone(),
            turno: h.turno.clone(),
            motorista: h.motorista.clone(),
            tipo_veiculo: h.tipo_veiculo.clone(),
            tipo_carga: h.tipo_carga.clone(),
            doca: h.doca.clone(),
            status: h.status_final.clone(),
            data: h.data,
            tempo_descarga: h.tempo_descarga.clone(),
            turno_finalizacao: h.turno_finalizacao.clone(),
            arquivado: true,
            data_arquivamento: Some(h.data_arquivamento),
        }
    }
}
