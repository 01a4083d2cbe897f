//! Camada de acesso a dados
//!
//! Repositórios com as queries sqlx das tabelas veiculos,
//! veiculos_historico e registros_auditoria.

pub mod auditoria_repository;
pub mod historico_repository;
pub mod veiculo_repository;

use chrono::NaiveDateTime;

/// Filtros da listagem combinada já convertidos para tipos de consulta
#[derive(Debug, Default, Clone)]
pub struct FiltrosResolvidos {
    pub data_inicio: Option<NaiveDateTime>,
    pub data_fim: Option<NaiveDateTime>,
    pub placa: Option<String>,
    pub status: Option<String>,
    pub motorista: Option<String>,
    pub tipo_veiculo: Option<String>,
    pub turno: Option<String>,
}
