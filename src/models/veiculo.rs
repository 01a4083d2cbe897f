//! Modelo de Veículo
//!
//! Este módulo contém o struct Veiculo ativo, o enum de status do ciclo
//! de vida e os requests/responses da API. Mapeia exatamente a tabela
//! `veiculos` do schema PostgreSQL.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::errors::AppError;
use crate::utils::validation::formatar_data_humana;

/// Status do ciclo de vida — armazenado como TEXT na tabela
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusVeiculo {
    Aguardando,
    EmProcesso,
    Finalizado,
}

impl StatusVeiculo {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusVeiculo::Aguardando => "AGUARDANDO",
            StatusVeiculo::EmProcesso => "EM_PROCESSO",
            StatusVeiculo::Finalizado => "FINALIZADO",
        }
    }

    pub fn parse(valor: &str) -> Option<Self> {
        match valor {
            "AGUARDANDO" => Some(StatusVeiculo::Aguardando),
            "EM_PROCESSO" => Some(StatusVeiculo::EmProcesso),
            "FINALIZADO" => Some(StatusVeiculo::Finalizado),
            _ => None,
        }
    }
}

/// Tipo de veículo: enum fixo ou texto livre validado ("Outro")
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipoVeiculo {
    Toco,
    Carreta,
    Vuc,
    Truck,
    Outro(String),
}

impl TipoVeiculo {
    /// Resolver a seleção do formulário: o sentinela "Outro" exige texto livre
    pub fn resolver(selecionado: &str, outro: Option<&str>) -> Result<Self, AppError> {
        match selecionado {
            "Toco" => Ok(TipoVeiculo::Toco),
            "Carreta" => Ok(TipoVeiculo::Carreta),
            "Vuc" => Ok(TipoVeiculo::Vuc),
            "Truck" => Ok(TipoVeiculo::Truck),
            "Outro" => {
                let texto = outro.map(str::trim).unwrap_or_default();
                if texto.is_empty() {
                    Err(AppError::Validacao(
                        "Se \"Outro\" for selecionado para Veículo, você deve especificar o tipo."
                            .to_string(),
                    ))
                } else {
                    Ok(TipoVeiculo::Outro(texto.to_string()))
                }
            }
            _ => Err(AppError::Validacao(
                "Por favor, selecione um tipo de veículo válido.".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TipoVeiculo::Toco => "Toco",
            TipoVeiculo::Carreta => "Carreta",
            TipoVeiculo::Vuc => "Vuc",
            TipoVeiculo::Truck => "Truck",
            TipoVeiculo::Outro(texto) => texto,
        }
    }
}

/// Tipo de carga: enum fixo ou texto livre validado ("Outra")
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipoCarga {
    Saca,
    Batida,
    SacaBatida,
    Outra(String),
}

impl TipoCarga {
    pub fn resolver(selecionado: &str, outra: Option<&str>) -> Result<Self, AppError> {
        match selecionado {
            "Saca" => Ok(TipoCarga::Saca),
            "Batida" => Ok(TipoCarga::Batida),
            "Saca/Batida" => Ok(TipoCarga::SacaBatida),
            "Outra" => {
                let texto = outra.map(str::trim).unwrap_or_default();
                if texto.is_empty() {
                    Err(AppError::Validacao(
                        "Se \"Outra\" for selecionado para Carga, você deve especificar o tipo."
                            .to_string(),
                    ))
                } else {
                    Ok(TipoCarga::Outra(texto.to_string()))
                }
            }
            _ => Err(AppError::Validacao(
                "Por favor, selecione um tipo de carga válido.".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TipoCarga::Saca => "Saca",
            TipoCarga::Batida => "Batida",
            TipoCarga::SacaBatida => "Saca/Batida",
            TipoCarga::Outra(texto) => texto,
        }
    }
}

/// Veículo ativo — mapeia exatamente a tabela veiculos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Veiculo {
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
    pub status: String,
    pub data: NaiveDateTime,
    pub hora_inicio: Option<NaiveDateTime>,
    pub horario_atualizacao: Option<NaiveDateTime>,
    pub turno_finalizacao: Option<String>,
    pub tempo_descarga: Option<String>,
}

impl Veiculo {
    pub fn status_enum(&self) -> Option<StatusVeiculo> {
        StatusVeiculo::parse(&self.status)
    }
}

/// Campos validados para inserção de um novo veículo
#[derive(Debug, Clone)]
pub struct NovoVeiculo {
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
    pub data: NaiveDateTime,
}

/// Campos validados para atualização dos dados descritivos
#[derive(Debug, Clone)]
pub struct CamposAtualizacao {
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
}

/// Request para adicionar um veículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVeiculoRequest {
    #[validate(length(min = 1, message = "O campo \"Placa\" é obrigatório."))]
    pub placa: String,

    #[validate(length(min = 1, message = "O campo \"Origem\" é obrigatório."))]
    pub origem: String,

    #[validate(length(min = 1, message = "O campo \"Turno\" é obrigatório."))]
    pub turno: String,

    #[validate(length(min = 1, message = "O campo \"Id Viagem\" é obrigatório."))]
    pub id_viagem: String,

    #[validate(length(min = 1, message = "O campo \"Data Planejada\" é obrigatório."))]
    pub data_planejada: String,

    #[validate(length(min = 1, message = "O campo \"Data Checkin\" é obrigatório."))]
    pub data_checkin: String,

    #[validate(length(min = 1, message = "O campo \"Hora Real Chegada\" é obrigatório."))]
    pub hora_real_chegada: String,

    pub motorista: Option<String>,

    pub tipo_veiculo: String,
    pub tipo_veiculo_outro: Option<String>,

    pub tipo_carga: String,
    pub tipo_carga_outra: Option<String>,

    #[validate(range(min = 0, message = "Volumetria deve ser um inteiro não negativo."))]
    pub volumetria_sistematica: i32,

    #[validate(range(min = 0, max = 100, message = "% de Ocupação deve estar entre 0 e 100."))]
    pub percent_ocupacao: i32,

    #[validate(length(min = 1, message = "O campo \"Rede Contenção\" é obrigatório."))]
    pub rede_contencao: String,

    #[validate(length(min = 1, message = "O campo \"Doca\" é obrigatório."))]
    pub doca: String,

    pub observacao: Option<String>,
}

/// Request para editar um veículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVeiculoRequest {
    #[validate(length(min = 1, message = "O campo \"Placa\" é obrigatório."))]
    pub placa: String,

    #[validate(length(min = 1, message = "O campo \"Origem\" é obrigatório."))]
    pub origem: String,

    #[validate(length(min = 1, message = "O campo \"Turno\" é obrigatório."))]
    pub turno: String,

    #[validate(length(min = 1, message = "O campo \"Id Viagem\" é obrigatório."))]
    pub id_viagem: String,

    #[validate(length(min = 1, message = "O campo \"Data Planejada\" é obrigatório."))]
    pub data_planejada: String,

    #[validate(length(min = 1, message = "O campo \"Data Checkin\" é obrigatório."))]
    pub data_checkin: String,

    #[validate(length(min = 1, message = "O campo \"Hora Real Chegada\" é obrigatório."))]
    pub hora_real_chegada: String,

    pub motorista: Option<String>,

    pub tipo_veiculo: String,
    pub tipo_veiculo_outro: Option<String>,

    pub tipo_carga: String,
    pub tipo_carga_outra: Option<String>,

    #[validate(range(min = 0, message = "Volumetria deve ser um inteiro não negativo."))]
    pub volumetria_sistematica: i32,

    #[validate(range(min = 0, max = 100, message = "% de Ocupação deve estar entre 0 e 100."))]
    pub percent_ocupacao: i32,

    #[validate(length(min = 1, message = "O campo \"Rede Contenção\" é obrigatório."))]
    pub rede_contencao: String,

    pub doca: Option<String>,

    pub observacao: Option<String>,
}

/// Request da transição de status vinda do quadro
#[derive(Debug, Deserialize)]
pub struct AtualizarStatusRequest {
    pub veiculo_id: i64,
    pub novo_status: String,
}

/// Filtros da listagem combinada (ativos + histórico)
#[derive(Debug, Default, Deserialize)]
pub struct ListagemFiltros {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub placa: Option<String>,
    pub status: Option<String>,
    pub motorista: Option<String>,
    pub tipo_veiculo: Option<String>,
    pub turno: Option<String>,
}

/// Card do veículo no quadro kanban e na resposta de transição
#[derive(Debug, Serialize)]
pub struct VeiculoResponse {
    pub id: i64,
    pub placa: String,
    pub origem: String,
    pub id_viagem: String,
    pub doca: Option<String>,
    pub turno: String,
    pub tipo_veiculo: String,
    pub tipo_carga: String,
    pub status: String,
    pub hora_inicio: Option<String>,
    pub horario_atualizacao: Option<String>,
    pub turno_finalizacao: Option<String>,
    pub tempo_descarga: Option<String>,
    pub finalization_status_class: String,
}

/// Detalhe completo do veículo, com datas no formato humano
#[derive(Debug, Serialize)]
pub struct DetalheVeiculoResponse {
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
    pub percent_ocupacao: String,
    pub rede_contencao: String,
    pub doca: Option<String>,
    pub observacao: Option<String>,
    pub status: String,
    pub hora_inicio: String,
    pub horario_atualizacao: String,
    pub tempo_descarga: Option<String>,
}

impl From<&Veiculo> for DetalheVeiculoResponse {
    fn from(veiculo: &Veiculo) -> Self {
        Self {
            id: veiculo.id,
            placa: veiculo.placa.clone(),
            origem: veiculo.origem.clone(),
            turno: veiculo.turno.clone(),
            id_viagem: veiculo.id_viagem.clone(),
            data_planejada: veiculo.data_planejada.clone(),
            data_checkin: veiculo.data_checkin.clone(),
            hora_real_chegada: veiculo.hora_real_chegada.clone(),
            motorista: veiculo.motorista.clone(),
            tipo_veiculo: veiculo.tipo_veiculo.clone(),
            tipo_carga: veiculo.tipo_carga.clone(),
            volumetria_sistematica: veiculo.volumetria_sistematica,
            percent_ocupacao: format!("{}%", veiculo.percent_ocupacao),
            rede_contencao: veiculo.rede_contencao.clone(),
            doca: veiculo.doca.clone(),
            observacao: veiculo.observacao.clone(),
            status: veiculo.status.clone(),
            hora_inicio: veiculo
                .hora_inicio
                .map(|dt| formatar_data_humana(&dt))
                .unwrap_or_else(|| "N/A".to_string()),
            horario_atualizacao: veiculo
                .horario_atualizacao
                .map(|dt| formatar_data_humana(&dt))
                .unwrap_or_else(|| "N/A".to_string()),
            tempo_descarga: veiculo.tempo_descarga.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipo_veiculo_fixo() {
        assert_eq!(
            TipoVeiculo::resolver("Carreta", None).unwrap().as_str(),
            "Carreta"
        );
    }

    #[test]
    fn test_tipo_veiculo_outro_exige_texto() {
        assert!(TipoVeiculo::resolver("Outro", None).is_err());
        assert!(TipoVeiculo::resolver("Outro", Some("   ")).is_err());
        assert_eq!(
            TipoVeiculo::resolver("Outro", Some("Bitrem")).unwrap().as_str(),
            "Bitrem"
        );
    }

    #[test]
    fn test_tipo_veiculo_desconhecido() {
        assert!(TipoVeiculo::resolver("Jamanta", None).is_err());
    }

    #[test]
    fn test_tipo_carga_outra() {
        assert!(TipoCarga::resolver("Outra", Some("")).is_err());
        assert_eq!(
            TipoCarga::resolver("Outra", Some("Granel")).unwrap().as_str(),
            "Granel"
        );
        assert_eq!(
            TipoCarga::resolver("Saca/Batida", None).unwrap().as_str(),
            "Saca/Batida"
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            StatusVeiculo::parse("EM_PROCESSO"),
            Some(StatusVeiculo::EmProcesso)
        );
        assert_eq!(StatusVeiculo::parse("CANCELADO"), None);
        assert_eq!(StatusVeiculo::Aguardando.as_str(), "AGUARDANDO");
    }
}
