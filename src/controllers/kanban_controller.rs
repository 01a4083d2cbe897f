//! Controller do quadro kanban
//!
//! Concentra as operações de painel: listagem ordenada do quadro,
//! transição de status, arquivamento de turnos passados, contagens e
//! o snapshot de docas.

use std::collections::BTreeMap;

use chrono::Local;
use serde::Serialize;

use crate::middleware::auth::Papel;
use crate::models::veiculo::{AtualizarStatusRequest, StatusVeiculo, Veiculo, VeiculoResponse};
use crate::repositories::historico_repository::HistoricoRepository;
use crate::repositories::veiculo_repository::VeiculoRepository;
use crate::services::doca_service::{montar_status_docas, StatusDoca};
use crate::services::status_service::{
    aplicar_transicao, classe_finalizacao, elegivel_para_arquivamento, faixa_por_duracao,
    FaixaTempo,
};
use crate::services::turno_service::turno_atual;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Contagem de cards por coluna do quadro
#[derive(Debug, Default, Serialize)]
pub struct KanbanCounts {
    pub aguardando: i64,
    pub em_processo: i64,
    pub finalizado: i64,
}

/// Faixas de tempo dos veículos em processo
#[derive(Debug, Default, Serialize)]
pub struct ProcessoContadores {
    pub ok: i64,
    pub alerta: i64,
    pub atrasado: i64,
}

#[derive(Debug, Serialize)]
pub struct QuadroResponse {
    pub veiculos: Vec<VeiculoResponse>,
    pub kanban_counts: KanbanCounts,
    pub processo_contadores: ProcessoContadores,
}

#[derive(Debug, Serialize)]
pub struct ContagensResponse {
    pub shift_name: String,
    pub waiting_count: i64,
    pub in_process_count: i64,
    pub finished_count: i64,
}

pub struct KanbanController {
    veiculos: VeiculoRepository,
    historico: HistoricoRepository,
    state: AppState,
}

impl KanbanController {
    pub fn new(state: AppState) -> Self {
        Self {
            veiculos: VeiculoRepository::new(state.pool.clone()),
            historico: HistoricoRepository::new(state.pool.clone()),
            state,
        }
    }

    /// Quadro completo: cards ordenados por coluna mais contadores
    pub async fn quadro(&self) -> Result<QuadroResponse, AppError> {
        let veiculos = self.veiculos.listar_kanban().await?;
        let agora = Local::now().naive_local();

        let mut counts = KanbanCounts::default();
        let mut processo = ProcessoContadores::default();

        for veiculo in &veiculos {
            match veiculo.status_enum() {
                Some(StatusVeiculo::Aguardando) => counts.aguardando += 1,
                Some(StatusVeiculo::Finalizado) => counts.finalizado += 1,
                Some(StatusVeiculo::EmProcesso) => {
                    counts.em_processo += 1;
                    if let Some(inicio) = veiculo.hora_inicio {
                        match faixa_por_duracao(agora - inicio) {
                            FaixaTempo::Ok => processo.ok += 1,
                            FaixaTempo::Alerta => processo.alerta += 1,
                            FaixaTempo::Atrasado => processo.atrasado += 1,
                        }
                    }
                }
                None => {}
            }
        }

        let cards = veiculos.iter().map(montar_card).collect();

        Ok(QuadroResponse {
            veiculos: cards,
            kanban_counts: counts,
            processo_contadores: processo,
        })
    }

    /// Aplicar uma transição de status vinda do quadro. O commit
    /// acontece antes do registro de auditoria (outbox best-effort).
    pub async fn atualizar_status(
        &self,
        papel: Papel,
        request: AtualizarStatusRequest,
    ) -> Result<VeiculoResponse, AppError> {
        if !papel.pode_operar() {
            return Err(AppError::Forbidden(
                "Seu perfil não pode mover veículos no quadro.".to_string(),
            ));
        }

        let veiculo = self
            .veiculos
            .buscar_por_id(request.veiculo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        // O frontend manda o id da coluna ("column-EM_PROCESSO")
        let alvo = request.novo_status.replace("column-", "");
        let novo_status = StatusVeiculo::parse(&alvo).ok_or_else(|| {
            AppError::TransicaoInvalida(format!("Status desconhecido: {}", alvo))
        })?;

        let agora = Local::now().naive_local();
        let efeito = aplicar_transicao(
            &veiculo,
            novo_status,
            agora,
            &self.state.config.turnos(),
        )?;

        let status_anterior = veiculo.status.clone();
        let atualizado = self
            .veiculos
            .atualizar_status(veiculo.id, &efeito, veiculo.doca.as_deref())
            .await?;

        self.state.auditoria.registrar(
            papel.as_str(),
            "ATUALIZAR_STATUS",
            format!(
                "Status do veículo '{}' alterado de '{}' para '{}'.",
                atualizado.placa,
                status_anterior,
                novo_status.as_str()
            ),
        );

        Ok(montar_card(&atualizado))
    }

    /// Arquivar os finalizados de turnos anteriores, em lote atômico
    pub async fn arquivar(&self, papel: Papel) -> Result<u64, AppError> {
        let agora = Local::now().naive_local();
        let turno = turno_atual(&self.state.config.turnos(), agora);

        let finalizados = self.veiculos.listar_finalizados().await?;
        let lote: Vec<Veiculo> = finalizados
            .into_iter()
            .filter(|v| elegivel_para_arquivamento(v, turno))
            .collect();

        if lote.is_empty() {
            return Ok(0);
        }

        let total = self.historico.arquivar_lote(&lote, agora).await?;

        self.state.auditoria.registrar(
            papel.as_str(),
            "ARQUIVAR_VEICULOS",
            format!("{} veículos foram arquivados manualmente.", total),
        );

        Ok(total)
    }

    /// Turno corrente mais contagens por status da tabela ativa
    pub async fn contagens(&self) -> Result<ContagensResponse, AppError> {
        let agora = Local::now().naive_local();
        let turno = turno_atual(&self.state.config.turnos(), agora);

        let waiting_count = self
            .veiculos
            .contar_por_status(StatusVeiculo::Aguardando)
            .await?;
        let in_process_count = self
            .veiculos
            .contar_por_status(StatusVeiculo::EmProcesso)
            .await?;
        let finished_count = self
            .veiculos
            .contar_por_status(StatusVeiculo::Finalizado)
            .await?;

        Ok(ContagensResponse {
            shift_name: turno.as_str().to_string(),
            waiting_count,
            in_process_count,
            finished_count,
        })
    }

    /// Snapshot derivado do mapa de docas
    pub async fn status_docas(&self) -> Result<BTreeMap<String, StatusDoca>, AppError> {
        let ativos = self.veiculos.ativos_com_doca().await?;
        let agora = Local::now().naive_local();
        Ok(montar_status_docas(&ativos, agora))
    }
}

fn montar_card(veiculo: &Veiculo) -> VeiculoResponse {
    VeiculoResponse {
        id: veiculo.id,
        placa: veiculo.placa.clone(),
        origem: veiculo.origem.clone(),
        id_viagem: veiculo.id_viagem.clone(),
        doca: veiculo.doca.clone(),
        turno: veiculo.turno.clone(),
        tipo_veiculo: veiculo.tipo_veiculo.clone(),
        tipo_carga: veiculo.tipo_carga.clone(),
        status: veiculo.status.clone(),
        hora_inicio: veiculo
            .hora_inicio
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        horario_atualizacao: veiculo
            .horario_atualizacao
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        turno_finalizacao: veiculo.turno_finalizacao.clone(),
        tempo_descarga: veiculo.tempo_descarga.clone(),
        finalization_status_class: classe_finalizacao(veiculo).to_string(),
    }
}
