//! Controller de veículos
//!
//! Orquestra validação, regras de autorização e persistência das
//! operações CRUD sobre a tabela ativa, além da listagem combinada
//! com o histórico.

use chrono::Local;
use serde::Serialize;
use validator::Validate;

use crate::middleware::auth::Papel;
use crate::models::historico::ItemListagemResponse;
use crate::models::veiculo::{
    CamposAtualizacao, CreateVeiculoRequest, DetalheVeiculoResponse, ListagemFiltros,
    NovoVeiculo, StatusVeiculo, TipoCarga, TipoVeiculo, UpdateVeiculoRequest, Veiculo,
};
use crate::repositories::historico_repository::HistoricoRepository;
use crate::repositories::veiculo_repository::VeiculoRepository;
use crate::repositories::FiltrosResolvidos;
use crate::services::status_service::editavel;
use crate::services::turno_service::{limites_do_turno, turno_atual};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{formatar_data_humana, parse_data_humana, validar_placa};

/// Filtros efetivamente aplicados, ecoados na resposta para que o
/// frontend faça round-trip dos valores padrão
#[derive(Debug, Serialize)]
pub struct FiltrosAplicados {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub placa: Option<String>,
    pub status: Option<String>,
    pub motorista: Option<String>,
    pub tipo_veiculo: Option<String>,
    pub turno: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListagemResponse {
    pub veiculos: Vec<ItemListagemResponse>,
    pub filtros: FiltrosAplicados,
}

pub struct VeiculoController {
    veiculos: VeiculoRepository,
    historico: HistoricoRepository,
    state: AppState,
}

impl VeiculoController {
    pub fn new(state: AppState) -> Self {
        Self {
            veiculos: VeiculoRepository::new(state.pool.clone()),
            historico: HistoricoRepository::new(state.pool.clone()),
            state,
        }
    }

    pub async fn criar(
        &self,
        papel: Papel,
        request: CreateVeiculoRequest,
    ) -> Result<Veiculo, AppError> {
        if !papel.pode_operar() {
            return Err(AppError::Forbidden(
                "Seu perfil não pode adicionar veículos.".to_string(),
            ));
        }

        let tipo_veiculo =
            TipoVeiculo::resolver(&request.tipo_veiculo, request.tipo_veiculo_outro.as_deref())?;
        let tipo_carga =
            TipoCarga::resolver(&request.tipo_carga, request.tipo_carga_outra.as_deref())?;

        request.validate()?;

        let placa = validar_placa(&request.placa)?;
        let doca = request.doca.trim().to_string();

        // Checagem amigável; o índice parcial no banco é a garantia final
        if let Some(ocupante) = self.veiculos.ocupante_da_doca(&doca, None).await? {
            return Err(AppError::Conflito(format!(
                "A doca {} já está ocupada pelo veículo de placa {}.",
                doca, ocupante.placa
            )));
        }

        let novo = NovoVeiculo {
            placa: placa.clone(),
            origem: request.origem,
            turno: request.turno,
            id_viagem: request.id_viagem,
            data_planejada: request.data_planejada,
            data_checkin: request.data_checkin,
            hora_real_chegada: request.hora_real_chegada,
            motorista: request.motorista,
            tipo_veiculo: tipo_veiculo.as_str().to_string(),
            tipo_carga: tipo_carga.as_str().to_string(),
            volumetria_sistematica: request.volumetria_sistematica,
            percent_ocupacao: request.percent_ocupacao,
            rede_contencao: request.rede_contencao,
            doca: Some(doca),
            observacao: request.observacao,
            data: Local::now().naive_local(),
        };

        let veiculo = self.veiculos.criar(novo).await?;

        self.state.auditoria.registrar(
            papel.as_str(),
            "CRIAR_VEICULO",
            format!("Veículo placa '{}' foi adicionado.", placa),
        );

        Ok(veiculo)
    }

    pub async fn atualizar(
        &self,
        id: i64,
        papel: Papel,
        request: UpdateVeiculoRequest,
    ) -> Result<Veiculo, AppError> {
        if !papel.pode_operar() {
            return Err(AppError::Forbidden(
                "Seu perfil não pode editar veículos.".to_string(),
            ));
        }

        let existente = self
            .veiculos
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Veículo {} não encontrado", id)))?;

        if !editavel(&existente, papel) {
            return Err(AppError::Forbidden(
                "Você não tem permissão para editar um veículo finalizado.".to_string(),
            ));
        }

        let tipo_veiculo =
            TipoVeiculo::resolver(&request.tipo_veiculo, request.tipo_veiculo_outro.as_deref())?;
        let tipo_carga =
            TipoCarga::resolver(&request.tipo_carga, request.tipo_carga_outra.as_deref())?;

        request.validate()?;

        let placa = validar_placa(&request.placa)?;
        let doca = request
            .doca
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        if let Some(doca) = &doca {
            if let Some(ocupante) = self.veiculos.ocupante_da_doca(doca, Some(id)).await? {
                return Err(AppError::Conflito(format!(
                    "A doca {} já está ocupada pelo veículo de placa {}.",
                    doca, ocupante.placa
                )));
            }
        }

        let campos = CamposAtualizacao {
            placa: placa.clone(),
            origem: request.origem,
            turno: request.turno,
            id_viagem: request.id_viagem,
            data_planejada: request.data_planejada,
            data_checkin: request.data_checkin,
            hora_real_chegada: request.hora_real_chegada,
            motorista: request.motorista,
            tipo_veiculo: tipo_veiculo.as_str().to_string(),
            tipo_carga: tipo_carga.as_str().to_string(),
            volumetria_sistematica: request.volumetria_sistematica,
            percent_ocupacao: request.percent_ocupacao,
            rede_contencao: request.rede_contencao,
            doca,
            observacao: request.observacao,
        };

        let veiculo = self.veiculos.atualizar(id, campos).await?;

        self.state.auditoria.registrar(
            papel.as_str(),
            "EDITAR_VEICULO",
            format!("Veículo placa '{}' foi editado.", placa),
        );

        Ok(veiculo)
    }

    pub async fn excluir(&self, id: i64, papel: Papel) -> Result<String, AppError> {
        if !papel.pode_operar() {
            return Err(AppError::Forbidden(
                "Seu perfil não pode excluir veículos.".to_string(),
            ));
        }

        let veiculo = self
            .veiculos
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Veículo {} não encontrado", id)))?;

        if veiculo.status != StatusVeiculo::Aguardando.as_str() {
            return Err(AppError::EstadoIlegal(
                "Apenas veículos no status \"Aguardando\" podem ser excluídos.".to_string(),
            ));
        }

        self.veiculos.excluir(id).await?;

        self.state.auditoria.registrar(
            papel.as_str(),
            "EXCLUIR_VEICULO",
            format!("Veículo placa '{}' foi excluído.", veiculo.placa),
        );

        Ok(veiculo.placa)
    }

    pub async fn detalhe(&self, id: i64) -> Result<DetalheVeiculoResponse, AppError> {
        let veiculo = self
            .veiculos
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Veículo {} não encontrado", id)))?;

        Ok(DetalheVeiculoResponse::from(&veiculo))
    }

    /// Listagem combinada de ativos e histórico. Sem filtro de data
    /// explícito, a janela padrão é o turno corrente.
    pub async fn listagem(&self, filtros: ListagemFiltros) -> Result<ListagemResponse, AppError> {
        let turnos = self.state.config.turnos();
        let agora = Local::now().naive_local();

        let sem_janela = filtros.data_inicio.is_none() && filtros.data_fim.is_none();
        let (data_inicio, data_fim) = if sem_janela {
            let turno = turno_atual(&turnos, agora);
            let (inicio, fim) = limites_do_turno(&turnos, agora, turno);
            (Some(inicio), Some(fim))
        } else {
            // Formato inválido é ignorado, como um filtro não preenchido
            let inicio = filtros.data_inicio.as_deref().and_then(|valor| {
                let parsed = parse_data_humana(valor);
                if parsed.is_none() {
                    tracing::warn!("Formato de data de início inválido, ignorando: {}", valor);
                }
                parsed
            });
            let fim = filtros.data_fim.as_deref().and_then(|valor| {
                let parsed = parse_data_humana(valor);
                if parsed.is_none() {
                    tracing::warn!("Formato de data final inválido, ignorando: {}", valor);
                }
                parsed
            });
            (inicio, fim)
        };

        let sem_todos = |valor: Option<String>| valor.filter(|v| !v.is_empty() && v != "todos");

        let resolvidos = FiltrosResolvidos {
            data_inicio,
            data_fim,
            placa: filtros.placa.clone().filter(|p| !p.is_empty()),
            status: sem_todos(filtros.status.clone()),
            motorista: filtros.motorista.clone().filter(|m| !m.is_empty()),
            tipo_veiculo: sem_todos(filtros.tipo_veiculo.clone()),
            turno: sem_todos(filtros.turno.clone()),
        };

        let ativos = self.veiculos.listar_filtrado(&resolvidos).await?;
        let arquivados = self.historico.listar_filtrado(&resolvidos).await?;

        let mut itens: Vec<ItemListagemResponse> = ativos
            .iter()
            .map(ItemListagemResponse::from)
            .chain(arquivados.iter().map(ItemListagemResponse::from))
            .collect();
        itens.sort_by(|a, b| b.data.cmp(&a.data));

        Ok(ListagemResponse {
            veiculos: itens,
            filtros: FiltrosAplicados {
                data_inicio: data_inicio.map(|dt| formatar_data_humana(&dt)),
                data_fim: data_fim.map(|dt| formatar_data_humana(&dt)),
                placa: resolvidos.placa,
                status: resolvidos.status,
                motorista: resolvidos.motorista,
                tipo_veiculo: resolvidos.tipo_veiculo,
                turno: resolvidos.turno,
            },
        })
    }
}
