//! Máquina de estados do ciclo de vida
//!
//! AGUARDANDO → EM_PROCESSO → FINALIZADO, com a única regressão permitida
//! FINALIZADO → EM_PROCESSO. Qualquer outro par é rejeitado. Também
//! concentra o cálculo do tempo de descarga e a classificação por faixa
//! de tempo usada nos cards e no mapa de docas.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::middleware::auth::Papel;
use crate::models::veiculo::{StatusVeiculo, Veiculo};
use crate::services::turno_service::{turno_para_hora, Turno, TurnoConfig};
use crate::utils::errors::AppError;

/// Faixa de tempo de um veículo em processo ou finalizado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaixaTempo {
    Ok,
    Alerta,
    Atrasado,
}

impl FaixaTempo {
    /// Classe CSS usada nos cards do quadro
    pub fn classe_css(&self) -> &'static str {
        match self {
            FaixaTempo::Ok => "status-ok",
            FaixaTempo::Alerta => "status-alerta",
            FaixaTempo::Atrasado => "status-atrasado",
        }
    }

    /// Rótulo usado no mapa de docas
    pub fn rotulo_doca(&self) -> &'static str {
        match self {
            FaixaTempo::Ok => "ON_TIME",
            FaixaTempo::Alerta => "WARNING",
            FaixaTempo::Atrasado => "LATE",
        }
    }
}

/// Novos valores dos campos de ciclo de vida após uma transição
#[derive(Debug, Clone)]
pub struct EfeitoTransicao {
    pub status: StatusVeiculo,
    pub hora_inicio: Option<NaiveDateTime>,
    pub horario_atualizacao: Option<NaiveDateTime>,
    pub turno_finalizacao: Option<String>,
    pub tempo_descarga: Option<String>,
}

/// Aplicar a tabela de transições ao veículo. Função pura: devolve os
/// campos a persistir sem tocar no registro.
pub fn aplicar_transicao(
    veiculo: &Veiculo,
    novo_status: StatusVeiculo,
    agora: NaiveDateTime,
    config: &TurnoConfig,
) -> Result<EfeitoTransicao, AppError> {
    let atual = veiculo.status_enum().ok_or_else(|| {
        AppError::Internal(format!("status desconhecido no banco: {}", veiculo.status))
    })?;

    match (atual, novo_status) {
        (StatusVeiculo::Aguardando, StatusVeiculo::EmProcesso) => Ok(EfeitoTransicao {
            status: StatusVeiculo::EmProcesso,
            hora_inicio: Some(agora),
            horario_atualizacao: veiculo.horario_atualizacao,
            turno_finalizacao: veiculo.turno_finalizacao.clone(),
            tempo_descarga: veiculo.tempo_descarga.clone(),
        }),
        (StatusVeiculo::EmProcesso, StatusVeiculo::Finalizado) => Ok(EfeitoTransicao {
            status: StatusVeiculo::Finalizado,
            hora_inicio: veiculo.hora_inicio,
            horario_atualizacao: Some(agora),
            turno_finalizacao: Some(
                turno_para_hora(config, agora.hour()).as_str().to_string(),
            ),
            tempo_descarga: veiculo
                .hora_inicio
                .map(|inicio| formatar_duracao(inicio, agora)),
        }),
        (StatusVeiculo::Finalizado, StatusVeiculo::EmProcesso) => Ok(EfeitoTransicao {
            status: StatusVeiculo::EmProcesso,
            hora_inicio: veiculo.hora_inicio,
            horario_atualizacao: None,
            turno_finalizacao: None,
            tempo_descarga: None,
        }),
        (de, para) => Err(AppError::TransicaoInvalida(format!(
            "Transição de status inválida: {} -> {}",
            de.as_str(),
            para.as_str()
        ))),
    }
}

/// Formatar a duração entre dois instantes como "Hh Mm", truncando para
/// minutos inteiros. Uma duração positiva que trunca para zero vira "0h 1m".
pub fn formatar_duracao(inicio: NaiveDateTime, fim: NaiveDateTime) -> String {
    let total_segundos = (fim - inicio).num_seconds();
    let horas = total_segundos / 3600;
    let mut minutos = (total_segundos % 3600) / 60;
    if horas == 0 && minutos == 0 && total_segundos > 0 {
        minutos = 1;
    }
    format!("{}h {}m", horas, minutos)
}

/// Faixa de tempo a partir de uma duração decorrida
pub fn faixa_por_duracao(duracao: Duration) -> FaixaTempo {
    let segundos = duracao.num_seconds();
    if segundos >= 4 * 3600 {
        FaixaTempo::Atrasado
    } else if segundos >= 2 * 3600 {
        FaixaTempo::Alerta
    } else {
        FaixaTempo::Ok
    }
}

/// Classe de finalização de um card a partir do tempo de descarga
/// armazenado ("Hh Mm"). Veículos sem tempo ficam na faixa ok.
pub fn classe_finalizacao(veiculo: &Veiculo) -> &'static str {
    if veiculo.status != StatusVeiculo::Finalizado.as_str() {
        return FaixaTempo::Ok.classe_css();
    }
    match &veiculo.tempo_descarga {
        Some(tempo) => faixa_por_tempo_descarga(tempo).classe_css(),
        None => FaixaTempo::Ok.classe_css(),
    }
}

/// Faixa de tempo a partir do texto "Hh Mm" persistido
pub fn faixa_por_tempo_descarga(tempo_descarga: &str) -> FaixaTempo {
    let horas = tempo_descarga
        .split('h')
        .next()
        .and_then(|parte| parte.trim().parse::<f64>().ok())
        .unwrap_or(0.0);
    if horas >= 4.0 {
        FaixaTempo::Atrasado
    } else if horas >= 2.0 {
        FaixaTempo::Alerta
    } else {
        FaixaTempo::Ok
    }
}

/// Veículos finalizados só podem ser editados por ADMIN. O papel chega
/// como parâmetro explícito, nunca de estado ambiente.
pub fn editavel(veiculo: &Veiculo, papel: Papel) -> bool {
    veiculo.status != StatusVeiculo::Finalizado.as_str() || papel == Papel::Admin
}

/// Um finalizado é arquivável quando seu turno de finalização não é o
/// turno corrente; turno nulo conta como turno passado.
pub fn elegivel_para_arquivamento(veiculo: &Veiculo, turno_corrente: Turno) -> bool {
    veiculo.status == StatusVeiculo::Finalizado.as_str()
        && veiculo.turno_finalizacao.as_deref() != Some(turno_corrente.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(hora: u32, min: u32, seg: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(hora, min, seg)
            .unwrap()
    }

    fn veiculo_base(status: &str) -> Veiculo {
        Veiculo {
            id: 1,
            placa: "ABC1D23".to_string(),
            origem: "CD Campinas".to_string(),
            turno: "T1".to_string(),
            id_viagem: "V-1001".to_string(),
            data_planejada: "05/03/2025".to_string(),
            data_checkin: "05/03/2025".to_string(),
            hora_real_chegada: "08:15".to_string(),
            motorista: None,
            tipo_veiculo: "Carreta".to_string(),
            tipo_carga: "Saca".to_string(),
            volumetria_sistematica: 1200,
            percent_ocupacao: 80,
            rede_contencao: "Sim".to_string(),
            doca: Some("5".to_string()),
            observacao: None,
            status: status.to_string(),
            data: dt(8, 0, 0),
            hora_inicio: None,
            horario_atualizacao: None,
            turno_finalizacao: None,
            tempo_descarga: None,
        }
    }

    #[test]
    fn test_aguardando_para_em_processo_marca_inicio() {
        let veiculo = veiculo_base("AGUARDANDO");
        let efeito =
            aplicar_transicao(&veiculo, StatusVeiculo::EmProcesso, dt(9, 0, 0), &TurnoConfig::default())
                .unwrap();
        assert_eq!(efeito.status, StatusVeiculo::EmProcesso);
        assert_eq!(efeito.hora_inicio, Some(dt(9, 0, 0)));
        assert!(efeito.tempo_descarga.is_none());
    }

    #[test]
    fn test_finalizar_calcula_tempo_e_turno() {
        let mut veiculo = veiculo_base("EM_PROCESSO");
        veiculo.hora_inicio = Some(dt(10, 0, 0));
        let efeito = aplicar_transicao(
            &veiculo,
            StatusVeiculo::Finalizado,
            dt(12, 15, 0),
            &TurnoConfig::default(),
        )
        .unwrap();
        assert_eq!(efeito.status, StatusVeiculo::Finalizado);
        assert_eq!(efeito.tempo_descarga.as_deref(), Some("2h 15m"));
        assert_eq!(efeito.turno_finalizacao.as_deref(), Some("T1"));
        assert_eq!(efeito.horario_atualizacao, Some(dt(12, 15, 0)));
    }

    #[test]
    fn test_regressao_limpa_campos_de_finalizacao() {
        let mut veiculo = veiculo_base("FINALIZADO");
        veiculo.hora_inicio = Some(dt(10, 0, 0));
        veiculo.horario_atualizacao = Some(dt(12, 0, 0));
        veiculo.turno_finalizacao = Some("T1".to_string());
        veiculo.tempo_descarga = Some("2h 0m".to_string());
        let efeito = aplicar_transicao(
            &veiculo,
            StatusVeiculo::EmProcesso,
            dt(13, 0, 0),
            &TurnoConfig::default(),
        )
        .unwrap();
        assert_eq!(efeito.status, StatusVeiculo::EmProcesso);
        assert_eq!(efeito.hora_inicio, Some(dt(10, 0, 0)));
        assert!(efeito.horario_atualizacao.is_none());
        assert!(efeito.turno_finalizacao.is_none());
        assert!(efeito.tempo_descarga.is_none());
    }

    #[test]
    fn test_rejeita_fora_da_tabela() {
        let veiculo = veiculo_base("AGUARDANDO");
        let erro = aplicar_transicao(
            &veiculo,
            StatusVeiculo::Finalizado,
            dt(9, 0, 0),
            &TurnoConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(erro, AppError::TransicaoInvalida(_)));

        let finalizado = veiculo_base("FINALIZADO");
        assert!(aplicar_transicao(
            &finalizado,
            StatusVeiculo::Aguardando,
            dt(9, 0, 0),
            &TurnoConfig::default()
        )
        .is_err());

        let em_processo = veiculo_base("EM_PROCESSO");
        assert!(aplicar_transicao(
            &em_processo,
            StatusVeiculo::Aguardando,
            dt(9, 0, 0),
            &TurnoConfig::default()
        )
        .is_err());
    }

    #[test]
    fn test_duracao_arredonda_para_cima() {
        assert_eq!(formatar_duracao(dt(10, 0, 0), dt(10, 0, 30)), "0h 1m");
    }

    #[test]
    fn test_duracao_zero_fica_zero() {
        assert_eq!(formatar_duracao(dt(10, 0, 0), dt(10, 0, 0)), "0h 0m");
    }

    #[test]
    fn test_duracao_normal() {
        assert_eq!(formatar_duracao(dt(10, 0, 0), dt(12, 15, 0)), "2h 15m");
    }

    #[test]
    fn test_faixas_por_duracao() {
        assert_eq!(faixa_por_duracao(Duration::minutes(90)), FaixaTempo::Ok);
        assert_eq!(faixa_por_duracao(Duration::hours(2)), FaixaTempo::Alerta);
        assert_eq!(
            faixa_por_duracao(Duration::minutes(135)),
            FaixaTempo::Alerta
        );
        assert_eq!(faixa_por_duracao(Duration::hours(4)), FaixaTempo::Atrasado);
    }

    #[test]
    fn test_faixa_por_tempo_descarga() {
        assert_eq!(faixa_por_tempo_descarga("2h 15m"), FaixaTempo::Alerta);
        assert_eq!(faixa_por_tempo_descarga("0h 45m"), FaixaTempo::Ok);
        assert_eq!(faixa_por_tempo_descarga("4h 0m"), FaixaTempo::Atrasado);
        assert_eq!(faixa_por_tempo_descarga("lixo"), FaixaTempo::Ok);
    }

    #[test]
    fn test_arquiva_turno_passado_e_turno_nulo() {
        let mut turno_passado = veiculo_base("FINALIZADO");
        turno_passado.turno_finalizacao = Some("T1".to_string());
        let mut sem_turno = veiculo_base("FINALIZADO");
        sem_turno.turno_finalizacao = None;
        let mut turno_corrente = veiculo_base("FINALIZADO");
        turno_corrente.turno_finalizacao = Some("T2".to_string());

        let lote = vec![turno_passado, sem_turno, turno_corrente];
        let elegiveis: Vec<_> = lote
            .iter()
            .filter(|v| elegivel_para_arquivamento(v, Turno::T2))
            .collect();

        assert_eq!(elegiveis.len(), 2);
        assert!(elegiveis
            .iter()
            .all(|v| v.turno_finalizacao.as_deref() != Some("T2")));
    }

    #[test]
    fn test_nao_finalizado_nunca_arquiva() {
        let mut em_processo = veiculo_base("EM_PROCESSO");
        em_processo.turno_finalizacao = Some("T1".to_string());
        assert!(!elegivel_para_arquivamento(&em_processo, Turno::T2));

        let aguardando = veiculo_base("AGUARDANDO");
        assert!(!elegivel_para_arquivamento(&aguardando, Turno::T2));
    }

    #[test]
    fn test_editavel_por_papel() {
        let finalizado = veiculo_base("FINALIZADO");
        assert!(editavel(&finalizado, Papel::Admin));
        assert!(!editavel(&finalizado, Papel::T1));
        let aguardando = veiculo_base("AGUARDANDO");
        assert!(editavel(&aguardando, Papel::T2));
    }
}
