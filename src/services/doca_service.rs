//! Registro de docas
//!
//! O estado das docas nunca é persistido: é derivado sob demanda dos
//! veículos ativos que referenciam cada doca. O universo é fixo
//! (1..=30 e 61..=90); docas fora dele nunca aparecem no snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::veiculo::{StatusVeiculo, Veiculo};
use crate::services::status_service::faixa_por_duracao;

const STATUS_LIVRE: &str = "LIVRE";

/// Snapshot de uma doca no mapa do painel
#[derive(Debug, Clone, Serialize)]
pub struct StatusDoca {
    pub status: String,
    pub placa: Option<String>,
    pub timing_status: Option<String>,
    pub hora_inicio: Option<String>,
    pub veiculo_id: Option<i64>,
}

impl StatusDoca {
    fn livre() -> Self {
        Self {
            status: STATUS_LIVRE.to_string(),
            placa: None,
            timing_status: None,
            hora_inicio: None,
            veiculo_id: None,
        }
    }
}

/// Universo fixo de docas físicas
pub fn universo_docas() -> impl Iterator<Item = u32> {
    (1..=30).chain(61..=90)
}

/// Montar o snapshot de todas as docas a partir dos veículos ativos.
/// O invariante de unicidade garante no máximo um ocupante por doca.
pub fn montar_status_docas(
    veiculos_ativos: &[Veiculo],
    agora: NaiveDateTime,
) -> BTreeMap<String, StatusDoca> {
    let mut docas: BTreeMap<String, StatusDoca> = universo_docas()
        .map(|id| (id.to_string(), StatusDoca::livre()))
        .collect();

    for veiculo in veiculos_ativos {
        let chave = match &veiculo.doca {
            Some(doca) => doca.trim().to_string(),
            None => continue,
        };
        // Doca fora do universo físico: ignorada, nunca reportada
        if !docas.contains_key(&chave) {
            continue;
        }

        let mut timing_status = None;
        let mut hora_inicio_iso = None;

        if veiculo.status == StatusVeiculo::EmProcesso.as_str() {
            if let Some(inicio) = veiculo.hora_inicio {
                timing_status = Some(faixa_por_duracao(agora - inicio).rotulo_doca().to_string());
                hora_inicio_iso = Some(inicio.format("%Y-%m-%dT%H:%M:%S").to_string());
            }
        } else if veiculo.status == StatusVeiculo::Aguardando.as_str() {
            // Na fila a referência é a entrada no pátio, sem faixa de tempo
            hora_inicio_iso = Some(veiculo.data.format("%Y-%m-%dT%H:%M:%S").to_string());
        }

        docas.insert(
            chave,
            StatusDoca {
                status: veiculo.status.to_uppercase(),
                placa: Some(veiculo.placa.clone()),
                timing_status,
                hora_inicio: hora_inicio_iso,
                veiculo_id: Some(veiculo.id),
            },
        );
    }

    docas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(hora: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(hora, min, 0)
            .unwrap()
    }

    fn veiculo(id: i64, status: &str, doca: &str) -> Veiculo {
        Veiculo {
            id,
            placa: format!("ABC1D2{}", id % 10),
            origem: "CD Campinas".to_string(),
            turno: "T1".to_string(),
            id_viagem: "V-1001".to_string(),
            data_planejada: "05/03/2025".to_string(),
            data_checkin: "05/03/2025".to_string(),
            hora_real_chegada: "08:15".to_string(),
            motorista: None,
            tipo_veiculo: "Truck".to_string(),
            tipo_carga: "Batida".to_string(),
            volumetria_sistematica: 900,
            percent_ocupacao: 70,
            rede_contencao: "Sim".to_string(),
            doca: Some(doca.to_string()),
            observacao: None,
            status: status.to_string(),
            data: dt(7, 30),
            hora_inicio: None,
            horario_atualizacao: None,
            turno_finalizacao: None,
            tempo_descarga: None,
        }
    }

    #[test]
    fn test_universo_exclui_intervalo_do_meio() {
        let ids: Vec<u32> = universo_docas().collect();
        assert_eq!(ids.len(), 60);
        assert!(ids.contains(&1));
        assert!(ids.contains(&30));
        assert!(ids.contains(&61));
        assert!(ids.contains(&90));
        assert!(!ids.contains(&31));
        assert!(!ids.contains(&60));
        assert!(!ids.contains(&0));
        assert!(!ids.contains(&91));
    }

    #[test]
    fn test_todas_livres_sem_veiculos() {
        let docas = montar_status_docas(&[], dt(10, 0));
        assert_eq!(docas.len(), 60);
        assert!(docas.values().all(|d| d.status == "LIVRE"));
    }

    #[test]
    fn test_em_processo_com_faixa_de_tempo() {
        let mut v = veiculo(1, "EM_PROCESSO", "5");
        v.hora_inicio = Some(dt(5, 0));
        let docas = montar_status_docas(&[v], dt(10, 0));
        let doca = &docas["5"];
        assert_eq!(doca.status, "EM_PROCESSO");
        assert_eq!(doca.timing_status.as_deref(), Some("LATE"));
        assert_eq!(doca.veiculo_id, Some(1));
        assert!(doca.hora_inicio.as_deref().unwrap().starts_with("2025-03-05T05:00"));
    }

    #[test]
    fn test_aguardando_sem_faixa_usa_entrada() {
        let v = veiculo(2, "AGUARDANDO", "61");
        let docas = montar_status_docas(&[v], dt(10, 0));
        let doca = &docas["61"];
        assert_eq!(doca.status, "AGUARDANDO");
        assert!(doca.timing_status.is_none());
        assert!(doca.hora_inicio.as_deref().unwrap().starts_with("2025-03-05T07:30"));
    }

    #[test]
    fn test_doca_fora_do_universo_nao_aparece() {
        let v = veiculo(3, "AGUARDANDO", "45");
        let docas = montar_status_docas(&[v], dt(10, 0));
        assert!(!docas.contains_key("45"));
        assert_eq!(docas.len(), 60);
    }
}
