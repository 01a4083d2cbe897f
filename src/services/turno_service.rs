//! Cálculo de turnos
//!
//! Mapeia uma hora do dia para um dos três turnos (T1/T2/T3) e calcula
//! os limites de início/fim de um turno a partir de um instante de
//! referência. O turno da madrugada atravessa a meia-noite, então o fim
//! cai no dia seguinte.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Horários de início de cada turno, vindos da configuração
#[derive(Debug, Clone, Copy)]
pub struct TurnoConfig {
    pub inicio_t1: u32,
    pub inicio_t2: u32,
    pub inicio_t3: u32,
}

impl Default for TurnoConfig {
    fn default() -> Self {
        Self {
            inicio_t1: 6,
            inicio_t2: 14,
            inicio_t3: 22,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turno {
    T1,
    T2,
    T3,
}

impl Turno {
    pub fn as_str(&self) -> &'static str {
        match self {
            Turno::T1 => "T1",
            Turno::T2 => "T2",
            Turno::T3 => "T3",
        }
    }
}

/// Turno correspondente a uma hora do dia (total sobre 0..24)
pub fn turno_para_hora(config: &TurnoConfig, hora: u32) -> Turno {
    if hora >= config.inicio_t1 && hora < config.inicio_t2 {
        Turno::T1
    } else if hora >= config.inicio_t2 && hora < config.inicio_t3 {
        Turno::T2
    } else {
        Turno::T3
    }
}

/// Turno em andamento no instante dado
pub fn turno_atual(config: &TurnoConfig, agora: NaiveDateTime) -> Turno {
    turno_para_hora(config, agora.hour())
}

/// Limites (início, fim) do turno que contém o instante de referência.
/// Para o T3 o fim é a abertura do T1 do dia seguinte; quando a referência
/// está na madrugada, o início foi na noite do dia anterior.
pub fn limites_do_turno(
    config: &TurnoConfig,
    referencia: NaiveDateTime,
    turno: Turno,
) -> (NaiveDateTime, NaiveDateTime) {
    let dia = referencia.date();
    let as_horas = |d: chrono::NaiveDate, h: u32| {
        d.and_hms_opt(h, 0, 0)
            .expect("hora de turno validada na configuração")
    };

    match turno {
        Turno::T1 => (
            as_horas(dia, config.inicio_t1),
            as_horas(dia, config.inicio_t2),
        ),
        Turno::T2 => (
            as_horas(dia, config.inicio_t2),
            as_horas(dia, config.inicio_t3),
        ),
        Turno::T3 => {
            if referencia.hour() >= config.inicio_t3 {
                (
                    as_horas(dia, config.inicio_t3),
                    as_horas(dia + Duration::days(1), config.inicio_t1),
                )
            } else {
                (
                    as_horas(dia - Duration::days(1), config.inicio_t3),
                    as_horas(dia, config.inicio_t1),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(ano: i32, mes: u32, dia: u32, hora: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(ano, mes, dia)
            .unwrap()
            .and_hms_opt(hora, min, 0)
            .unwrap()
    }

    #[test]
    fn test_mapa_de_horas_padrao() {
        let config = TurnoConfig::default();
        assert_eq!(turno_para_hora(&config, 6), Turno::T1);
        assert_eq!(turno_para_hora(&config, 13), Turno::T1);
        assert_eq!(turno_para_hora(&config, 14), Turno::T2);
        assert_eq!(turno_para_hora(&config, 21), Turno::T2);
        assert_eq!(turno_para_hora(&config, 22), Turno::T3);
        assert_eq!(turno_para_hora(&config, 0), Turno::T3);
        assert_eq!(turno_para_hora(&config, 5), Turno::T3);
    }

    #[test]
    fn test_total_sobre_todas_as_horas() {
        let config = TurnoConfig::default();
        for hora in 0..24 {
            let turno = turno_para_hora(&config, hora);
            let referencia = dt(2025, 3, 5, hora, 30);
            let (inicio, fim) = limites_do_turno(&config, referencia, turno);
            assert!(inicio < fim, "início >= fim para hora {}", hora);
            assert!(
                referencia >= inicio && referencia < fim,
                "referência fora do turno para hora {}",
                hora
            );
        }
    }

    #[test]
    fn test_limites_t1() {
        let config = TurnoConfig::default();
        let (inicio, fim) = limites_do_turno(&config, dt(2025, 3, 5, 9, 0), Turno::T1);
        assert_eq!(inicio, dt(2025, 3, 5, 6, 0));
        assert_eq!(fim, dt(2025, 3, 5, 14, 0));
    }

    #[test]
    fn test_t3_atravessa_meia_noite_lado_da_noite() {
        let config = TurnoConfig::default();
        let (inicio, fim) = limites_do_turno(&config, dt(2025, 3, 5, 23, 0), Turno::T3);
        assert_eq!(inicio, dt(2025, 3, 5, 22, 0));
        assert_eq!(fim, dt(2025, 3, 6, 6, 0));
    }

    #[test]
    fn test_t3_atravessa_meia_noite_lado_da_madrugada() {
        let config = TurnoConfig::default();
        let (inicio, fim) = limites_do_turno(&config, dt(2025, 3, 6, 2, 0), Turno::T3);
        assert_eq!(inicio, dt(2025, 3, 5, 22, 0));
        assert_eq!(fim, dt(2025, 3, 6, 6, 0));
    }
}
