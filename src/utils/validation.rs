//! Utilidades de validação
//!
//! Este módulo contém funções helper para validação de dados
//! que não cabem nos derives do validator.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::AppError;

lazy_static! {
    // Placa Mercosul ou padrão antigo: LLL D X DD, onde X é letra ou dígito
    static ref PLACA_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9][A-Z0-9][0-9]{2}$").unwrap();
}

/// Formato usado nos filtros preenchidos por humanos
pub const FORMATO_DATA_HUMANO: &str = "%d/%m/%Y %H:%M:%S";

/// Normalizar placa: maiúsculas, sem espaços nas pontas e sem hífen
pub fn normalizar_placa(valor: &str) -> String {
    valor.trim().to_uppercase().replace('-', "")
}

/// Normalizar e validar a placa contra o padrão Mercosul/antigo
pub fn validar_placa(valor: &str) -> Result<String, AppError> {
    let placa = normalizar_placa(valor);
    if PLACA_RE.is_match(&placa) {
        Ok(placa)
    } else {
        Err(AppError::Validacao(
            "Formato de placa inválido.".to_string(),
        ))
    }
}

/// Interpretar data/hora no formato humano dos filtros (DD/MM/YYYY HH:MM:SS)
pub fn parse_data_humana(valor: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(valor.trim(), FORMATO_DATA_HUMANO).ok()
}

/// Renderizar data/hora no formato humano dos filtros
pub fn formatar_data_humana(valor: &NaiveDateTime) -> String {
    valor.format(FORMATO_DATA_HUMANO).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placa_valida_mercosul() {
        assert_eq!(validar_placa("ABC1D23").unwrap(), "ABC1D23");
    }

    #[test]
    fn test_placa_valida_padrao_antigo() {
        assert_eq!(validar_placa("abc-1234").unwrap(), "ABC1234");
    }

    #[test]
    fn test_normalizacao_idempotente() {
        let normalizada = normalizar_placa(" abc-1d23 ");
        assert_eq!(normalizada, "ABC1D23");
        assert_eq!(normalizar_placa(&normalizada), normalizada);
        assert!(validar_placa(&normalizada).is_ok());
    }

    #[test]
    fn test_placa_invalida() {
        assert!(validar_placa("AB12345").is_err());
        assert!(validar_placa("ABCD123").is_err());
        assert!(validar_placa("").is_err());
    }

    #[test]
    fn test_data_humana_ida_e_volta() {
        let dt = parse_data_humana("05/03/2025 14:30:00").unwrap();
        assert_eq!(formatar_data_humana(&dt), "05/03/2025 14:30:00");
        assert!(parse_data_humana("2025-03-05 14:30").is_none());
    }
}
