//! Configuração de variáveis de ambiente
//!
//! Este módulo lê a configuração do ambiente, incluindo os horários
//! de início dos turnos (colaborador de configuração externo).

use std::env;

use crate::services::turno_service::TurnoConfig;

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub turno_t1_inicio: u32,
    pub turno_t2_inicio: u32,
    pub turno_t3_inicio: u32,
}

fn var_ou(nome: &str, padrao: &str) -> String {
    env::var(nome).unwrap_or_else(|_| padrao.to_string())
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let config = Self {
            environment: var_ou("ENVIRONMENT", "development"),
            port: var_ou("PORT", "3000")
                .parse()
                .expect("PORT must be a valid number"),
            host: var_ou("HOST", "0.0.0.0"),
            cors_origins: var_ou("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            turno_t1_inicio: var_ou("TURNO_T1_INICIO", "6")
                .parse()
                .expect("TURNO_T1_INICIO must be a valid hour"),
            turno_t2_inicio: var_ou("TURNO_T2_INICIO", "14")
                .parse()
                .expect("TURNO_T2_INICIO must be a valid hour"),
            turno_t3_inicio: var_ou("TURNO_T3_INICIO", "22")
                .parse()
                .expect("TURNO_T3_INICIO must be a valid hour"),
        };
        config.validar();
        config
    }
}

impl EnvironmentConfig {
    /// Verificar se estamos em modo desenvolvimento
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar se estamos em modo produção
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Configuração dos turnos derivada do ambiente
    pub fn turnos(&self) -> TurnoConfig {
        TurnoConfig {
            inicio_t1: self.turno_t1_inicio,
            inicio_t2: self.turno_t2_inicio,
            inicio_t3: self.turno_t3_inicio,
        }
    }

    // Horários fora de 0..24 ou fora de ordem quebrariam a partição do dia
    fn validar(&self) {
        assert!(
            self.turno_t1_inicio < self.turno_t2_inicio
                && self.turno_t2_inicio < self.turno_t3_inicio
                && self.turno_t3_inicio < 24,
            "horários de turno devem ser crescentes e menores que 24"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_padrao() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.turnos().inicio_t1, 6);
        assert_eq!(config.turnos().inicio_t2, 14);
        assert_eq!(config.turnos().inicio_t3, 22);
    }
}
