//! Middleware de autorização por perfil
//!
//! O colaborador de autenticação externo injeta o perfil do usuário no
//! header X-Perfil. Aqui ele é interpretado e repassado como Extension,
//! de modo que os handlers recebem o papel como parâmetro explícito.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::utils::errors::AppError;

pub const HEADER_PERFIL: &str = "x-perfil";

/// Perfil do usuário autenticado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Papel {
    Admin,
    T1,
    T2,
    T3,
    Auditor,
}

impl Papel {
    pub fn parse(valor: &str) -> Option<Self> {
        match valor.to_uppercase().as_str() {
            "ADMIN" => Some(Papel::Admin),
            "T1" => Some(Papel::T1),
            "T2" => Some(Papel::T2),
            "T3" => Some(Papel::T3),
            "AUDITOR" => Some(Papel::Auditor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Papel::Admin => "ADMIN",
            Papel::T1 => "T1",
            Papel::T2 => "T2",
            Papel::T3 => "T3",
            Papel::Auditor => "AUDITOR",
        }
    }

    /// Perfis que podem criar, editar e mover veículos no quadro.
    /// AUDITOR só consulta.
    pub fn pode_operar(&self) -> bool {
        !matches!(self, Papel::Auditor)
    }
}

/// Extrair o perfil do header e injetá-lo nas extensions da request
pub async fn perfil_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let papel = request
        .headers()
        .get(HEADER_PERFIL)
        .and_then(|valor| valor.to_str().ok())
        .and_then(Papel::parse)
        .ok_or_else(|| {
            AppError::Unauthorized("Header X-Perfil ausente ou com perfil desconhecido".to_string())
        })?;

    request.extensions_mut().insert(papel);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_perfil() {
        assert_eq!(Papel::parse("admin"), Some(Papel::Admin));
        assert_eq!(Papel::parse("T2"), Some(Papel::T2));
        assert_eq!(Papel::parse("gerente"), None);
    }

    #[test]
    fn test_auditor_nao_opera() {
        assert!(Papel::Admin.pode_operar());
        assert!(Papel::T3.pode_operar());
        assert!(!Papel::Auditor.pode_operar());
    }
}
