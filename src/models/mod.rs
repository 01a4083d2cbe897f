//! Modelos do sistema
//!
//! Este módulo contém todos os modelos de dados que mapeiam exatamente
//! o schema PostgreSQL, junto com os requests/responses da API.

pub mod historico;
pub mod veiculo;
