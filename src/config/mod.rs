//! Configuração do projeto
//!
//! Este módulo contém a configuração de variáveis de ambiente
//! e dos horários de turno.

pub mod environment;

pub use environment::*;
