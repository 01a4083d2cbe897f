//! Utilidades do sistema
//!
//! Este módulo contém utilidades para manejo de erros e validação.

pub mod errors;
pub mod extractors;
pub mod validation;
