//! Services module
//!
//! Este módulo contém a lógica de domínio da aplicação: máquina de
//! estados do ciclo de vida, cálculo de turnos, registro de docas e a
//! trilha de auditoria.

pub mod auditoria_service;
pub mod doca_service;
pub mod status_service;
pub mod turno_service;
