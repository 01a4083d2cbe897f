//! Trilha de auditoria (outbox)
//!
//! A mudança de estado é commitada primeiro; o registro de auditoria é
//! emitido depois, best-effort, por um canal para um worker em segundo
//! plano. Um sink lento ou quebrado nunca bloqueia nem desfaz a operação
//! de negócio — a falha vira apenas um warn no log.

use chrono::{Local, NaiveDateTime};
use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::repositories::auditoria_repository::AuditoriaRepository;

/// Entrada da trilha de auditoria
#[derive(Debug, Clone)]
pub struct RegistroAuditoria {
    pub usuario: String,
    pub acao: String,
    pub descricao: String,
    pub criado_em: NaiveDateTime,
}

/// Handle clonável compartilhado via AppState
#[derive(Clone)]
pub struct Auditoria {
    tx: mpsc::UnboundedSender<RegistroAuditoria>,
}

impl Auditoria {
    /// Iniciar o worker de gravação e devolver o handle de envio
    pub fn iniciar(pool: PgPool) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RegistroAuditoria>();
        let repository = AuditoriaRepository::new(pool);

        tokio::spawn(async move {
            while let Some(registro) = rx.recv().await {
                if let Err(e) = repository.inserir(&registro).await {
                    tracing::warn!(
                        "Falha ao gravar auditoria ({} / {}): {}",
                        registro.acao,
                        registro.usuario,
                        e
                    );
                }
            }
        });

        Self { tx }
    }

    /// Enviar um registro sem esperar resultado (fire-and-forget)
    pub fn registrar(&self, usuario: &str, acao: &str, descricao: String) {
        let registro = RegistroAuditoria {
            usuario: usuario.to_string(),
            acao: acao.to_string(),
            descricao,
            criado_em: Local::now().naive_local(),
        };
        if self.tx.send(registro).is_err() {
            tracing::warn!("Worker de auditoria indisponível; registro descartado");
        }
    }
}
