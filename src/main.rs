use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use kanban_docas::config::environment::EnvironmentConfig;
use kanban_docas::criar_app;
use kanban_docas::database::DatabaseConnection;
use kanban_docas::services::auditoria_service::Auditoria;
use kanban_docas::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar variáveis de ambiente
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Kanban de Docas - Controle de Descarga");
    info!("=========================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de dados
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Erro conectando ao banco de dados: {}", e);
            return Err(anyhow::anyhow!("Erro de banco de dados: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Erro executando migrações: {}", e);
        return Err(anyhow::anyhow!("Erro de migração: {}", e));
    }

    let pool = db_connection.pool().clone();

    // Worker de auditoria em background
    let auditoria = Auditoria::iniciar(pool.clone());

    let app_state = AppState::new(pool, config.clone(), auditoria);
    let app = criar_app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando em http://{}", addr);
    info!("🔍 Endpoints disponíveis:");
    info!("   GET  /health - Health check");
    info!("🚛 Endpoints - Veículos:");
    info!("   POST   /api/veiculos - Cadastrar veículo");
    info!("   GET    /api/veiculos - Listagem com filtros");
    info!("   GET    /api/veiculos/:id - Detalhe do veículo");
    info!("   PUT    /api/veiculos/:id - Editar veículo");
    info!("   DELETE /api/veiculos/:id - Excluir veículo");
    info!("📋 Endpoints - Kanban:");
    info!("   GET  /api/kanban - Quadro kanban");
    info!("   POST /api/kanban/status - Atualizar status");
    info!("   POST /api/kanban/arquivar - Arquivar turnos anteriores");
    info!("   GET  /api/kanban/contagens - Contagens por status");
    info!("🏗️ Endpoints - Docas:");
    info!("   GET  /api/docas/status - Painel de docas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Erro do servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor encerrado");
    Ok(())
}

/// Sinal de desligamento graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Sinal Ctrl+C recebido, encerrando servidor...");
        },
        _ = terminate => {
            info!("🛑 Sinal de término recebido, encerrando servidor...");
        },
    }
}
