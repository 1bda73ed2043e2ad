use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use transport_backend::config::environment::EnvironmentConfig;
use transport_backend::state::AppState;
use transport_backend::{build_router, database};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Transport Backend - Gestión de entregas");
    info!("==========================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = build_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔑 Autenticación:");
    info!("   POST /api/auth/register - Registrar cliente o conductor");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Identidad actual");
    info!("📦 Cliente:");
    info!("   POST   /api/client/deliveries - Crear entrega");
    info!("   POST   /api/client/deliveries/quote - Calcular precio");
    info!("   GET    /api/client/deliveries - Listar entregas");
    info!("   GET    /api/client/deliveries/export - Exportar (csv|json)");
    info!("   GET    /api/client/deliveries/:id - Detalle de entrega");
    info!("   DELETE /api/client/deliveries/:id - Cancelar entrega");
    info!("   POST   /api/client/deliveries/:id/feedback - Comentar entrega");
    info!("   POST   /api/client/deliveries/:id/payment - Pagar entrega");
    info!("   GET    /api/client/profile - Perfil con estadísticas");
    info!("🚗 Conductor:");
    info!("   GET  /api/driver/deliveries/available - Entregas disponibles");
    info!("   GET  /api/driver/deliveries - Entregas activas");
    info!("   POST /api/driver/deliveries/:id/accept - Aceptar entrega");
    info!("   POST /api/driver/deliveries/:id/cancel - Devolver entrega");
    info!("   POST /api/driver/deliveries/:id/complete - Completar entrega");
    info!("   POST /api/driver/refuelings - Registrar repostaje");
    info!("   GET  /api/driver/refuelings - Historial de repostajes");
    info!("   GET  /api/driver/profile - Perfil con estadísticas");
    info!("🚙 Flota:");
    info!("   GET  /api/fleet/available - Vehículos estacionados");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
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
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
