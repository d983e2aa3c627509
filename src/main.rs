use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use fleet_console::client::FleetApiClient;
use fleet_console::config::environment::EnvironmentConfig;
use fleet_console::routes::create_app;
use fleet_console::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Fleet Console - Gateway de la flota de alquiler");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    info!("🔗 Backend: {}", config.fleet_api_url);
    info!("🗣️ Idioma de mensajes: {:?}", config.default_locale);

    let client = match FleetApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error creando el cliente del backend: {}", e);
            return Err(anyhow::anyhow!("Error de cliente HTTP: {}", e));
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(config, Arc::new(client)));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/rentals - Contratos clasificados (?category=&at=)");
    info!("   GET    /api/rentals/by-vin - Agregación por VIN");
    info!("   GET    /api/rentals/by-vin/:vin - Resumen de un vehículo");
    info!("   DELETE /api/rentals/:id - Eliminar contrato");
    info!("   GET    /api/assets/stages - Assets con etapa de gestión");
    info!("   POST   /api/tables/rentals - Tabla de contratos");
    info!("   POST   /api/tables/assets - Tabla de assets");
    info!("   GET    /api/dashboard - Panel de la flota");
    info!("   GET    /api/geofences/check - Geofences que contienen un punto");
    info!("   GET    /api/issues/summary - Resumen de incidencias");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
