mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚚 FleetPay - Driver Payment Tracker");
    info!("====================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/driver", routes::driver_routes::create_driver_router())
        .nest("/api/route", routes::route_routes::create_route_router())
        .nest("/api/trip", routes::trip_routes::create_trip_router())
        .nest(
            "/api/settlement",
            routes::settlement_routes::create_settlement_router(),
        )
        .nest("/api/report", routes::report_routes::create_report_router())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Drivers:");
    info!("   POST /api/driver - Crear conductor");
    info!("   GET  /api/driver - Listar conductores");
    info!("🛣️  Routes:");
    info!("   POST /api/route - Crear ruta");
    info!("   GET  /api/route - Listar rutas");
    info!("🚛 Trips:");
    info!("   POST /api/trip - Registrar viaje");
    info!("   GET  /api/trip - Listar viajes");
    info!("💰 Settlements:");
    info!("   GET  /api/settlement/dues?type=WEEKLY|MONTHLY - Dues pendientes");
    info!("   POST /api/settlement - Liquidar due de un conductor");
    info!("   GET  /api/settlement?type=WEEKLY|MONTHLY - Historial de pagos");
    info!("📊 Reports:");
    info!("   GET  /api/report/summary - Resumen de flota");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleetpay",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
