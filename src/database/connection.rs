//! Conexión a PostgreSQL
//!
//! Construcción del pool de conexiones y health check.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::database::{mask_database_url, DatabaseConfig};

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        info!("Conectando a la base de datos: {}", mask_database_url(&config.url));

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        let connection = Self { pool };
        connection.health_check().await?;

        Ok(connection)
    }

    pub async fn new_default() -> Result<Self> {
        Self::new(DatabaseConfig::from_env()?).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Verificar que la conexión funciona
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
