//! Database bootstrap for the API service

use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::{DatabaseError, DatabaseResult},
};
use sqlx::PgPool;
use tracing::info;

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> DatabaseResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    info!("Database migrations applied");
    Ok(())
}

/// Connect, verify connectivity and bring the schema up to date
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    let pool = init_pool(config).await?;

    if !health_check(&pool).await {
        return Err(DatabaseError::Configuration(
            "Database is not reachable".to_string(),
        ));
    }
    info!("Database connection successful");

    run_migrations(&pool).await?;
    Ok(pool)
}
