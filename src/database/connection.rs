use crate::{
    config::DatabaseConfig,
    error::{AppError, Result},
};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Open the catalog pool and bring the `products` schema up to date. The
/// pool is the only connection state in the process; it is created here and
/// owned by `AppState` for its whole lifetime.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| AppError::MigrationError(e.to_string()))?;

    tracing::info!(
        "Catalog database ready ({} max connections)",
        config.max_connections
    );

    Ok(pool)
}

/// Cheap readiness probe used by `/health/ready`.
pub async fn check_health(pool: &PgPool) -> Result<()> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
