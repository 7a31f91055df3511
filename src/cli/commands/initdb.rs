use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use model::query;
use sea_orm::Database;
use tracing::{debug, error, info, trace};

/// Connect, apply pending migrations and seed the label catalog.
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    let db = match Database::connect(database_url).await {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    // Seeding is idempotent, rerunning init-db leaves existing labels alone.
    info!("Seeding default label catalog");
    query::seed_default_labels(&db)
        .await
        .context("Failed to seed default labels")?;

    info!("Database initialization completed");
    Ok(())
}
