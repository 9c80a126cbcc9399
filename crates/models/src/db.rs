use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SQLite connection URL for a database file, created on first use.
pub fn sqlite_url(storage_path: &str) -> String {
    format!("sqlite://{storage_path}?mode=rwc")
}

pub async fn connect(storage_path: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(sqlite_url(storage_path));
    opt.max_connections(8)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(false);
    let db = Database::connect(opt).await?;
    Ok(db)
}

/// Apply all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    migration::Migrator::up(db, None).await?;
    info!(event = "migrations_applied", "schema is up to date");
    Ok(())
}

/// Connect and migrate in one step; what the server and the tests use.
pub async fn connect_and_migrate(storage_path: &str) -> anyhow::Result<DatabaseConnection> {
    let db = connect(storage_path).await?;
    migrate(&db).await?;
    Ok(db)
}
