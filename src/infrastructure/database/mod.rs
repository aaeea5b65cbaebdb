pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmDashboardUserRepository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./dashboard_admin.db?mode=rwc")
    pub url: String,
    /// Log every SQL statement issued by the pool
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./dashboard_admin.db?mode=rwc".to_string(),
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Default::default()
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging(config.sqlx_logging);
    // Every pooled connection to an in-memory SQLite URL opens its own empty database
    if config.url.contains(":memory:") {
        options.max_connections(1);
    }
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}
