//! Infrastructure layer - storage backends for the dashboard user port

pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmDashboardUserRepository};
pub use storage::InMemoryDashboardUserRepository;
