//! # Dashboard Admin
//!
//! Administration service for the accounts that sign in to the admin console.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Dashboard user entity, paging types and the repository/service ports
//! - **application**: Use cases (paged listing, detail, upsert, delete)
//! - **infrastructure**: SeaORM (SQLite/PostgreSQL) and in-memory storage
//! - **interfaces**: REST API with the result envelope and Swagger documentation
//! - **server**: Runtime lifecycle shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiResponse, RouterState};
