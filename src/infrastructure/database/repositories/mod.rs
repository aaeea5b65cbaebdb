//! Database repository implementations

pub mod dashboard_user_repository;

pub use dashboard_user_repository::SeaOrmDashboardUserRepository;
