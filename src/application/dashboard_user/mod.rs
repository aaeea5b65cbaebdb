//! Dashboard user management use-cases

pub mod service;

pub use service::DashboardUserServiceImpl;
