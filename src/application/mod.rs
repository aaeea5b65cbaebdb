//! Application layer: use-case orchestration over domain ports

pub mod dashboard_user;

pub use dashboard_user::DashboardUserServiceImpl;
