pub mod dashboard_users;
pub mod health;
pub mod metrics;
pub mod request_id;
