//! Dashboard user aggregate
//!
//! Entity, upsert payload, query model, the service contract consumed by
//! HTTP handlers and the storage port it is built on.

pub mod model;
pub mod query;
pub mod repository;
pub mod service;

mod dto;

pub use dto::DashboardUserDto;
pub use model::{DashboardUser, DEFAULT_ROLE};
pub use query::DashboardUserQuery;
pub use repository::DashboardUserRepository;
pub use service::DashboardUserService;
