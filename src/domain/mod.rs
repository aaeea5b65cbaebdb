//! Domain layer: entities, value objects and ports

pub mod dashboard_user;

pub use dashboard_user::{
    DashboardUser, DashboardUserDto, DashboardUserQuery, DashboardUserRepository,
    DashboardUserService,
};

pub use crate::shared::{CommonPager, DomainError, DomainResult, PageMeta, PageParameter};
