use async_trait::async_trait;

use super::{DashboardUser, DashboardUserDto, DashboardUserQuery};
use crate::shared::{CommonPager, DomainResult};

/// The four dashboard user operations exposed to the HTTP layer.
#[async_trait]
pub trait DashboardUserService: Send + Sync {
    /// One page of users matching the query. An empty page is not an error.
    async fn list_by_page(&self, query: &DashboardUserQuery)
        -> DomainResult<CommonPager<DashboardUser>>;

    /// Fails with `DomainError::NotFound` when no record has this id.
    async fn find_by_id(&self, id: &str) -> DomainResult<DashboardUser>;

    /// Insert when `dto.id` is absent or unknown, otherwise update in place.
    /// Returns the affected row count.
    async fn create_or_update(&self, dto: DashboardUserDto) -> DomainResult<u64>;

    /// Returns 0 when the id did not exist.
    async fn delete(&self, id: &str) -> DomainResult<u64>;
}
