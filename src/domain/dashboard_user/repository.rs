use async_trait::async_trait;

use super::DashboardUser;
use crate::shared::DomainResult;

/// Storage port for dashboard users.
///
/// Implementations own row-level atomicity; concurrent writers to the same
/// id resolve as last-writer-wins.
#[async_trait]
pub trait DashboardUserRepository: Send + Sync {
    /// Number of rows whose user name contains `user_name` (all rows when `None`).
    async fn count(&self, user_name: Option<&str>) -> DomainResult<u64>;

    /// Rows ordered by creation time then id, skipping `offset`, at most `limit`.
    async fn find_page(
        &self,
        user_name: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<DashboardUser>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DashboardUser>>;

    async fn find_by_user_name(&self, user_name: &str) -> DomainResult<Option<DashboardUser>>;

    async fn insert(&self, user: DashboardUser) -> DomainResult<()>;

    /// Overwrite the row with `user.id`; returns affected rows.
    async fn update(&self, user: DashboardUser) -> DomainResult<u64>;

    /// Returns affected rows (0 when the id did not exist).
    async fn delete(&self, id: &str) -> DomainResult<u64>;
}
