//! Dashboard user service: application-layer orchestration
//!
//! Pagination, the upsert policy, id assignment and input validation live
//! here. Storage is reached only through [`DashboardUserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::dashboard_user::DEFAULT_ROLE;
use crate::domain::{
    CommonPager, DashboardUser, DashboardUserDto, DashboardUserQuery, DashboardUserRepository,
    DashboardUserService, DomainError, DomainResult, PageMeta,
};

const ENTITY: &str = "dashboard user";

/// [`DashboardUserService`] implementation generic over the storage port.
pub struct DashboardUserServiceImpl<R: DashboardUserRepository> {
    repo: Arc<R>,
}

impl<R: DashboardUserRepository> DashboardUserServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn insert(&self, id: Option<&str>, dto: &DashboardUserDto) -> DomainResult<u64> {
        let user_name = dto
            .user_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DomainError::Validation("userName must not be empty".into()))?;

        if self.repo.find_by_user_name(user_name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "dashboard user name '{}' already exists",
                user_name
            )));
        }

        let now = Utc::now();
        let user = DashboardUser {
            id: id.map_or_else(|| Uuid::new_v4().simple().to_string(), str::to_string),
            user_name: user_name.to_string(),
            password: dto.password.clone().unwrap_or_default(),
            role: dto.role.unwrap_or(DEFAULT_ROLE),
            enabled: dto.enabled.unwrap_or(true),
            date_created: now,
            date_updated: now,
        };

        let id = user.id.clone();
        self.repo.insert(user).await?;
        info!(user_id = %id, user_name, "Dashboard user created");
        Ok(1)
    }

    async fn update(&self, mut user: DashboardUser, dto: &DashboardUserDto) -> DomainResult<u64> {
        if let Some(name) = dto.user_name.as_deref() {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::Validation("userName must not be empty".into()));
            }
            if name != user.user_name {
                if let Some(other) = self.repo.find_by_user_name(name).await? {
                    if other.id != user.id {
                        return Err(DomainError::Conflict(format!(
                            "dashboard user name '{}' already exists",
                            name
                        )));
                    }
                }
            }
        }

        user.apply(dto, Utc::now());
        let id = user.id.clone();
        let affected = self.repo.update(user).await?;
        info!(user_id = %id, affected, "Dashboard user updated");
        Ok(affected)
    }
}

fn require_id(id: &str) -> DomainResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::Validation("id must not be empty".into()));
    }
    Ok(id)
}

#[async_trait]
impl<R: DashboardUserRepository> DashboardUserService for DashboardUserServiceImpl<R> {
    async fn list_by_page(
        &self,
        query: &DashboardUserQuery,
    ) -> DomainResult<CommonPager<DashboardUser>> {
        let page = query.page();
        let total = self.repo.count(query.user_name()).await?;
        debug!(
            user_name = ?query.user_name(),
            current = page.current_page(),
            size = page.page_size(),
            total,
            "Listing dashboard users"
        );

        if page.offset() >= total {
            return Ok(CommonPager::empty(page, total));
        }

        let rows = self
            .repo
            .find_page(query.user_name(), page.offset(), page.limit())
            .await?;
        Ok(CommonPager::new(PageMeta::new(page, total), rows))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<DashboardUser> {
        let id = require_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, "id", id))
    }

    async fn create_or_update(&self, dto: DashboardUserDto) -> DomainResult<u64> {
        let Some(raw_id) = dto.id.as_deref() else {
            return self.insert(None, &dto).await;
        };
        let id = require_id(raw_id)?;

        match self.repo.find_by_id(id).await? {
            Some(existing) => self.update(existing, &dto).await,
            None => self.insert(Some(id), &dto).await,
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<u64> {
        let id = require_id(id)?;
        let affected = self.repo.delete(id).await?;
        info!(user_id = %id, affected, "Dashboard user delete");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageParameter;
    use crate::infrastructure::storage::InMemoryDashboardUserRepository;

    fn service() -> DashboardUserServiceImpl<InMemoryDashboardUserRepository> {
        DashboardUserServiceImpl::new(Arc::new(InMemoryDashboardUserRepository::new()))
    }

    fn new_user(name: &str) -> DashboardUserDto {
        DashboardUserDto {
            user_name: Some(name.to_string()),
            password: Some("123456".to_string()),
            role: Some(2),
            enabled: Some(true),
            ..Default::default()
        }
    }

    async fn only_user(
        svc: &DashboardUserServiceImpl<InMemoryDashboardUserRepository>,
    ) -> DashboardUser {
        let page = svc
            .list_by_page(&DashboardUserQuery::new(None, PageParameter::default()))
            .await
            .unwrap();
        assert_eq!(page.data_list.len(), 1);
        page.data_list.into_iter().next().unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips_fields() {
        let svc = service();
        assert_eq!(svc.create_or_update(new_user("alice")).await.unwrap(), 1);

        let listed = only_user(&svc).await;
        assert!(!listed.id.is_empty());

        let found = svc.find_by_id(&listed.id).await.unwrap();
        assert_eq!(found.user_name, "alice");
        assert_eq!(found.password, "123456");
        assert_eq!(found.role, 2);
        assert!(found.enabled);
    }

    #[tokio::test]
    async fn create_applies_defaults_for_missing_profile_fields() {
        let svc = service();
        let dto = DashboardUserDto {
            user_name: Some("bob".into()),
            ..Default::default()
        };
        svc.create_or_update(dto).await.unwrap();

        let user = only_user(&svc).await;
        assert_eq!(user.role, DEFAULT_ROLE);
        assert!(user.enabled);
        assert_eq!(user.password, "");
    }

    #[tokio::test]
    async fn create_without_user_name_is_a_validation_error() {
        let svc = service();
        let err = svc
            .create_or_update(DashboardUserDto {
                user_name: Some("  ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_user_name_conflicts() {
        let svc = service();
        svc.create_or_update(new_user("alice")).await.unwrap();
        let err = svc.create_or_update(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_is_selective() {
        let svc = service();
        svc.create_or_update(new_user("alice")).await.unwrap();
        let id = only_user(&svc).await.id;

        let patch = DashboardUserDto {
            id: Some(id.clone()),
            enabled: Some(false),
            ..Default::default()
        };
        assert_eq!(svc.create_or_update(patch).await.unwrap(), 1);

        let user = svc.find_by_id(&id).await.unwrap();
        assert_eq!(user.user_name, "alice");
        assert_eq!(user.password, "123456");
        assert!(!user.enabled);
        assert!(user.date_updated >= user.date_created);
    }

    #[tokio::test]
    async fn update_with_unknown_id_inserts_with_that_id() {
        let svc = service();
        let dto = new_user("carol").with_id("u1");
        assert_eq!(svc.create_or_update(dto).await.unwrap(), 1);

        let user = svc.find_by_id("u1").await.unwrap();
        assert_eq!(user.user_name, "carol");
    }

    #[tokio::test]
    async fn blank_id_is_rejected_without_inserting() {
        let svc = service();
        let err = svc
            .create_or_update(new_user("eve").with_id(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg == "id must not be empty"));

        let query = DashboardUserQuery::new(None, PageParameter::default());
        assert_eq!(svc.list_by_page(&query).await.unwrap().page.total, 0);
    }

    #[tokio::test]
    async fn find_missing_id_is_not_found() {
        let svc = service();
        let err = svc.find_by_id("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = svc.find_by_id("").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let svc = service();
        svc.create_or_update(new_user("alice").with_id("u1")).await.unwrap();

        assert_eq!(svc.delete("u1").await.unwrap(), 1);
        assert!(matches!(
            svc.find_by_id("u1").await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert_eq!(svc.delete("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn pages_respect_size_and_report_totals() {
        let svc = service();
        for i in 0..7 {
            svc.create_or_update(new_user(&format!("user{i}"))).await.unwrap();
        }

        let query = DashboardUserQuery::new(None, PageParameter::new(Some(2), Some(3)));
        let page = svc.list_by_page(&query).await.unwrap();
        assert_eq!(page.data_list.len(), 3);
        assert_eq!(page.page.total, 7);
        assert_eq!(page.page.total_pages, 3);

        let query = DashboardUserQuery::new(None, PageParameter::new(Some(3), Some(3)));
        assert_eq!(svc.list_by_page(&query).await.unwrap().data_list.len(), 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_with_true_total() {
        let svc = service();
        svc.create_or_update(new_user("alice")).await.unwrap();

        let query = DashboardUserQuery::new(None, PageParameter::new(Some(9), Some(10)));
        let page = svc.list_by_page(&query).await.unwrap();
        assert!(page.data_list.is_empty());
        assert_eq!(page.page.total, 1);
        assert_eq!(page.page.current, 9);
    }

    #[tokio::test]
    async fn list_filters_by_user_name() {
        let svc = service();
        svc.create_or_update(new_user("admin")).await.unwrap();
        svc.create_or_update(new_user("sysadmin")).await.unwrap();
        svc.create_or_update(new_user("guest")).await.unwrap();

        let query = DashboardUserQuery::new(Some("admin".into()), PageParameter::default());
        let page = svc.list_by_page(&query).await.unwrap();
        assert_eq!(page.page.total, 2);
        assert!(page.data_list.iter().all(|u| u.user_name.contains("admin")));
    }
}
