//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DashboardUser, DashboardUserRepository, DomainError, DomainResult};

/// In-memory dashboard user storage for development and testing
///
/// Enforces the same unique user name rule as the SQL schema.
pub struct InMemoryDashboardUserRepository {
    users: DashMap<String, DashboardUser>,
}

impl InMemoryDashboardUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    fn matching(&self, user_name: Option<&str>) -> Vec<DashboardUser> {
        let mut rows: Vec<DashboardUser> = self
            .users
            .iter()
            .filter(|entry| user_name.map_or(true, |needle| entry.user_name.contains(needle)))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            a.date_created
                .cmp(&b.date_created)
                .then_with(|| a.id.cmp(&b.id))
        });
        rows
    }

    fn name_taken(&self, user_name: &str, except_id: &str) -> bool {
        self.users
            .iter()
            .any(|entry| entry.user_name == user_name && entry.id != except_id)
    }
}

impl Default for InMemoryDashboardUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardUserRepository for InMemoryDashboardUserRepository {
    async fn count(&self, user_name: Option<&str>) -> DomainResult<u64> {
        Ok(self.matching(user_name).len() as u64)
    }

    async fn find_page(
        &self,
        user_name: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<DashboardUser>> {
        Ok(self
            .matching(user_name)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DashboardUser>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_user_name(&self, user_name: &str) -> DomainResult<Option<DashboardUser>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.user_name == user_name)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, user: DashboardUser) -> DomainResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!(
                "dashboard user id {} already exists",
                user.id
            )));
        }
        if self.name_taken(&user.user_name, &user.id) {
            return Err(DomainError::Conflict(
                "dashboard user name already exists".to_string(),
            ));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn update(&self, user: DashboardUser) -> DomainResult<u64> {
        if !self.users.contains_key(&user.id) {
            return Ok(0);
        }
        if self.name_taken(&user.user_name, &user.id) {
            return Err(DomainError::Conflict(
                "dashboard user name already exists".to_string(),
            ));
        }
        self.users.insert(user.id.clone(), user);
        Ok(1)
    }

    async fn delete(&self, id: &str) -> DomainResult<u64> {
        Ok(self.users.remove(id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user(id: &str, name: &str, offset_secs: i64) -> DashboardUser {
        let at = Utc::now() + Duration::seconds(offset_secs);
        DashboardUser {
            id: id.to_string(),
            user_name: name.to_string(),
            password: "secret".to_string(),
            role: 1,
            enabled: true,
            date_created: at,
            date_updated: at,
        }
    }

    #[tokio::test]
    async fn pages_are_ordered_by_creation_time() {
        let repo = InMemoryDashboardUserRepository::new();
        repo.insert(user("c", "carol", 2)).await.unwrap();
        repo.insert(user("a", "alice", 0)).await.unwrap();
        repo.insert(user("b", "bob", 1)).await.unwrap();

        let first = repo.find_page(None, 0, 2).await.unwrap();
        let names: Vec<_> = first.iter().map(|u| u.user_name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);

        let second = repo.find_page(None, 2, 2).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].user_name, "carol");
    }

    #[tokio::test]
    async fn filter_is_substring_match() {
        let repo = InMemoryDashboardUserRepository::new();
        repo.insert(user("1", "admin", 0)).await.unwrap();
        repo.insert(user("2", "sysadmin", 1)).await.unwrap();
        repo.insert(user("3", "guest", 2)).await.unwrap();

        assert_eq!(repo.count(Some("admin")).await.unwrap(), 2);
        assert_eq!(repo.count(None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn duplicate_user_name_is_rejected() {
        let repo = InMemoryDashboardUserRepository::new();
        repo.insert(user("1", "admin", 0)).await.unwrap();
        let err = repo.insert(user("2", "admin", 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_and_delete_report_affected_rows() {
        let repo = InMemoryDashboardUserRepository::new();
        assert_eq!(repo.update(user("x", "ghost", 0)).await.unwrap(), 0);

        repo.insert(user("1", "admin", 0)).await.unwrap();
        let mut changed = user("1", "root", 0);
        changed.enabled = false;
        assert_eq!(repo.update(changed).await.unwrap(), 1);
        assert!(!repo.find_by_id("1").await.unwrap().unwrap().enabled);

        assert_eq!(repo.delete("1").await.unwrap(), 1);
        assert_eq!(repo.delete("1").await.unwrap(), 0);
    }
}
