use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{DashboardUser, DashboardUserRepository, DomainResult};
use crate::infrastructure::database::entities::dashboard_user;

pub struct SeaOrmDashboardUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmDashboardUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: dashboard_user::Model) -> DashboardUser {
    DashboardUser {
        id: model.id,
        user_name: model.user_name,
        password: model.password,
        role: model.role,
        enabled: model.enabled,
        date_created: model.date_created,
        date_updated: model.date_updated,
    }
}

fn domain_to_active(user: DashboardUser) -> dashboard_user::ActiveModel {
    dashboard_user::ActiveModel {
        id: Set(user.id),
        user_name: Set(user.user_name),
        password: Set(user.password),
        role: Set(user.role),
        enabled: Set(user.enabled),
        date_created: Set(user.date_created),
        date_updated: Set(user.date_updated),
    }
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filtered(user_name: Option<&str>) -> Select<dashboard_user::Entity> {
    let query = dashboard_user::Entity::find();
    match user_name {
        Some(name) => {
            let pattern = LikeExpr::new(format!("%{}%", escape_like(name))).escape('\\');
            query.filter(Expr::col(dashboard_user::Column::UserName).like(pattern))
        }
        None => query,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl DashboardUserRepository for SeaOrmDashboardUserRepository {
    async fn count(&self, user_name: Option<&str>) -> DomainResult<u64> {
        Ok(filtered(user_name).count(&self.db).await?)
    }

    async fn find_page(
        &self,
        user_name: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<DashboardUser>> {
        let models = filtered(user_name)
            .order_by_asc(dashboard_user::Column::DateCreated)
            .order_by_asc(dashboard_user::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<DashboardUser>> {
        let model = dashboard_user::Entity::find_by_id(id)
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_user_name(&self, user_name: &str) -> DomainResult<Option<DashboardUser>> {
        let model = dashboard_user::Entity::find()
            .filter(dashboard_user::Column::UserName.eq(user_name))
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_domain))
    }

    async fn insert(&self, user: DashboardUser) -> DomainResult<()> {
        domain_to_active(user).insert(&self.db).await?;
        Ok(())
    }

    async fn update(&self, user: DashboardUser) -> DomainResult<u64> {
        let id = user.id.clone();
        let result = dashboard_user::Entity::update_many()
            .set(domain_to_active(user))
            .filter(dashboard_user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: &str) -> DomainResult<u64> {
        let result = dashboard_user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::{init_database, DatabaseConfig};
    use chrono::{Duration, Utc};
    use sea_orm_migration::MigratorTrait;

    async fn repo() -> SeaOrmDashboardUserRepository {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            sqlx_logging: false,
        };
        let db = init_database(&config).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmDashboardUserRepository::new(db)
    }

    fn user(id: &str, name: &str, offset_secs: i64) -> DashboardUser {
        let at = Utc::now() + Duration::seconds(offset_secs);
        DashboardUser {
            id: id.to_string(),
            user_name: name.to_string(),
            password: "123456".to_string(),
            role: 1,
            enabled: true,
            date_created: at,
            date_updated: at,
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = repo().await;
        let original = user("u1", "admin", 0);
        repo.insert(original.clone()).await.unwrap();

        let found = repo.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(found.user_name, original.user_name);
        assert_eq!(found.password, original.password);
        assert_eq!(found.role, original.role);
        assert_eq!(found.enabled, original.enabled);

        let by_name = repo.find_by_user_name("admin").await.unwrap().unwrap();
        assert_eq!(by_name.id, "u1");
    }

    #[tokio::test]
    async fn page_and_count_apply_the_filter() {
        let repo = repo().await;
        repo.insert(user("1", "admin", 0)).await.unwrap();
        repo.insert(user("2", "sysadmin", 1)).await.unwrap();
        repo.insert(user("3", "guest", 2)).await.unwrap();

        assert_eq!(repo.count(None).await.unwrap(), 3);
        assert_eq!(repo.count(Some("admin")).await.unwrap(), 2);

        let page = repo.find_page(None, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, "2");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("admin"), "admin");
    }

    #[tokio::test]
    async fn filter_treats_wildcards_literally() {
        let repo = repo().await;
        repo.insert(user("1", "sysadmin", 0)).await.unwrap();
        repo.insert(user("2", "bob", 1)).await.unwrap();
        repo.insert(user("3", "50%off", 2)).await.unwrap();
        repo.insert(user("4", "a_b", 3)).await.unwrap();

        assert_eq!(repo.count(Some("%")).await.unwrap(), 1);
        assert_eq!(repo.count(Some("_")).await.unwrap(), 1);
        let page = repo.find_page(Some("%"), 0, 10).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].user_name, "50%off");
    }

    #[tokio::test]
    async fn duplicate_user_name_is_a_conflict() {
        let repo = repo().await;
        repo.insert(user("1", "admin", 0)).await.unwrap();
        let err = repo.insert(user("2", "admin", 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_and_delete_report_affected_rows() {
        let repo = repo().await;
        assert_eq!(repo.update(user("missing", "ghost", 0)).await.unwrap(), 0);

        repo.insert(user("1", "admin", 0)).await.unwrap();
        let mut changed = user("1", "admin", 0);
        changed.role = 2;
        assert_eq!(repo.update(changed).await.unwrap(), 1);
        assert_eq!(repo.find_by_id("1").await.unwrap().unwrap().role, 2);

        assert_eq!(repo.delete("1").await.unwrap(), 1);
        assert_eq!(repo.delete("1").await.unwrap(), 0);
    }
}
