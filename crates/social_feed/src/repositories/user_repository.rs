use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{Result, UserStore};
use crate::models::{
    pagination::{Page, PageSpec},
    users::{NewUser, User, UserChanges},
};

pub struct UserRepository {
    db: Arc<PgPool>,
}

impl UserRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        UserRepository { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, is_admin, created_at FROM public.users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.as_ref())
        .await?;

        Ok(user)
    }

    async fn find_existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM public.users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(existing)
    }

    async fn list_users(&self, page: &PageSpec) -> Result<Page<User>> {
        let query = r#"
        SELECT id, name, email, is_admin, created_at
        FROM public.users
        ORDER BY created_at ASC, id ASC
        LIMIT $1 OFFSET $2
        "#;
        let items = sqlx::query_as::<_, User>(query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.db.as_ref())
            .await?;
        let total_items = self.count_users().await?;

        Ok(Page { items, total_items })
    }

    async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM public.users")
            .fetch_one(self.db.as_ref())
            .await?;

        Ok(count)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO public.users (id, name, email, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, is_admin, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.is_admin)
        .fetch_one(self.db.as_ref())
        .await?;

        Ok(created)
    }

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE public.users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING id, name, email, is_admin, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .fetch_optional(self.db.as_ref())
        .await?;

        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM public.users WHERE id = $1")
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
