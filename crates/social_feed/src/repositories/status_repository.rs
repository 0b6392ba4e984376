use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{Result, StatusStore};
use crate::models::{
    pagination::{Page, PageSpec},
    statuses::{FeedItem, FeedRow, Status},
};

pub struct StatusRepository {
    db: Arc<PgPool>,
}

impl StatusRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        StatusRepository { db }
    }
}

#[async_trait]
impl StatusStore for StatusRepository {
    async fn create_status(
        &self,
        user_id: Uuid,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Status> {
        let status = sqlx::query_as::<_, Status>(
            r#"
            INSERT INTO social.statuses (user_id, body, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, body, created_at
            "#,
        )
        .bind(user_id)
        .bind(body)
        .bind(created_at)
        .fetch_one(self.db.as_ref())
        .await?;

        Ok(status)
    }

    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        page: &PageSpec,
    ) -> Result<Page<FeedItem>> {
        let query = r#"
        SELECT
            s.id,
            s.user_id,
            s.body,
            s.created_at,
            u.name AS author_name,
            u.email AS author_email
        FROM social.statuses s
        INNER JOIN public.users u ON u.id = s.user_id
        WHERE s.user_id = ANY($1)
        ORDER BY s.created_at DESC, s.id DESC
        LIMIT $2 OFFSET $3
        "#;

        // Count and page come from the same snapshot.
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM social.statuses WHERE user_id = ANY($1)",
        )
        .bind(author_ids)
        .fetch_one(&mut *tx)
        .await?;

        let rows = sqlx::query_as::<_, FeedRow>(query)
            .bind(author_ids)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items: rows.into_iter().map(FeedItem::from).collect(),
            total_items,
        })
    }
}
