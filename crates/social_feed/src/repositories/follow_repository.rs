use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{FollowStore, Result};
use crate::models::users::User;

/// Follow graph backed by `social.follows`.
///
/// The composite primary key on `(follower_id, followee_id)` is what keeps
/// concurrent follows of the same pair down to a single edge.
pub struct FollowRepository {
    db: Arc<PgPool>,
}

impl FollowRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        FollowRepository { db }
    }
}

#[async_trait]
impl FollowStore for FollowRepository {
    async fn insert_edges(&self, follower_id: Uuid, followee_ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO social.follows (follower_id, followee_id, created_at)
            SELECT $1, t.followee_id, NOW()
            FROM UNNEST($2::uuid[]) AS t(followee_id)
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followee_ids)
        .execute(self.db.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_edges(&self, follower_id: Uuid, followee_ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM social.follows WHERE follower_id = $1 AND followee_id = ANY($2)",
        )
        .bind(follower_id)
        .bind(followee_ids)
        .execute(self.db.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn edge_exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let query = r#"
        SELECT EXISTS (SELECT 1 FROM social.follows WHERE follower_id = $1 AND followee_id = $2)
        "#;
        let exists = sqlx::query_scalar::<_, bool>(query)
            .bind(follower_id)
            .bind(followee_id)
            .fetch_one(self.db.as_ref())
            .await?;

        Ok(exists)
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<User>> {
        let query = r#"
        SELECT u.id, u.name, u.email, u.is_admin, u.created_at
        FROM public.users u
        INNER JOIN social.follows f ON u.id = f.follower_id
        WHERE f.followee_id = $1
        ORDER BY u.name ASC, u.id ASC
        "#;
        let followers = sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await?;

        Ok(followers)
    }

    async fn list_followings(&self, user_id: Uuid) -> Result<Vec<User>> {
        let query = r#"
        SELECT u.id, u.name, u.email, u.is_admin, u.created_at
        FROM public.users u
        INNER JOIN social.follows f ON u.id = f.followee_id
        WHERE f.follower_id = $1
        ORDER BY u.name ASC, u.id ASC
        "#;
        let followings = sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await?;

        Ok(followings)
    }

    async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT followee_id FROM social.follows WHERE follower_id = $1",
        )
        .bind(user_id)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(ids)
    }
}
