//! Persistence for users, the follow graph and statuses.
//!
//! Each concern sits behind an `async_trait` so services can run against
//! Postgres in production and [`InMemoryStore`] in tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    pagination::{Page, PageSpec},
    statuses::{FeedItem, Status},
    users::{NewUser, User, UserChanges},
};

mod error;
pub mod follow_repository;
pub mod memory;
pub mod status_repository;
pub mod user_repository;

pub use error::{Result, StoreError};
pub use follow_repository::FollowRepository;
pub use memory::InMemoryStore;
pub use status_repository::StatusRepository;
pub use user_repository::UserRepository;

/// Identity store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Returns the subset of `ids` that belong to existing users.
    async fn find_existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>>;

    /// Users in registration order.
    async fn list_users(&self, page: &PageSpec) -> Result<Page<User>>;

    async fn count_users(&self) -> Result<i64>;

    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>>;

    /// Deletes the user with their edges and statuses. Returns whether a row was removed.
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
}

/// Directed follower -> followee edges.
///
/// Each call touches every given edge in one atomic write; existing or
/// missing edges are skipped, never reported as errors.
#[async_trait]
pub trait FollowStore: Send + Sync {
    /// Inserts the missing `(follower, followee)` edges. Returns how many were created.
    async fn insert_edges(&self, follower_id: Uuid, followee_ids: &[Uuid]) -> Result<u64>;

    /// Removes the given edges. Returns how many existed.
    async fn delete_edges(&self, follower_id: Uuid, followee_ids: &[Uuid]) -> Result<u64>;

    async fn edge_exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool>;

    /// Users following `user_id`, ordered by name then id.
    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<User>>;

    /// Users followed by `user_id`, ordered by name then id.
    async fn list_followings(&self, user_id: Uuid) -> Result<Vec<User>>;

    async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>>;
}

/// Per-user timestamped statuses.
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn create_status(
        &self,
        user_id: Uuid,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Status>;

    /// Statuses owned by any of `author_ids`, newest first with ties broken
    /// by id descending, each joined with its author.
    async fn list_by_authors(&self, author_ids: &[Uuid], page: &PageSpec)
        -> Result<Page<FeedItem>>;
}

#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
    pub follows: Arc<dyn FollowStore>,
    pub statuses: Arc<dyn StatusStore>,
}

impl Repositories {
    pub fn postgres(db: Arc<PgPool>) -> Self {
        Self {
            users: Arc::new(UserRepository::new(db.clone())),
            follows: Arc::new(FollowRepository::new(db.clone())),
            statuses: Arc::new(StatusRepository::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            follows: store.clone(),
            statuses: store,
        }
    }
}
