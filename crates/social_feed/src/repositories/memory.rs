use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FollowStore, Result, StatusStore, StoreError, UserStore};
use crate::models::{
    pagination::{Page, PageSpec},
    statuses::{Author, FeedItem, Status},
    users::{NewUser, User, UserChanges},
};

/// In-memory implementation of every store over one shared state.
///
/// Mirrors the Postgres schema rules: unique emails, edges and statuses
/// only between existing users, cascade on user delete, and the same
/// orderings. Suitable for tests and local runs only; nothing is persisted.
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    follows: BTreeSet<(Uuid, Uuid)>,
    statuses: BTreeMap<i64, Status>,
    next_status_id: i64,
}

impl MemoryState {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }

    fn sorted_users(&self, ids: impl Iterator<Item = Uuid>) -> Vec<User> {
        let mut users: Vec<User> = ids.filter_map(|id| self.users.get(&id).cloned()).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        users
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter(|id| state.users.contains_key(*id))
            .copied()
            .collect())
    }

    async fn list_users(&self, page: &PageSpec) -> Result<Page<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let total_items = users.len() as i64;
        let items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page { items, total_items })
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.state.read().await.users.len() as i64)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut state = self.state.write().await;
        if state.email_taken(&user.email, None) {
            return Err(StoreError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        state.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>> {
        let mut state = self.state.write().await;
        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id)) {
                return Err(StoreError::Conflict(format!(
                    "email {} is already registered",
                    email
                )));
            }
        }
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            user.name = name.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state
            .follows
            .retain(|(follower, followee)| *follower != id && *followee != id);
        state.statuses.retain(|_, status| status.user_id != id);

        Ok(true)
    }
}

#[async_trait]
impl FollowStore for InMemoryStore {
    async fn insert_edges(&self, follower_id: Uuid, followee_ids: &[Uuid]) -> Result<u64> {
        let mut state = self.state.write().await;
        let dangling = !state.users.contains_key(&follower_id)
            || followee_ids.iter().any(|id| !state.users.contains_key(id));
        if dangling {
            return Err(StoreError::DanglingReference);
        }
        if followee_ids.contains(&follower_id) {
            return Err(StoreError::Conflict("users cannot follow themselves".to_string()));
        }
        let mut inserted = 0;
        for followee_id in followee_ids {
            if state.follows.insert((follower_id, *followee_id)) {
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    async fn delete_edges(&self, follower_id: Uuid, followee_ids: &[Uuid]) -> Result<u64> {
        let mut state = self.state.write().await;
        let mut removed = 0;
        for followee_id in followee_ids {
            if state.follows.remove(&(follower_id, *followee_id)) {
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn edge_exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        Ok(self
            .state
            .read()
            .await
            .follows
            .contains(&(follower_id, followee_id)))
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<User>> {
        let state = self.state.read().await;
        let ids = state
            .follows
            .iter()
            .filter(|(_, followee)| *followee == user_id)
            .map(|(follower, _)| *follower);

        Ok(state.sorted_users(ids))
    }

    async fn list_followings(&self, user_id: Uuid) -> Result<Vec<User>> {
        let state = self.state.read().await;
        let ids = state
            .follows
            .range((user_id, Uuid::nil())..=(user_id, Uuid::from_u128(u128::MAX)))
            .map(|(_, followee)| *followee);

        Ok(state.sorted_users(ids))
    }

    async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let state = self.state.read().await;
        Ok(state
            .follows
            .range((user_id, Uuid::nil())..=(user_id, Uuid::from_u128(u128::MAX)))
            .map(|(_, followee)| *followee)
            .collect())
    }
}

#[async_trait]
impl StatusStore for InMemoryStore {
    async fn create_status(
        &self,
        user_id: Uuid,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Status> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::DanglingReference);
        }
        state.next_status_id += 1;
        let status = Status {
            id: state.next_status_id,
            user_id,
            body: body.to_string(),
            created_at,
        };
        state.statuses.insert(status.id, status.clone());

        Ok(status)
    }

    async fn list_by_authors(
        &self,
        author_ids: &[Uuid],
        page: &PageSpec,
    ) -> Result<Page<FeedItem>> {
        let state = self.state.read().await;
        let authors: BTreeSet<&Uuid> = author_ids.iter().collect();
        let mut statuses: Vec<&Status> = state
            .statuses
            .values()
            .filter(|status| authors.contains(&status.user_id))
            .collect();
        statuses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total_items = statuses.len() as i64;
        let items = statuses
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .filter_map(|status| {
                let author = state.users.get(&status.user_id)?;
                Some(FeedItem {
                    status: status.clone(),
                    author: Author::from(author),
                })
            })
            .collect();

        Ok(Page { items, total_items })
    }
}
