use std::{collections::BTreeSet, sync::Arc};

use tracing::debug;
use uuid::Uuid;

use super::ensure_users_exist;
use crate::{
    models::{
        pagination::{Page, PageSpec},
        statuses::FeedItem,
    },
    repositories::{FollowStore, StatusStore, UserStore},
    utils::errors::app_error::AppError,
};

/// Composes a user's feed: their own statuses plus those of everyone they
/// follow, newest first.
#[derive(Clone)]
pub struct FeedService {
    users: Arc<dyn UserStore>,
    follows: Arc<dyn FollowStore>,
    statuses: Arc<dyn StatusStore>,
}

impl FeedService {
    pub fn new(
        users: Arc<dyn UserStore>,
        follows: Arc<dyn FollowStore>,
        statuses: Arc<dyn StatusStore>,
    ) -> Self {
        Self {
            users,
            follows,
            statuses,
        }
    }

    /// The user together with everyone they follow.
    pub async fn relevant_authors(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let mut authors: BTreeSet<Uuid> = self
            .follows
            .following_ids(user_id)
            .await?
            .into_iter()
            .collect();
        authors.insert(user_id);

        Ok(authors.into_iter().collect())
    }

    pub async fn feed(&self, user_id: Uuid, page: &PageSpec) -> Result<Page<FeedItem>, AppError> {
        page.validate()?;
        ensure_users_exist(self.users.as_ref(), &[user_id]).await?;

        let authors = self.relevant_authors(user_id).await?;
        let feed = self.statuses.list_by_authors(&authors, page).await?;
        debug!(
            "Feed for {} page {}: {} of {} statuses from {} authors",
            user_id,
            page.page,
            feed.items.len(),
            feed.total_items,
            authors.len()
        );

        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        repositories::Repositories,
        services::{follow_service::FollowService, testing::create_user},
    };

    fn services(repos: &Repositories) -> (FollowService, FeedService) {
        (
            FollowService::new(repos.users.clone(), repos.follows.clone()),
            FeedService::new(
                repos.users.clone(),
                repos.follows.clone(),
                repos.statuses.clone(),
            ),
        )
    }

    fn bodies(page: &Page<FeedItem>) -> Vec<(String, String)> {
        page.items
            .iter()
            .map(|item| (item.status.body.clone(), item.author.name.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_feed_orders_self_and_followings_newest_first() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let b = create_user(&repos, "B", false).await;
        let c = create_user(&repos, "C", false).await;
        let (follows, feeds) = services(&repos);
        follows.follow(a.id, vec![b.id, c.id]).await.unwrap();

        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(1);
        let t3 = t2 + Duration::seconds(1);
        repos.statuses.create_status(b.id, "hello", t1).await.unwrap();
        repos.statuses.create_status(c.id, "world", t2).await.unwrap();
        repos.statuses.create_status(a.id, "me", t3).await.unwrap();

        let feed = feeds.feed(a.id, &PageSpec::new(1, 10)).await.unwrap();
        assert_eq!(
            bodies(&feed),
            vec![
                ("me".to_string(), "A".to_string()),
                ("world".to_string(), "C".to_string()),
                ("hello".to_string(), "B".to_string()),
            ]
        );
        assert_eq!(feed.total_items, 3);
    }

    #[tokio::test]
    async fn test_feed_excludes_unfollowed_authors() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let b = create_user(&repos, "B", false).await;
        let stranger = create_user(&repos, "W", false).await;
        let (follows, feeds) = services(&repos);

        let now = Utc::now();
        repos.statuses.create_status(a.id, "mine", now).await.unwrap();
        repos.statuses.create_status(b.id, "from b", now).await.unwrap();
        repos.statuses.create_status(stranger.id, "nope", now).await.unwrap();

        follows.follow(a.id, b.id).await.unwrap();
        let feed = feeds.feed(a.id, &PageSpec::default()).await.unwrap();
        assert!(feed.items.iter().any(|item| item.author.id == b.id));
        assert!(feed.items.iter().all(|item| item.author.id != stranger.id));

        follows.unfollow(a.id, b.id).await.unwrap();
        let feed = feeds.feed(a.id, &PageSpec::default()).await.unwrap();
        assert_eq!(bodies(&feed), vec![("mine".to_string(), "A".to_string())]);
    }

    #[tokio::test]
    async fn test_feed_always_includes_own_statuses() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let (_, feeds) = services(&repos);
        repos.statuses.create_status(a.id, "alone", Utc::now()).await.unwrap();

        let feed = feeds.feed(a.id, &PageSpec::default()).await.unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].author.id, a.id);
    }

    #[tokio::test]
    async fn test_equal_timestamps_break_ties_by_id() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let (_, feeds) = services(&repos);
        let now = Utc::now();
        let first = repos.statuses.create_status(a.id, "first", now).await.unwrap();
        let second = repos.statuses.create_status(a.id, "second", now).await.unwrap();

        let feed = feeds.feed(a.id, &PageSpec::default()).await.unwrap();
        let ids: Vec<i64> = feed.items.iter().map(|item| item.status.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_pagination_is_stable() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let (_, feeds) = services(&repos);
        let now = Utc::now();
        for i in 0..7 {
            // Pairs share a timestamp so the tie-break matters.
            let at = now + Duration::seconds(i / 2);
            repos
                .statuses
                .create_status(a.id, &format!("status {i}"), at)
                .await
                .unwrap();
        }

        let page = PageSpec::new(2, 3);
        let once = feeds.feed(a.id, &page).await.unwrap();
        let twice = feeds.feed(a.id, &page).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.items.len(), 3);
        assert_eq!(page.total_pages(once.total_items), 3);

        let mut seen = Vec::new();
        for number in 1..=3 {
            let page = feeds.feed(a.id, &PageSpec::new(number, 3)).await.unwrap();
            seen.extend(page.items.into_iter().map(|item| item.status.id));
        }
        let unique: BTreeSet<i64> = seen.iter().copied().collect();
        assert_eq!(seen.len(), 7);
        assert_eq!(unique.len(), 7);
    }

    #[tokio::test]
    async fn test_feed_validates_page_and_user() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let (_, feeds) = services(&repos);

        let err = feeds.feed(a.id, &PageSpec::new(0, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let err = feeds.feed(Uuid::new_v4(), &PageSpec::default()).await.unwrap_err();
        assert!(matches!(err, AppError::UsersNotFound(_)));
    }
}
