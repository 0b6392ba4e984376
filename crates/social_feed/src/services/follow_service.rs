use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ensure_users_exist;
use crate::{
    models::{
        user_follows::{FollowSummary, FollowTargets},
        users::UserResponse,
    },
    repositories::{FollowStore, UserStore},
    utils::errors::app_error::AppError,
};

/// Mutations and reads over the follow graph.
///
/// Follows are an additive merge: edges to users outside the given targets
/// are never touched. Every target is checked before any edge is written.
#[derive(Clone)]
pub struct FollowService {
    users: Arc<dyn UserStore>,
    follows: Arc<dyn FollowStore>,
}

impl FollowService {
    pub fn new(users: Arc<dyn UserStore>, follows: Arc<dyn FollowStore>) -> Self {
        Self { users, follows }
    }

    pub async fn follow(
        &self,
        actor_id: Uuid,
        targets: impl Into<FollowTargets>,
    ) -> Result<FollowSummary, AppError> {
        let targets: FollowTargets = targets.into();
        if targets.is_empty() {
            warn!("Follow by {} rejected: empty target set", actor_id);
            return Err(AppError::BadRequest(
                "at least one user id is required".to_string(),
            ));
        }
        if targets.contains(&actor_id) {
            warn!("Follow by {} rejected: self-follow", actor_id);
            return Err(AppError::BadRequest(
                "users cannot follow themselves".to_string(),
            ));
        }

        let followee_ids = targets.to_vec();
        let mut referenced = followee_ids.clone();
        referenced.push(actor_id);
        ensure_users_exist(self.users.as_ref(), &referenced).await?;

        let changed = self.follows.insert_edges(actor_id, &followee_ids).await?;
        info!(
            "User {} followed {} of {} requested users",
            actor_id,
            changed,
            targets.len()
        );

        Ok(FollowSummary {
            requested: targets.len(),
            changed,
        })
    }

    pub async fn unfollow(
        &self,
        actor_id: Uuid,
        targets: impl Into<FollowTargets>,
    ) -> Result<FollowSummary, AppError> {
        let targets: FollowTargets = targets.into();
        if targets.is_empty() {
            warn!("Unfollow by {} rejected: empty target set", actor_id);
            return Err(AppError::BadRequest(
                "at least one user id is required".to_string(),
            ));
        }

        let mut referenced = targets.to_vec();
        referenced.push(actor_id);
        ensure_users_exist(self.users.as_ref(), &referenced).await?;

        // No edge from a user to themselves can exist.
        let followee_ids = targets.without(&actor_id).to_vec();
        let changed = if followee_ids.is_empty() {
            0
        } else {
            self.follows.delete_edges(actor_id, &followee_ids).await?
        };
        info!(
            "User {} unfollowed {} of {} requested users",
            actor_id,
            changed,
            targets.len()
        );

        Ok(FollowSummary {
            requested: targets.len(),
            changed,
        })
    }

    pub async fn is_following(&self, actor_id: Uuid, candidate_id: Uuid) -> Result<bool, AppError> {
        ensure_users_exist(self.users.as_ref(), &[actor_id, candidate_id]).await?;
        let following = self.follows.edge_exists(actor_id, candidate_id).await?;
        debug!("User {} following {}: {}", actor_id, candidate_id, following);

        Ok(following)
    }

    pub async fn followers(&self, user_id: Uuid) -> Result<Vec<UserResponse>, AppError> {
        ensure_users_exist(self.users.as_ref(), &[user_id]).await?;
        let followers = self.follows.list_followers(user_id).await?;

        Ok(followers.into_iter().map(UserResponse::from).collect())
    }

    pub async fn followings(&self, user_id: Uuid) -> Result<Vec<UserResponse>, AppError> {
        ensure_users_exist(self.users.as_ref(), &[user_id]).await?;
        let followings = self.follows.list_followings(user_id).await?;

        Ok(followings.into_iter().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use tokio::task::JoinSet;

    use super::*;
    use crate::{repositories::Repositories, services::testing::create_user};

    fn service(repos: &Repositories) -> FollowService {
        FollowService::new(repos.users.clone(), repos.follows.clone())
    }

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let b = create_user(&repos, "Bob", false).await;
        let follows = service(&repos);

        let first = follows.follow(a.id, b.id).await.unwrap();
        assert_eq!(first.changed, 1);
        assert!(follows.is_following(a.id, b.id).await.unwrap());

        let second = follows.follow(a.id, b.id).await.unwrap();
        assert_eq!(second.changed, 0);
        assert_eq!(follows.followings(a.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_follow_is_additive() {
        let repos = Repositories::in_memory();
        let u = create_user(&repos, "Alice", false).await;
        let v = create_user(&repos, "Bob", false).await;
        let w = create_user(&repos, "Carol", false).await;
        let follows = service(&repos);

        follows.follow(u.id, vec![v.id, w.id]).await.unwrap();
        follows.follow(u.id, vec![v.id]).await.unwrap();

        assert!(follows.is_following(u.id, v.id).await.unwrap());
        assert!(follows.is_following(u.id, w.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unfollow_without_edge_is_a_noop() {
        let repos = Repositories::in_memory();
        let u = create_user(&repos, "Alice", false).await;
        let v = create_user(&repos, "Bob", false).await;
        let follows = service(&repos);

        let summary = follows.unfollow(u.id, v.id).await.unwrap();
        assert_eq!(summary.changed, 0);
        assert!(!follows.is_following(u.id, v.id).await.unwrap());
        assert!(follows.followings(u.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unfollow_removes_only_given_edges() {
        let repos = Repositories::in_memory();
        let u = create_user(&repos, "Alice", false).await;
        let v = create_user(&repos, "Bob", false).await;
        let w = create_user(&repos, "Carol", false).await;
        let follows = service(&repos);

        follows.follow(u.id, vec![v.id, w.id]).await.unwrap();
        let summary = follows.unfollow(u.id, v.id).await.unwrap();

        assert_eq!(summary.changed, 1);
        assert!(!follows.is_following(u.id, v.id).await.unwrap());
        assert!(follows.is_following(u.id, w.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_followers_and_followings_are_duals() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let b = create_user(&repos, "Bob", false).await;
        let c = create_user(&repos, "Carol", false).await;
        let follows = service(&repos);

        follows.follow(a.id, vec![b.id, c.id]).await.unwrap();
        follows.follow(b.id, c.id).await.unwrap();

        for user in [&a, &b, &c] {
            for followed in follows.followings(user.id).await.unwrap() {
                let followers = follows.followers(followed.id).await.unwrap();
                assert!(followers.iter().any(|f| f.id == user.id));
            }
            for follower in follows.followers(user.id).await.unwrap() {
                let followings = follows.followings(follower.id).await.unwrap();
                assert!(followings.iter().any(|f| f.id == user.id));
            }
        }

        let names: Vec<String> = follows
            .followers(c.id)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_empty_targets_rejected() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let follows = service(&repos);

        let err = follows.follow(a.id, Vec::<Uuid>::new()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let err = follows.unfollow(a.id, Vec::<Uuid>::new()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_self_follow_rejected() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let follows = service(&repos);

        let err = follows.follow(a.id, a.id).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(!follows.is_following(a.id, a.id).await.unwrap());

        let summary = follows.unfollow(a.id, a.id).await.unwrap();
        assert_eq!(summary.changed, 0);
    }

    #[tokio::test]
    async fn test_unknown_target_creates_no_edges() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let b = create_user(&repos, "Bob", false).await;
        let ghost = Uuid::new_v4();
        let follows = service(&repos);

        let err = follows.follow(a.id, vec![b.id, ghost]).await.unwrap_err();
        match err {
            AppError::UsersNotFound(missing) => assert_eq!(missing, vec![ghost]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!follows.is_following(a.id, b.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_actor_not_found() {
        let repos = Repositories::in_memory();
        let b = create_user(&repos, "Bob", false).await;
        let follows = service(&repos);

        let err = follows.follow(Uuid::new_v4(), b.id).await.unwrap_err();
        assert!(matches!(err, AppError::UsersNotFound(_)));
        let err = follows.followers(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::UsersNotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_follows_create_one_edge() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let b = create_user(&repos, "Bob", false).await;
        let follows = service(&repos);

        let mut tasks = JoinSet::new();
        for _ in 0..64 {
            let follows = follows.clone();
            tasks.spawn(async move { follows.follow(a.id, b.id).await });
        }
        let mut changed = 0;
        while let Some(result) = tasks.join_next().await {
            changed += result.unwrap().unwrap().changed;
        }

        assert_eq!(changed, 1);
        assert_eq!(follows.followings(a.id).await.unwrap().len(), 1);
        assert_eq!(follows.followers(b.id).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_follow_and_unfollow_converge() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "Alice", false).await;
        let b = create_user(&repos, "Bob", false).await;
        let follows = service(&repos);

        let mut tasks = JoinSet::new();
        for i in 0..64 {
            let follows = follows.clone();
            tasks.spawn(async move {
                if i % 2 == 0 {
                    follows.follow(a.id, b.id).await
                } else {
                    follows.unfollow(a.id, b.id).await
                }
            });
        }
        while let Some(result) = tasks.join_next().await {
            assert_eq!(result.unwrap().unwrap().requested, 1);
        }

        let edges = follows.followings(a.id).await.unwrap().len();
        assert!(edges <= 1);
        assert_eq!(follows.is_following(a.id, b.id).await.unwrap(), edges == 1);
    }
}
