use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::ensure_users_exist;
use crate::{
    models::{
        pagination::{Page, PageSpec},
        statuses::{FeedItem, Status, MAX_STATUS_LENGTH},
    },
    repositories::{StatusStore, UserStore},
    utils::errors::app_error::AppError,
};

#[derive(Clone)]
pub struct StatusService {
    users: Arc<dyn UserStore>,
    statuses: Arc<dyn StatusStore>,
}

impl StatusService {
    pub fn new(users: Arc<dyn UserStore>, statuses: Arc<dyn StatusStore>) -> Self {
        Self { users, statuses }
    }

    pub async fn create_status(&self, user_id: Uuid, body: &str) -> Result<Status, AppError> {
        let body = body.trim();
        if body.is_empty() || body.chars().count() > MAX_STATUS_LENGTH {
            warn!("Status by {} rejected: invalid length", user_id);
            return Err(AppError::BadRequest(format!(
                "status must be between 1 and {} characters",
                MAX_STATUS_LENGTH
            )));
        }
        ensure_users_exist(self.users.as_ref(), &[user_id]).await?;

        let status = self
            .statuses
            .create_status(user_id, body, Utc::now())
            .await?;
        info!("User {} posted status {}", user_id, status.id);

        Ok(status)
    }

    /// A user's own statuses, in feed order.
    pub async fn list_user_statuses(
        &self,
        user_id: Uuid,
        page: &PageSpec,
    ) -> Result<Page<FeedItem>, AppError> {
        page.validate()?;
        ensure_users_exist(self.users.as_ref(), &[user_id]).await?;

        Ok(self.statuses.list_by_authors(&[user_id], page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repositories::Repositories, services::testing::create_user};

    fn service(repos: &Repositories) -> StatusService {
        StatusService::new(repos.users.clone(), repos.statuses.clone())
    }

    #[tokio::test]
    async fn test_create_status_trims_body() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let statuses = service(&repos);

        let status = statuses.create_status(a.id, "  hi there \n").await.unwrap();
        assert_eq!(status.body, "hi there");
        assert_eq!(status.user_id, a.id);

        let page = statuses
            .list_user_statuses(a.id, &PageSpec::default())
            .await
            .unwrap();
        assert_eq!(page.items[0].status, status);
    }

    #[tokio::test]
    async fn test_create_status_validates_length() {
        let repos = Repositories::in_memory();
        let a = create_user(&repos, "A", false).await;
        let statuses = service(&repos);

        let err = statuses.create_status(a.id, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let too_long = "x".repeat(MAX_STATUS_LENGTH + 1);
        let err = statuses.create_status(a.id, &too_long).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let longest = "é".repeat(MAX_STATUS_LENGTH);
        assert!(statuses.create_status(a.id, &longest).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_status_for_unknown_user() {
        let repos = Repositories::in_memory();
        let statuses = service(&repos);

        let err = statuses
            .create_status(Uuid::new_v4(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsersNotFound(_)));
    }
}
