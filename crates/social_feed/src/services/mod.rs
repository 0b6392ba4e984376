use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{repositories::UserStore, utils::errors::app_error::AppError};

pub mod feed_service;
pub mod follow_service;
pub mod status_service;
pub mod user_service;

/// Fails with [`AppError::UsersNotFound`] listing every id in `ids` that has no user.
pub(crate) async fn ensure_users_exist(users: &dyn UserStore, ids: &[Uuid]) -> Result<(), AppError> {
    let existing: BTreeSet<Uuid> = users.find_existing_ids(ids).await?.into_iter().collect();
    let missing: BTreeSet<Uuid> = ids
        .iter()
        .filter(|id| !existing.contains(*id))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::UsersNotFound(missing.into_iter().collect()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::{
        models::users::{NewUser, User},
        repositories::Repositories,
    };

    pub async fn create_user(repos: &Repositories, name: &str, is_admin: bool) -> User {
        repos
            .users
            .create_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                is_admin,
            })
            .await
            .unwrap()
    }
}
