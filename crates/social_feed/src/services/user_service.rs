use crate::models::pagination::{Page, PageSpec};
use crate::models::users::{NewUser, User, UserChanges, UserListItem, UserResponse};
use crate::policies::user_policy::{can_destroy, can_update};
use crate::repositories::UserStore;
use crate::utils::errors::app_error::AppError;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 255;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserResponse>, AppError> {
        let user = self.users.find_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }

    async fn require_user(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Lists users in registration order. With a viewer, each row says
    /// whether the viewer may update or destroy it.
    pub async fn list_users(
        &self,
        page: &PageSpec,
        viewer_id: Option<Uuid>,
    ) -> Result<Page<UserListItem>, AppError> {
        page.validate()?;
        let viewer = match viewer_id {
            Some(id) => Some(self.require_user(id).await?),
            None => None,
        };
        let users = self.users.list_users(page).await?;

        Ok(users.map(|user| UserListItem {
            can_update: viewer.as_ref().map(|viewer| can_update(viewer, &user)),
            can_destroy: viewer.as_ref().map(|viewer| can_destroy(viewer, &user)),
            user: UserResponse::from(user),
        }))
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<UserResponse, AppError> {
        let user = NewUser {
            name: validate_name(name)?,
            email: validate_email(email)?,
            is_admin: false,
        };
        let created = self.users.create_user(user).await?;
        info!("Created user {}", created.id);

        Ok(UserResponse::from(created))
    }

    pub async fn update_user(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        changes: UserChanges,
    ) -> Result<UserResponse, AppError> {
        if changes.is_empty() {
            return Err(AppError::BadRequest("nothing to update".to_string()));
        }
        let changes = UserChanges {
            name: changes.name.as_deref().map(validate_name).transpose()?,
            email: changes.email.as_deref().map(validate_email).transpose()?,
        };

        let actor = self.require_user(actor_id).await?;
        let subject = self.require_user(user_id).await?;
        if !can_update(&actor, &subject) {
            warn!("User {} may not update user {}", actor_id, user_id);
            return Err(AppError::Forbidden(
                "not allowed to update this user".to_string(),
            ));
        }

        let updated = self
            .users
            .update_user(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        info!("User {} updated user {}", actor_id, user_id);

        Ok(UserResponse::from(updated))
    }

    pub async fn destroy_user(&self, actor_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let actor = self.require_user(actor_id).await?;
        let subject = self.require_user(user_id).await?;
        if !can_destroy(&actor, &subject) {
            warn!("User {} may not destroy user {}", actor_id, user_id);
            return Err(AppError::Forbidden(
                "not allowed to delete this user".to_string(),
            ));
        }

        if !self.users.delete_user(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        info!("User {} deleted user {}", actor_id, user_id);

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "name must be between 1 and {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !well_formed || email.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::BadRequest(format!("invalid email: {}", email)));
    }
    Ok(email.to_string())
}
