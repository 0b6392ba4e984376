use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{user_follows::FollowTargets, users::UserChanges};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub actor_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn changes(self) -> UserChanges {
        UserChanges {
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorRequest {
    pub actor_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUnfollowUserBody {
    pub follower_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowTargetsRequest {
    /// A single user id or a list of them
    #[schema(value_type = Vec<Uuid>)]
    pub user_ids: FollowTargets,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateStatusRequest {
    pub body: String,
}
