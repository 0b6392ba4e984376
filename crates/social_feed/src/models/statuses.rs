use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::users::User;
use crate::utils::gravatar::{gravatar_url, DEFAULT_AVATAR_SIZE};

pub const MAX_STATUS_LENGTH: usize = 140;

#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: i64,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Display fields of a status author.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: String,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Author {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.gravatar(DEFAULT_AVATAR_SIZE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedItem {
    pub status: Status,
    pub author: Author,
}

/// A status joined with its author's row.
#[derive(Debug, FromRow)]
pub struct FeedRow {
    pub id: i64,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
}

impl From<FeedRow> for FeedItem {
    fn from(row: FeedRow) -> Self {
        FeedItem {
            author: Author {
                id: row.user_id,
                avatar_url: gravatar_url(&row.author_email, DEFAULT_AVATAR_SIZE),
                name: row.author_name,
            },
            status: Status {
                id: row.id,
                user_id: row.user_id,
                body: row.body,
                created_at: row.created_at,
            },
        }
    }
}
