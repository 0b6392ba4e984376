use std::sync::Arc;

use axum::{extract::State, Json};
use uuid::Uuid;

use super::api_models::{
    request::{FollowTargetsRequest, FollowUnfollowUserBody},
    response::IsFollowingResponse,
};
use super::extractors::{ApiJson, ApiPath};
use crate::{
    models::{user_follows::FollowSummary, users::UserResponse},
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "follows";

/// Follow a user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/{id}/follow",
    operation_id = "followUser",
    responses(
        (status = 200, description = "User followed (or already followed)", body = FollowSummary),
        (status = 400, description = "Self-follow", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID to follow")
    ),
    request_body = FollowUnfollowUserBody
)]
pub(super) async fn follow_user(
    State(app_state): State<Arc<AppState>>,
    ApiPath(followee_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<FollowUnfollowUserBody>,
) -> Result<Json<FollowSummary>, AppError> {
    let summary = app_state
        .follow_service
        .follow(body.follower_id, followee_id)
        .await?;
    Ok(Json(summary))
}

/// Unfollow a user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/{id}/unfollow",
    operation_id = "unfollowUser",
    responses(
        (status = 200, description = "User unfollowed (or was not followed)", body = FollowSummary),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID to unfollow")
    ),
    request_body = FollowUnfollowUserBody
)]
pub(super) async fn unfollow_user(
    State(app_state): State<Arc<AppState>>,
    ApiPath(followee_id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<FollowUnfollowUserBody>,
) -> Result<Json<FollowSummary>, AppError> {
    let summary = app_state
        .follow_service
        .unfollow(body.follower_id, followee_id)
        .await?;
    Ok(Json(summary))
}

/// Get followers of a user
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/followers",
    operation_id = "getFollowers",
    responses(
        (status = 200, description = "List of followers", body = Vec<UserResponse>),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID")
    )
)]
pub(super) async fn get_followers(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let followers = app_state.follow_service.followers(id).await?;
    Ok(Json(followers))
}

/// Get the users a user follows
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/followings",
    operation_id = "getFollowings",
    responses(
        (status = 200, description = "List of followed users", body = Vec<UserResponse>),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID")
    )
)]
pub(super) async fn get_followings(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let followings = app_state.follow_service.followings(id).await?;
    Ok(Json(followings))
}

/// Follow several users at once
#[utoipa::path(
    post,
    tag = TAG,
    path = "/{id}/followings",
    operation_id = "followUsers",
    responses(
        (status = 200, description = "Missing edges created; existing ones kept", body = FollowSummary),
        (status = 400, description = "Empty target set or self-follow", body = ErrorPayload),
        (status = 404, description = "One or more users not found; nothing was changed", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "Follower user ID")
    ),
    request_body = FollowTargetsRequest
)]
pub(super) async fn follow_users(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<FollowTargetsRequest>,
) -> Result<Json<FollowSummary>, AppError> {
    let summary = app_state.follow_service.follow(id, body.user_ids).await?;
    Ok(Json(summary))
}

/// Unfollow several users at once
#[utoipa::path(
    delete,
    tag = TAG,
    path = "/{id}/followings",
    operation_id = "unfollowUsers",
    responses(
        (status = 200, description = "Given edges removed", body = FollowSummary),
        (status = 400, description = "Empty target set", body = ErrorPayload),
        (status = 404, description = "One or more users not found; nothing was changed", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "Follower user ID")
    ),
    request_body = FollowTargetsRequest
)]
pub(super) async fn unfollow_users(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<FollowTargetsRequest>,
) -> Result<Json<FollowSummary>, AppError> {
    let summary = app_state.follow_service.unfollow(id, body.user_ids).await?;
    Ok(Json(summary))
}

/// Check whether a user follows another
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/followings/{other_id}",
    operation_id = "isFollowing",
    responses(
        (status = 200, description = "Follow state", body = IsFollowingResponse),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "Follower user ID"),
        ("other_id" = Uuid, Path, description = "Candidate followee user ID")
    )
)]
pub(super) async fn is_following(
    State(app_state): State<Arc<AppState>>,
    ApiPath((id, other_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<IsFollowingResponse>, AppError> {
    let following = app_state.follow_service.is_following(id, other_id).await?;
    Ok(Json(IsFollowingResponse { following }))
}
