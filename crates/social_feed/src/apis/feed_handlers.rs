use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::api_models::{common::PaginatedResponse, request::CreateStatusRequest};
use super::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::{
    models::{
        pagination::PageSpec,
        statuses::{FeedItem, Status},
    },
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "feed";

/// Get a user's feed
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/feed",
    operation_id = "getFeed",
    responses(
        (status = 200, description = "Statuses of the user and their followings, newest first", body = PaginatedResponse<FeedItem>),
        (status = 400, description = "Invalid pagination", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID"),
        PageSpec
    )
)]
pub(super) async fn get_feed(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(page): ApiQuery<PageSpec>,
) -> Result<Json<PaginatedResponse<FeedItem>>, AppError> {
    let feed = app_state.feed_service.feed(id, &page).await?;
    Ok(Json(PaginatedResponse::new(feed, &page)))
}

/// Get a user's own statuses
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}/statuses",
    operation_id = "getUserStatuses",
    responses(
        (status = 200, description = "Statuses of the user, newest first", body = PaginatedResponse<FeedItem>),
        (status = 400, description = "Invalid pagination", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID"),
        PageSpec
    )
)]
pub(super) async fn get_user_statuses(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(page): ApiQuery<PageSpec>,
) -> Result<Json<PaginatedResponse<FeedItem>>, AppError> {
    let statuses = app_state
        .status_service
        .list_user_statuses(id, &page)
        .await?;
    Ok(Json(PaginatedResponse::new(statuses, &page)))
}

/// Post a status
#[utoipa::path(
    post,
    tag = TAG,
    path = "/{id}/statuses",
    operation_id = "createStatus",
    responses(
        (status = 201, description = "Status created", body = Status),
        (status = 400, description = "Empty or overlong body", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "Author user ID")
    ),
    request_body = CreateStatusRequest
)]
pub(super) async fn create_status(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<CreateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state
        .status_service
        .create_status(id, &body.body)
        .await?;
    Ok((StatusCode::CREATED, Json(status)))
}
