use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::api_models::{
    common::PaginatedResponse,
    query::ListUsersQuery,
    request::{ActorRequest, CreateUserRequest, UpdateUserRequest},
};
use super::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::{
    models::users::{UserListItem, UserResponse},
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "users";

/// List users
#[utoipa::path(
    get,
    tag = TAG,
    path = "/",
    operation_id = "listUsers",
    responses(
        (status = 200, description = "Page of users", body = PaginatedResponse<UserListItem>),
        (status = 400, description = "Invalid pagination", body = ErrorPayload),
        (status = 404, description = "Viewer not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(ListUsersQuery)
)]
pub(super) async fn list_users(
    State(app_state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<UserListItem>>, AppError> {
    let page = query.page_spec();
    let users = app_state
        .user_service
        .list_users(&page, query.viewer_id)
        .await?;
    Ok(Json(PaginatedResponse::new(users, &page)))
}

/// Create a user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "createUser",
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid name or email", body = ErrorPayload),
        (status = 409, description = "Email already registered", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    request_body = CreateUserRequest
)]
pub(super) async fn create_user(
    State(app_state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_service
        .create_user(&body.name, &body.email)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user
#[utoipa::path(
    get,
    tag = TAG,
    path = "/{id}",
    operation_id = "getUser",
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID")
    )
)]
pub(super) async fn get_user(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<UserResponse, AppError> {
    app_state
        .user_service
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

/// Update a user
#[utoipa::path(
    patch,
    tag = TAG,
    path = "/{id}",
    operation_id = "updateUser",
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid changes", body = ErrorPayload),
        (status = 403, description = "Actor may not update this user", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 409, description = "Email already registered", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID to update")
    ),
    request_body = UpdateUserRequest
)]
pub(super) async fn update_user(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateUserRequest>,
) -> Result<UserResponse, AppError> {
    let actor_id = body.actor_id;
    app_state
        .user_service
        .update_user(actor_id, id, body.changes())
        .await
}

/// Delete a user
#[utoipa::path(
    delete,
    tag = TAG,
    path = "/{id}",
    operation_id = "destroyUser",
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Actor may not delete this user", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    params(
        ("id" = Uuid, Path, description = "User ID to delete")
    ),
    request_body = ActorRequest
)]
pub(super) async fn destroy_user(
    State(app_state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<ActorRequest>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .user_service
        .destroy_user(body.actor_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
