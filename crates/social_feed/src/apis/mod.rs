use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;

pub mod api_models;
pub mod extractors;
pub mod feed_handlers;
pub mod follow_handlers;
pub mod user_handlers;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "users", description = "User management API"),
        (name = "follows", description = "Follow graph API"),
        (name = "feed", description = "Statuses and feeds API")
    )
)]
pub struct ApiDoc;

pub fn setup_routes() -> Router<Arc<AppState>> {
    let api_doc = ApiDoc::openapi();

    let user_router = OpenApiRouter::new()
        .routes(routes!(user_handlers::list_users, user_handlers::create_user))
        .routes(routes!(
            user_handlers::get_user,
            user_handlers::update_user,
            user_handlers::destroy_user
        ))
        .routes(routes!(follow_handlers::follow_user))
        .routes(routes!(follow_handlers::unfollow_user))
        .routes(routes!(follow_handlers::get_followers))
        .routes(routes!(
            follow_handlers::get_followings,
            follow_handlers::follow_users,
            follow_handlers::unfollow_users
        ))
        .routes(routes!(follow_handlers::is_following))
        .routes(routes!(feed_handlers::get_feed))
        .routes(routes!(
            feed_handlers::get_user_statuses,
            feed_handlers::create_status
        ));

    let user_router = OpenApiRouter::with_openapi(api_doc).nest("/users", user_router);

    let (api_router, api_openapi) = OpenApiRouter::new()
        .nest("/api/v1", user_router)
        .split_for_parts();

    Router::new()
        .merge(Scalar::with_url("/docs", api_openapi))
        .merge(api_router)
}
