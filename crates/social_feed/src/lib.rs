use apis::setup_routes;
use axum::Router;
use repositories::Repositories;
use services::{
    feed_service::FeedService, follow_service::FollowService, status_service::StatusService,
    user_service::UserService,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod apis;
pub mod models;
pub mod policies;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod utils;

pub struct AppState {
    pub user_service: UserService,
    pub follow_service: FollowService,
    pub feed_service: FeedService,
    pub status_service: StatusService,
}

impl AppState {
    pub fn new(repositories: Repositories) -> Self {
        let Repositories {
            users,
            follows,
            statuses,
        } = repositories;

        Self {
            user_service: UserService::new(users.clone()),
            follow_service: FollowService::new(users.clone(), follows.clone()),
            feed_service: FeedService::new(users.clone(), follows, statuses.clone()),
            status_service: StatusService::new(users, statuses),
        }
    }
}

pub async fn setup_database(settings: &settings::Settings) -> Result<Arc<PgPool>, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections.unwrap_or(10))
        .connect(&settings.database_url)
        .await?;

    if settings.run_migrations.unwrap_or(true) {
        sqlx::migrate!().run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(pool))
}

pub fn build_app(state: AppState) -> Router {
    setup_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn setup_router(
    settings: &settings::Settings,
) -> Result<Router, Box<dyn std::error::Error>> {
    let db = setup_database(settings).await?;
    let state = AppState::new(Repositories::postgres(db));

    Ok(build_app(state))
}

pub fn init_tracing(settings: &settings::Settings) {
    let env = settings.environment.clone().unwrap_or("DEV".to_string());
    let level = match env.as_str() {
        "PROD" => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(env != "PROD")
        .init();
}
