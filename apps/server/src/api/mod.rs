//! HTTP transport: routes and handlers.

pub mod handlers;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Teams
        .route("/team/add", post(handlers::teams::add_team))
        .route("/team/get", get(handlers::teams::get_team))
        // Users
        .route("/users/setIsActive", post(handlers::users::set_user_active))
        .route("/users/getReview", get(handlers::users::get_user_reviews))
        // Pull requests
        .route(
            "/pullRequest/create",
            post(handlers::pull_requests::create_pr),
        )
        .route("/pullRequest/merge", post(handlers::pull_requests::merge_pr))
        .route(
            "/pullRequest/reassign",
            post(handlers::pull_requests::reassign_reviewer),
        )
        // Reporting
        .route(
            "/stats/user-assignments",
            get(handlers::stats::user_assignment_stats),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
