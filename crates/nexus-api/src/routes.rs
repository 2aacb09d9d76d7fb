//! API routes.

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::auth::{login, logout, me, register};
use crate::handlers::health;
use crate::handlers::jobs::{
    applicants, apply, create_job, delete_job, employer_jobs, get_job, list_jobs,
    update_applicant_status, update_job,
};
use crate::handlers::users::{
    applied_jobs, change_password, profile, save_job, saved_jobs, unsave_job, update_profile,
};
use crate::middleware::{cors_layer, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me));

    let job_routes = Router::new()
        .route("/", get(list_jobs))
        .route("/", post(create_job))
        // Static segment; never shadowed by /:id thanks to axum's precedence
        .route("/employer/jobs", get(employer_jobs))
        .route("/:id", get(get_job))
        .route("/:id", put(update_job))
        .route("/:id", delete(delete_job))
        .route("/:id/apply", post(apply))
        .route("/:id/applicants", get(applicants))
        .route("/:id/applicants/:applicant_id", put(update_applicant_status));

    let user_routes = Router::new()
        .route("/profile", get(profile))
        .route("/profile", put(update_profile))
        .route("/change-password", put(change_password))
        .route("/jobs/:id/save", post(save_job))
        .route("/jobs/:id/save", delete(unsave_job))
        .route("/saved-jobs", get(saved_jobs))
        .route("/applied-jobs", get(applied_jobs));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/jobs", job_routes)
        .nest("/api/users", user_routes)
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
