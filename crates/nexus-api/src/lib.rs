//! Axum HTTP API server for the Nexus job board.
//!
//! This crate provides:
//! - Registration/login with Argon2id credentials and JWT bearer sessions
//! - Role- and ownership-gated job listing CRUD
//! - The application submission and status-transition workflow
//! - Fire-and-forget email notifications on lifecycle events

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
