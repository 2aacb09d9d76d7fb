//! Registration, login, and session handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use tracing::info;

use nexus_models::{validate_registration, Role, User};
use nexus_store::StoreError;

use crate::auth::{self, AuthUser, SESSION_COOKIE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Only honored at creation; role is immutable afterwards.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Trimmed user summary returned by register/login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: UserSummary,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<SessionResponse>)> {
    let errors = validate_registration(&req.first_name, &req.last_name, &req.email, &req.password);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let email = req.email.trim().to_lowercase();
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::duplicate("User with this email already exists"));
    }

    let password_hash = auth::hash_password(&req.password)?;
    let user = User::new(
        req.first_name.trim(),
        req.last_name.trim(),
        email,
        password_hash,
        req.role.unwrap_or_default(),
    );

    // Insert enforces email uniqueness again; a concurrent registration
    // surfaces as Duplicate here. Other store failures keep their own class.
    let user = state.users.insert(user).await.map_err(|e| match e {
        StoreError::AlreadyExists(_) => {
            ApiError::duplicate("User with this email already exists")
        }
        other => ApiError::from(other),
    })?;

    info!(user_id = %user.id, role = %user.role, "registered user");

    let token = auth::issue_token(&state.config, &user)?;
    let jar = jar.add(session_cookie(&state, token.clone()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(SessionResponse {
            success: true,
            user: UserSummary::from(&user),
            token,
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password return the identical error, so account
/// existence never leaks.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let user = state
        .users
        .find_by_email(req.email.trim())
        .await?
        .ok_or_else(|| ApiError::unauthenticated(INVALID_CREDENTIALS))?;

    if !auth::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = auth::issue_token(&state.config, &user)?;
    let jar = jar.add(session_cookie(&state, token.clone()));

    Ok((
        jar,
        Json(SessionResponse {
            success: true,
            user: UserSummary::from(&user),
            token,
        }),
    ))
}

/// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (
        jar,
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// GET /api/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        success: true,
        user,
    })
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(state.config.is_production())
        .path("/")
        .build()
}
