//! Credential verifier and access-control gate.
//!
//! Authentication: Argon2id password hashes and HS256 bearer tokens carrying
//! `{sub, role, exp}`. The `AuthUser` extractor resolves the live user record
//! from the store, so a deleted account fails as unauthenticated even with a
//! valid token.
//!
//! Authorization: `require_role` and `require_owner` are the two policy
//! checks every protected operation goes through; ownership always compares
//! against the persisted owner field, never a client-supplied value.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use nexus_models::{Role, User, UserId};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Name of the session cookie. Takes precedence over the bearer header.
pub const SESSION_COOKIE: &str = "token";

const AUTH_DENIED: &str = "Not authorized to access this route";

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(plain: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored hash. Any parse failure counts as a
/// mismatch.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    PasswordHash::new(hashed)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Session token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub role: Role,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Issue a signed session token for a user.
pub fn issue_token(config: &ApiConfig, user: &User) -> ApiResult<String> {
    let exp = (Utc::now() + Duration::hours(config.jwt_expiry_hours)).timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        exp,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("token signing failed: {e}")))
}

/// Parse and verify a session token. Fails on bad signature, malformed
/// token, or expiry.
pub fn decode_token(config: &ApiConfig, token: &str) -> ApiResult<Claims> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::unauthenticated(AUTH_DENIED))
}

/// The authenticated caller, resolved from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| bearer_token(parts))
            .ok_or_else(|| ApiError::unauthenticated(AUTH_DENIED))?;

        let claims = decode_token(&state.config, &token)?;

        let user = state
            .users
            .get(&UserId::from(claims.sub))
            .await?
            .ok_or_else(|| ApiError::unauthenticated(AUTH_DENIED))?;

        Ok(AuthUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
}

/// Fail with `Forbidden` unless the caller holds one of the allowed roles.
pub fn require_role(user: &User, allowed: &[Role], denied_msg: &str) -> ApiResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden(denied_msg))
    }
}

/// Fail with `Forbidden` unless the caller is the resource's recorded owner
/// or an admin.
pub fn require_owner(user: &User, owner: &UserId, action: &str) -> ApiResult<()> {
    if &user.id == owner || user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!("You are not authorized to {action}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: Role) -> User {
        User::new("Ada", "Lovelace", "ada@example.com", "hash", role)
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2-hunter2").unwrap();
        assert_ne!(hash, "hunter2-hunter2");
        assert!(verify_password("hunter2-hunter2", &hash));
        assert!(!verify_password("wrong-password", &hash));
        assert!(!verify_password("hunter2-hunter2", "not-a-phc-string"));
    }

    #[test]
    fn test_token_round_trip() {
        let config = ApiConfig::default();
        let user = test_user(Role::Employer);
        let token = issue_token(&config, &user).unwrap();

        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::Employer);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let config = ApiConfig::default();
        let token = issue_token(&config, &test_user(Role::JobSeeker)).unwrap();

        let mut other = ApiConfig::default();
        other.jwt_secret = "a-different-secret".to_string();
        assert!(decode_token(&other, &token).is_err());
        assert!(decode_token(&config, "garbage.token.here").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = ApiConfig::default();
        config.jwt_expiry_hours = -1;
        let token = issue_token(&config, &test_user(Role::JobSeeker)).unwrap();
        assert!(decode_token(&config, &token).is_err());
    }

    #[test]
    fn test_require_role() {
        let employer = test_user(Role::Employer);
        assert!(require_role(&employer, &[Role::Employer, Role::Admin], "no").is_ok());
        assert!(require_role(&employer, &[Role::JobSeeker], "no").is_err());
    }

    #[test]
    fn test_require_owner_admin_override() {
        let owner = test_user(Role::Employer);
        let admin = test_user(Role::Admin);
        let stranger = test_user(Role::Employer);

        assert!(require_owner(&owner, &owner.id, "update this job").is_ok());
        assert!(require_owner(&admin, &owner.id, "update this job").is_ok());
        assert!(require_owner(&stranger, &owner.id, "update this job").is_err());
    }
}
