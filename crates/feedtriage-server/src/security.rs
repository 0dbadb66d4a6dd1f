//! Admin route protection
//!
//! A mock role check: the dashboard's login is client-side only, so the
//! server trusts the `x-user-role` header when role enforcement is on. An
//! optional shared token adds a real secret on top.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::state::AppState;

pub const ROLE_HEADER: &str = "x-user-role";
pub const TOKEN_HEADER: &str = "x-admin-token";
pub const ADMIN_ROLE: &str = "admin";

/// Admin check failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Admin role required")]
    NotAdmin,

    #[error("Admin token required")]
    MissingToken,

    #[error("Invalid admin token")]
    InvalidToken,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAdmin => AppError::Forbidden(err.to_string()),
            AuthError::MissingToken | AuthError::InvalidToken => {
                AppError::Unauthorized(err.to_string())
            }
        }
    }
}

/// Validate admin headers against the configured checks
pub fn check_admin(headers: &HeaderMap, auth: &AuthConfig) -> Result<(), AuthError> {
    if auth.enforce_admin_role {
        let role = headers.get(ROLE_HEADER).and_then(|h| h.to_str().ok());
        if role != Some(ADMIN_ROLE) {
            return Err(AuthError::NotAdmin);
        }
    }

    if let Some(expected) = &auth.admin_token {
        let provided = headers
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        if !constant_time_eq(provided, expected) {
            return Err(AuthError::InvalidToken);
        }
    }

    Ok(())
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Extractor that rejects the request unless it passes [`check_admin`]
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        check_admin(&parts.headers, &state.config.auth)?;
        Ok(AdminGuard)
    }
}
