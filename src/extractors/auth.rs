use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::entity::user::ROLE_ADMIN;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. Recipe
/// ownership checks happen via `require_author_or_admin()` in the handler body.
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Returns `Ok(())` if the user owns the resource or is an admin.
    pub fn require_author_or_admin(&self, author_id: i32) -> Result<(), AppError> {
        if self.user_id == author_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Returns `Ok(())` if the user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

/// Possibly-anonymous requester, for endpoints readable without a token.
///
/// A missing `Authorization` header yields `MaybeAuthUser(None)`; a header
/// that is present but malformed or expired is still rejected with 401.
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<i32> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

fn parse_bearer(parts: &Parts, secret: &str) -> Result<Option<AuthUser>, AppError> {
    let Some(header) = parts.headers.get("Authorization") else {
        return Ok(None);
    };
    let header = header.to_str().map_err(|_| AppError::TokenInvalid)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::TokenInvalid)?;

    let claims = jwt::verify(token, secret).map_err(|_| AppError::TokenInvalid)?;

    Ok(Some(AuthUser {
        user_id: claims.uid,
        username: claims.sub,
        role: claims.role,
    }))
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        parse_bearer(parts, &app_state.config.auth.jwt_secret)?.ok_or(AppError::TokenMissing)
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(MaybeAuthUser(parse_bearer(
            parts,
            &app_state.config.auth.jwt_secret,
        )?))
    }
}
