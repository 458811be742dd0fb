use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::error::AppError;

pub use super::shared::Pagination;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice@example.org")]
    pub email: String,
    /// Unique username (1-150 chars; letters, digits and `.@+-_`).
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Liddell")]
    pub last_name: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_')
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    let username = payload.username.trim();
    if username.is_empty() || username.chars().count() > 150 {
        return Err(AppError::Validation(
            "Username must be 1-150 characters".into(),
        ));
    }
    if !username.chars().all(is_username_char) {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, and .@+-_".into(),
        ));
    }
    let email = payload.email.trim();
    if email.is_empty() || email.len() > 256 || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    for (field, value) in [
        ("First name", &payload.first_name),
        ("Last name", &payload.last_name),
    ] {
        let value = value.trim();
        if value.is_empty() || value.chars().count() > 150 {
            return Err(AppError::Validation(format!(
                "{field} must be 1-150 characters"
            )));
        }
    }
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for changing the current user's password.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetPasswordRequest {
    pub current_password: String,
    /// New password (8-128 characters).
    pub new_password: String,
}

pub fn validate_set_password_request(payload: &SetPasswordRequest) -> Result<(), AppError> {
    if payload.current_password.is_empty() {
        return Err(AppError::Validation(
            "Current password must not be empty".into(),
        ));
    }
    if payload.new_password.len() < 8 || payload.new_password.len() > 128 {
        return Err(AppError::Validation(
            "New password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

/// A user profile as seen by the requesting user.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "alice@example.org")]
    pub email: String,
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requesting user follows this profile. Always false for
    /// anonymous requesters.
    pub is_subscribed: bool,
}

impl ProfileResponse {
    pub fn from_user(m: user::Model, is_subscribed: bool) -> Self {
        Self {
            email: m.email,
            id: m.id,
            username: m.username,
            first_name: m.first_name,
            last_name: m.last_name,
            is_subscribed,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserListResponse {
    pub data: Vec<ProfileResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct UserListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}
