use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::tag;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::tag::{CreateTagRequest, TagResponse, validate_create_tag};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    tag = "Tags",
    operation_id = "listTags",
    summary = "List all tags",
    responses(
        (status = 200, description = "All tags, ordered by id", body = Vec<TagResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = tag::Entity::find()
        .order_by_asc(tag::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    tag = "Tags",
    operation_id = "getTag",
    summary = "Get a tag by ID",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag details", body = TagResponse),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, AppError> {
    let tag = tag::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".into()))?;

    Ok(Json(tag.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    tag = "Tags",
    operation_id = "createTag",
    summary = "Create a tag (admin only)",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Validation error or duplicate (VALIDATION_ERROR, CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(slug = %payload.slug))]
pub async fn create_tag(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTagRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    validate_create_tag(&payload)?;

    let new_tag = tag::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        color: Set(payload.color.trim().to_string()),
        slug: Set(payload.slug.trim().to_string()),
        ..Default::default()
    };

    let model = new_tag.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A tag with this name, color or slug already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(TagResponse::from(model))))
}
