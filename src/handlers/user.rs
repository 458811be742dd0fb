use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{follow, recipe, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, MaybeAuthUser};
use crate::extractors::json::AppJson;
use crate::models::shared::Pagination;
use crate::models::subscription::{
    SubscribeQuery, SubscriptionListQuery, SubscriptionListResponse, SubscriptionResponse,
};
use crate::models::user::{
    ProfileResponse, RegisterRequest, SetPasswordRequest, UserListQuery, UserListResponse,
    validate_register_request, validate_set_password_request,
};
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    operation_id = "register",
    summary = "Register a new user",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ProfileResponse),
        (status = 400, description = "Validation error or duplicate (VALIDATION_ERROR, CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        username: Set(payload.username.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        password: Set(hash),
        role: Set(user::ROLE_USER.to_string()),
        ..Default::default()
    };

    let model = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A user with this username or email already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::from_user(model, false)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users with pagination",
    params(UserListQuery),
    responses(
        (status = 200, description = "Paginated user profiles", body = UserListResponse),
        (status = 401, description = "Malformed token (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, viewer, query))]
pub async fn list_users(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let select = user::Entity::find();
    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let users = select
        .order_by_asc(user::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let followed = followed_ids(&state.db, viewer.user_id(), users.iter().map(|u| u.id)).await?;
    let data = users
        .into_iter()
        .map(|u| {
            let is_subscribed = followed.contains(&u.id);
            ProfileResponse::from_user(u, is_subscribed)
        })
        .collect();

    Ok(Json(UserListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    operation_id = "getCurrentUser",
    summary = "Get the current user's profile",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let model = find_user(&state.db, auth_user.user_id).await?;
    Ok(Json(ProfileResponse::from_user(model, false)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user profile by ID",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, viewer), fields(id))]
pub async fn get_user(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProfileResponse>, AppError> {
    let model = find_user(&state.db, id).await?;
    let is_subscribed = match viewer.user_id() {
        Some(viewer_id) => follow::Entity::find_by_id((viewer_id, id))
            .one(&state.db)
            .await?
            .is_some(),
        None => false,
    };
    Ok(Json(ProfileResponse::from_user(model, is_subscribed)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/set_password",
    tag = "Users",
    operation_id = "setPassword",
    summary = "Change the current user's password",
    request_body = SetPasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error or wrong current password (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn set_password(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_set_password_request(&payload)?;

    let model = find_user(&state.db, auth_user.user_id).await?;

    let is_valid = hash::verify_password(&payload.current_password, &model.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
    if !is_valid {
        return Err(AppError::Validation("Current password is incorrect".into()));
    }

    let new_hash = hash::hash_password(&payload.new_password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let mut active: user::ActiveModel = model.into();
    active.password = Set(new_hash);
    active.update(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/subscriptions",
    tag = "Subscriptions",
    operation_id = "listSubscriptions",
    summary = "List authors the current user follows",
    params(SubscriptionListQuery),
    responses(
        (status = 200, description = "Followed authors with their recipes", body = SubscriptionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_subscriptions(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionListQuery>,
) -> Result<Json<SubscriptionListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let recipes_limit = query.recipes_limit();

    let select = follow::Entity::find().filter(follow::Column::UserId.eq(auth_user.user_id));
    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let author_ids: Vec<i32> = select
        .order_by_asc(follow::Column::AuthorId)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .select_only()
        .column(follow::Column::AuthorId)
        .into_tuple()
        .all(&state.db)
        .await?;

    let mut authors = user::Entity::find()
        .filter(user::Column::Id.is_in(author_ids.clone()))
        .all(&state.db)
        .await?;
    authors.sort_by_key(|a| a.id);

    let mut data = Vec::with_capacity(authors.len());
    for author in authors {
        data.push(
            subscription_response(&state.db, auth_user.user_id, author, recipes_limit).await?,
        );
    }

    Ok(Json(SubscriptionListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/subscribe",
    tag = "Subscriptions",
    operation_id = "subscribe",
    summary = "Follow an author",
    params(
        ("id" = i32, Path, description = "Author ID"),
        SubscribeQuery,
    ),
    responses(
        (status = 201, description = "Now following", body = SubscriptionResponse),
        (status = 400, description = "Self-follow or already following (VALIDATION_ERROR, CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id, author_id = id))]
pub async fn subscribe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<SubscribeQuery>,
) -> Result<impl IntoResponse, AppError> {
    if id == auth_user.user_id {
        return Err(AppError::Validation("Cannot subscribe to yourself".into()));
    }

    let author = find_user(&state.db, id).await?;

    let result = follow::ActiveModel {
        user_id: Set(auth_user.user_id),
        author_id: Set(id),
    }
    .insert(&state.db)
    .await;

    if let Err(e) = result {
        return Err(match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Already subscribed to this author".into())
            }
            _ => AppError::from(e),
        });
    }

    let body =
        subscription_response(&state.db, auth_user.user_id, author, query.recipes_limit()).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/subscribe",
    tag = "Subscriptions",
    operation_id = "unsubscribe",
    summary = "Unfollow an author",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "No longer following"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User or subscription not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, author_id = id))]
pub async fn unsubscribe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_user(&state.db, id).await?;

    let deleted = follow::Entity::delete_by_id((auth_user.user_id, id))
        .exec(&state.db)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(AppError::NotFound("Subscription not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Which of `candidates` the viewer follows; empty for anonymous viewers.
async fn followed_ids<C: ConnectionTrait>(
    db: &C,
    viewer_id: Option<i32>,
    candidates: impl Iterator<Item = i32>,
) -> Result<HashSet<i32>, AppError> {
    let Some(viewer_id) = viewer_id else {
        return Ok(HashSet::new());
    };
    let candidates: Vec<i32> = candidates.collect();
    if candidates.is_empty() {
        return Ok(HashSet::new());
    }
    let ids: Vec<i32> = follow::Entity::find()
        .filter(follow::Column::UserId.eq(viewer_id))
        .filter(follow::Column::AuthorId.is_in(candidates))
        .select_only()
        .column(follow::Column::AuthorId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids.into_iter().collect())
}

/// Author summary embedded in subscription bodies. Newest recipes first;
/// `recipes_limit` truncates the list but not the count. `is_subscribed` is
/// re-read from the follow table rather than assumed from the call site.
async fn subscription_response<C: ConnectionTrait>(
    db: &C,
    viewer_id: i32,
    author: user::Model,
    recipes_limit: Option<u64>,
) -> Result<SubscriptionResponse, AppError> {
    let is_subscribed = follow::Entity::find_by_id((viewer_id, author.id))
        .one(db)
        .await?
        .is_some();

    let recipes_count = recipe::Entity::find()
        .filter(recipe::Column::AuthorId.eq(author.id))
        .count(db)
        .await?;

    let recipes = recipe::Entity::find()
        .filter(recipe::Column::AuthorId.eq(author.id))
        .order_by_desc(recipe::Column::Id)
        .limit(recipes_limit)
        .all(db)
        .await?;

    Ok(SubscriptionResponse {
        email: author.email,
        id: author.id,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        is_subscribed,
        recipes: recipes.into_iter().map(Into::into).collect(),
        recipes_count,
    })
}
