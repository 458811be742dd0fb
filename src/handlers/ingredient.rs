use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::ingredient;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::ingredient::{
    CreateIngredientRequest, IngredientListQuery, IngredientResponse, validate_create_ingredient,
};
use crate::models::shared::escape_like;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    tag = "Ingredients",
    operation_id = "listIngredients",
    summary = "List ingredients, optionally filtered by name prefix",
    params(IngredientListQuery),
    responses(
        (status = 200, description = "Matching ingredients, ordered by name", body = Vec<IngredientResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientListQuery>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let mut select = ingredient::Entity::find();

    if let Some(ref name) = query.name {
        let term = escape_like(name.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(ingredient::Column::Name)))
                    .like(LikeExpr::new(format!("{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let items = select
        .order_by_asc(ingredient::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(IngredientResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    tag = "Ingredients",
    operation_id = "getIngredient",
    summary = "Get an ingredient by ID",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientResponse),
        (status = 404, description = "Ingredient not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, AppError> {
    let ingredient = ingredient::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient not found".into()))?;

    Ok(Json(ingredient.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    tag = "Ingredients",
    operation_id = "createIngredient",
    summary = "Create an ingredient (admin only)",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_ingredient(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateIngredientRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    validate_create_ingredient(&payload)?;

    let new_ingredient = ingredient::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        measurement_unit: Set(payload.measurement_unit.trim().to_string()),
        ..Default::default()
    };

    let model = new_ingredient.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(IngredientResponse::from(model))))
}
