use std::collections::{HashMap, HashSet};

use axum::{
    Json,
    extract::{DefaultBodyLimit, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::Query;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{favorite, ingredient, recipe, recipe_ingredient, recipe_tag, shopping_cart, tag, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, MaybeAuthUser};
use crate::extractors::json::AppJson;
use crate::models::recipe::*;
use crate::models::tag::TagResponse;
use crate::models::user::ProfileResponse;
use crate::relations::{
    RecipeRelation, add_recipe_relation, find_recipe, remove_recipe_relation,
};
use crate::shopping_list::{CSV_FILENAME, build_shopping_list, render_csv};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List recipes with filters and pagination",
    description = "Newest first. Filters compose with AND; repeated `tags` values match recipes carrying any of the slugs. The `is_favorited` and `is_in_shopping_cart` flags are ignored for anonymous requesters.",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Paginated recipes", body = RecipeListResponse),
        (status = 401, description = "Malformed token (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, viewer, query))]
pub async fn list_recipes(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let viewer_id = viewer.user_id();

    let mut select = recipe::Entity::find();

    if let Some(author_id) = query.author {
        select = select.filter(recipe::Column::AuthorId.eq(author_id));
    }

    if !query.tags.is_empty() {
        let tag_ids: Vec<i32> = tag::Entity::find()
            .filter(tag::Column::Slug.is_in(query.tags.clone()))
            .select_only()
            .column(tag::Column::Id)
            .into_tuple()
            .all(&state.db)
            .await?;
        select = select.filter(
            recipe::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(recipe_tag::Column::RecipeId)
                    .from(recipe_tag::Entity)
                    .and_where(recipe_tag::Column::TagId.is_in(tag_ids))
                    .to_owned(),
            ),
        );
    }

    if let Some(viewer_id) = viewer_id {
        if query.is_favorited.unwrap_or(0) != 0 {
            select = select.filter(
                recipe::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(favorite::Column::RecipeId)
                        .from(favorite::Entity)
                        .and_where(favorite::Column::UserId.eq(viewer_id))
                        .to_owned(),
                ),
            );
        }
        if query.is_in_shopping_cart.unwrap_or(0) != 0 {
            select = select.filter(
                recipe::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(shopping_cart::Column::RecipeId)
                        .from(shopping_cart::Entity)
                        .and_where(shopping_cart::Column::UserId.eq(viewer_id))
                        .to_owned(),
                ),
            );
        }
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let recipes = select
        .order_by_desc(recipe::Column::Id)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = build_recipe_responses(&state.db, viewer_id, recipes).await?;

    Ok(Json(RecipeListResponse {
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
    path = "/api/v1/recipes",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Create a recipe",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recipe(&payload)?;

    let txn = state.db.begin().await?;

    check_ingredients_exist(&txn, &payload.ingredients).await?;
    check_tags_exist(&txn, &payload.tags).await?;

    let new_recipe = recipe::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        image: Set(payload.image),
        text: Set(payload.text),
        cooking_time: Set(payload.cooking_time),
        author_id: Set(auth_user.user_id),
        ..Default::default()
    };
    let model = new_recipe.insert(&txn).await?;

    insert_ingredient_lines(&txn, model.id, &payload.ingredients).await?;
    insert_tag_links(&txn, model.id, &payload.tags).await?;

    txn.commit().await?;

    let mut responses =
        build_recipe_responses(&state.db, Some(auth_user.user_id), vec![model]).await?;
    let body = responses
        .pop()
        .ok_or_else(|| AppError::Internal("Recipe vanished after insert".into()))?;

    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, viewer), fields(id))]
pub async fn get_recipe(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, AppError> {
    let model = find_recipe(&state.db, id).await?;
    let mut responses = build_recipe_responses(&state.db, viewer.user_id(), vec![model]).await?;
    let body = responses
        .pop()
        .ok_or_else(|| AppError::Internal("Recipe vanished after lookup".into()))?;
    Ok(Json(body))
}

#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Update a recipe",
    description = "PATCH semantics for scalar fields. When `ingredients` or `tags` is present, it fully replaces the existing set. Only the author or an admin may update.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    validate_update_recipe(&payload)?;

    let existing = find_recipe(&state.db, id).await?;
    auth_user.require_author_or_admin(existing.author_id)?;

    if payload == UpdateRecipeRequest::default() {
        let mut responses =
            build_recipe_responses(&state.db, Some(auth_user.user_id), vec![existing]).await?;
        let body = responses
            .pop()
            .ok_or_else(|| AppError::Internal("Recipe vanished after lookup".into()))?;
        return Ok(Json(body));
    }

    let txn = state.db.begin().await?;

    if let Some(ref lines) = payload.ingredients {
        check_ingredients_exist(&txn, lines).await?;
    }
    if let Some(ref tags) = payload.tags {
        check_tags_exist(&txn, tags).await?;
    }

    let mut active: recipe::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(text) = payload.text {
        active.text = Set(text);
    }
    if let Some(minutes) = payload.cooking_time {
        active.cooking_time = Set(minutes);
    }
    let model = active.update(&txn).await?;

    if let Some(ref lines) = payload.ingredients {
        recipe_ingredient::Entity::delete_many()
            .filter(recipe_ingredient::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        insert_ingredient_lines(&txn, id, lines).await?;
    }
    if let Some(ref tags) = payload.tags {
        recipe_tag::Entity::delete_many()
            .filter(recipe_tag::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        insert_tag_links(&txn, id, tags).await?;
    }

    txn.commit().await?;

    let mut responses =
        build_recipe_responses(&state.db, Some(auth_user.user_id), vec![model]).await?;
    let body = responses
        .pop()
        .ok_or_else(|| AppError::Internal("Recipe vanished after update".into()))?;
    Ok(Json(body))
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe",
    description = "Deletes the recipe along with its ingredient lines, tag links, and any favorite or cart rows that reference it. Only the author or an admin may delete.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_recipe(&txn, id).await?;
    auth_user.require_author_or_admin(existing.author_id)?;

    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    favorite::Entity::delete_many()
        .filter(favorite::Column::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    shopping_cart::Entity::delete_many()
        .filter(shopping_cart::Column::RecipeId.eq(id))
        .exec(&txn)
        .await?;
    recipe::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    tag = "Favorites",
    operation_id = "addFavorite",
    summary = "Add a recipe to favorites",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added to favorites", body = RecipeShortResponse),
        (status = 400, description = "Already in favorites (CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn add_favorite(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model =
        add_recipe_relation(&state.db, RecipeRelation::Favorite, auth_user.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(RecipeShortResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorite",
    tag = "Favorites",
    operation_id = "removeFavorite",
    summary = "Remove a recipe from favorites",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe or relation not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn remove_favorite(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    remove_recipe_relation(&state.db, RecipeRelation::Favorite, auth_user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping_cart",
    tag = "Shopping Cart",
    operation_id = "addToShoppingCart",
    summary = "Add a recipe to the shopping cart",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added to cart", body = RecipeShortResponse),
        (status = 400, description = "Already in cart (CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn add_to_shopping_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model =
        add_recipe_relation(&state.db, RecipeRelation::ShoppingCart, auth_user.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(RecipeShortResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping_cart",
    tag = "Shopping Cart",
    operation_id = "removeFromShoppingCart",
    summary = "Remove a recipe from the shopping cart",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed from cart"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe or relation not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, id))]
pub async fn remove_from_shopping_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    remove_recipe_relation(&state.db, RecipeRelation::ShoppingCart, auth_user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    tag = "Shopping Cart",
    operation_id = "downloadShoppingCart",
    summary = "Download the shopping list as CSV",
    description = "One row per ingredient line of every recipe in the cart; lines are never merged across recipes.",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn download_shopping_cart(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lines = build_shopping_list(&state.db, auth_user.user_id).await?;
    let csv = render_csv(&lines);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

/// Body limit for recipe writes; images arrive inline as base64 (8MB).
pub fn recipe_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(8 * 1024 * 1024)
}

async fn check_ingredients_exist<C: ConnectionTrait>(
    db: &C,
    lines: &[IngredientAmount],
) -> Result<(), AppError> {
    let ids: Vec<i32> = lines.iter().map(|l| l.id).collect();
    let found: Vec<i32> = ingredient::Entity::find()
        .filter(ingredient::Column::Id.is_in(ids.clone()))
        .select_only()
        .column(ingredient::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    let found: HashSet<i32> = found.into_iter().collect();
    for id in ids {
        if !found.contains(&id) {
            return Err(AppError::Validation(format!(
                "Ingredient with id {id} does not exist"
            )));
        }
    }
    Ok(())
}

async fn check_tags_exist<C: ConnectionTrait>(db: &C, tag_ids: &[i32]) -> Result<(), AppError> {
    let found: Vec<i32> = tag::Entity::find()
        .filter(tag::Column::Id.is_in(tag_ids.to_vec()))
        .select_only()
        .column(tag::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    let found: HashSet<i32> = found.into_iter().collect();
    for &id in tag_ids {
        if !found.contains(&id) {
            return Err(AppError::Validation(format!(
                "Tag with id {id} does not exist"
            )));
        }
    }
    Ok(())
}

async fn insert_ingredient_lines<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    lines: &[IngredientAmount],
) -> Result<(), AppError> {
    for line in lines {
        recipe_ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(line.id),
            amount: Set(line.amount),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn insert_tag_links<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    tag_ids: &[i32],
) -> Result<(), AppError> {
    for &tag_id in tag_ids {
        recipe_tag::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag_id),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Assemble full read models for a page of recipes with batched lookups:
/// one query each for authors, follow edges, tag links, ingredient lines,
/// favorites and cart rows.
async fn build_recipe_responses<C: ConnectionTrait>(
    db: &C,
    viewer_id: Option<i32>,
    recipes: Vec<recipe::Model>,
) -> Result<Vec<RecipeResponse>, AppError> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();

    let authors: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(author_ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let followed: HashSet<i32> = match viewer_id {
        Some(viewer_id) => {
            let ids: Vec<i32> = crate::entity::follow::Entity::find()
                .filter(crate::entity::follow::Column::UserId.eq(viewer_id))
                .filter(crate::entity::follow::Column::AuthorId.is_in(author_ids))
                .select_only()
                .column(crate::entity::follow::Column::AuthorId)
                .into_tuple()
                .all(db)
                .await?;
            ids.into_iter().collect()
        }
        None => HashSet::new(),
    };

    let tag_links = recipe_tag::Entity::find()
        .filter(recipe_tag::Column::RecipeId.is_in(recipe_ids.clone()))
        .all(db)
        .await?;
    let tag_ids: Vec<i32> = tag_links.iter().map(|l| l.tag_id).collect();
    let tags: HashMap<i32, tag::Model> = tag::Entity::find()
        .filter(tag::Column::Id.is_in(tag_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();
    let mut tags_by_recipe: HashMap<i32, Vec<TagResponse>> = HashMap::new();
    for link in tag_links {
        if let Some(t) = tags.get(&link.tag_id) {
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(t.clone().into());
        }
    }

    let mut lines = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids.clone()))
        .all(db)
        .await?;
    lines.sort_by_key(|l| l.id);
    let ingredient_ids: Vec<i32> = lines.iter().map(|l| l.ingredient_id).collect();
    let ingredients: HashMap<i32, ingredient::Model> = ingredient::Entity::find()
        .filter(ingredient::Column::Id.is_in(ingredient_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|i| (i.id, i))
        .collect();
    let mut lines_by_recipe: HashMap<i32, Vec<IngredientAmountResponse>> = HashMap::new();
    for line in lines {
        if let Some(ing) = ingredients.get(&line.ingredient_id) {
            lines_by_recipe
                .entry(line.recipe_id)
                .or_default()
                .push(IngredientAmountResponse {
                    id: ing.id,
                    name: ing.name.clone(),
                    amount: line.amount,
                    measurement_unit: ing.measurement_unit.clone(),
                });
        }
    }

    let (favorited, in_cart) = match viewer_id {
        Some(viewer_id) => {
            let fav: Vec<i32> = favorite::Entity::find()
                .filter(favorite::Column::UserId.eq(viewer_id))
                .filter(favorite::Column::RecipeId.is_in(recipe_ids.clone()))
                .select_only()
                .column(favorite::Column::RecipeId)
                .into_tuple()
                .all(db)
                .await?;
            let cart: Vec<i32> = shopping_cart::Entity::find()
                .filter(shopping_cart::Column::UserId.eq(viewer_id))
                .filter(shopping_cart::Column::RecipeId.is_in(recipe_ids))
                .select_only()
                .column(shopping_cart::Column::RecipeId)
                .into_tuple()
                .all(db)
                .await?;
            (
                fav.into_iter().collect::<HashSet<i32>>(),
                cart.into_iter().collect::<HashSet<i32>>(),
            )
        }
        None => (HashSet::new(), HashSet::new()),
    };

    let mut out = Vec::with_capacity(recipes.len());
    for r in recipes {
        let author = authors
            .get(&r.author_id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Author {} missing for recipe {}", r.author_id, r.id)))?;
        let is_subscribed = followed.contains(&author.id);
        out.push(RecipeResponse {
            id: r.id,
            tags: tags_by_recipe.remove(&r.id).unwrap_or_default(),
            author: ProfileResponse::from_user(author, is_subscribed),
            ingredients: lines_by_recipe.remove(&r.id).unwrap_or_default(),
            is_favorited: favorited.contains(&r.id),
            is_in_shopping_cart: in_cart.contains(&r.id),
            name: r.name,
            image: r.image,
            text: r.text,
            cooking_time: r.cooking_time,
        });
    }
    Ok(out)
}
