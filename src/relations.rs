//! Toggle service for the user-recipe relation tables.
//!
//! Both relations share the same shape: a composite-keyed join row that
//! exists or doesn't. ADD relies on the primary key to reject duplicates so
//! two concurrent requests cannot both insert; REMOVE treats only "zero rows
//! deleted" as not-found and lets real storage errors propagate.

use sea_orm::*;

use crate::entity::{favorite, recipe, shopping_cart};
use crate::error::AppError;

#[derive(Clone, Copy, Debug)]
pub enum RecipeRelation {
    Favorite,
    ShoppingCart,
}

impl RecipeRelation {
    fn already_exists(self) -> &'static str {
        match self {
            RecipeRelation::Favorite => "Recipe is already in favorites",
            RecipeRelation::ShoppingCart => "Recipe is already in the shopping cart",
        }
    }

    fn missing(self) -> &'static str {
        match self {
            RecipeRelation::Favorite => "Recipe is not in favorites",
            RecipeRelation::ShoppingCart => "Recipe is not in the shopping cart",
        }
    }
}

pub async fn find_recipe<C: ConnectionTrait>(db: &C, id: i32) -> Result<recipe::Model, AppError> {
    recipe::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))
}

/// Create the relation row for (user, recipe) and return the recipe for the
/// compact response body. Fails with NotFound for a missing recipe and
/// Conflict for a duplicate ADD.
pub async fn add_recipe_relation<C: ConnectionTrait>(
    db: &C,
    kind: RecipeRelation,
    user_id: i32,
    recipe_id: i32,
) -> Result<recipe::Model, AppError> {
    let recipe = find_recipe(db, recipe_id).await?;

    let result = match kind {
        RecipeRelation::Favorite => favorite::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
        }
        .insert(db)
        .await
        .map(|_| ()),
        RecipeRelation::ShoppingCart => shopping_cart::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
        }
        .insert(db)
        .await
        .map(|_| ()),
    };

    if let Err(e) = result {
        return Err(match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(kind.already_exists().into())
            }
            _ => AppError::from(e),
        });
    }

    Ok(recipe)
}

/// Delete the relation row for (user, recipe). Fails with NotFound when the
/// recipe is missing or when there was no row to delete.
pub async fn remove_recipe_relation<C: ConnectionTrait>(
    db: &C,
    kind: RecipeRelation,
    user_id: i32,
    recipe_id: i32,
) -> Result<(), AppError> {
    find_recipe(db, recipe_id).await?;

    let deleted = match kind {
        RecipeRelation::Favorite => {
            favorite::Entity::delete_by_id((user_id, recipe_id))
                .exec(db)
                .await?
        }
        RecipeRelation::ShoppingCart => {
            shopping_cart::Entity::delete_by_id((user_id, recipe_id))
                .exec(db)
                .await?
        }
    };

    if deleted.rows_affected == 0 {
        return Err(AppError::NotFound(kind.missing().into()));
    }
    Ok(())
}
