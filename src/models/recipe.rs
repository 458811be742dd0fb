use serde::{Deserialize, Serialize};

use crate::entity::recipe;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::tag::TagResponse;
use super::user::ProfileResponse;

/// One ingredient line in a recipe write payload: ingredient id plus amount.
#[derive(Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct IngredientAmount {
    #[schema(example = 10)]
    pub id: i32,
    /// 1..=100.
    #[schema(example = 5)]
    pub amount: i32,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmount>,
    /// Tag ids; at least one required.
    pub tags: Vec<i32>,
    /// Base64 data-URI of the recipe photo; required.
    pub image: String,
    #[schema(example = "Borscht")]
    pub name: String,
    pub text: String,
    /// Minutes, 1..=100.
    #[schema(example = 45)]
    pub cooking_time: i32,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateRecipeRequest {
    /// When present, fully replaces the recipe's ingredient lines.
    pub ingredients: Option<Vec<IngredientAmount>>,
    /// When present, fully replaces the recipe's tag set.
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 150 {
        return Err(AppError::Validation("Name must be 1-150 characters".into()));
    }
    Ok(())
}

fn validate_cooking_time(minutes: i32) -> Result<(), AppError> {
    if !(1..=100).contains(&minutes) {
        return Err(AppError::Validation(
            "Cooking time must be 1-100 minutes".into(),
        ));
    }
    Ok(())
}

fn validate_image(image: &str) -> Result<(), AppError> {
    if image.trim().is_empty() {
        return Err(AppError::Validation(
            "A recipe cannot be created without an image".into(),
        ));
    }
    Ok(())
}

fn validate_ingredient_lines(lines: &[IngredientAmount]) -> Result<(), AppError> {
    if lines.is_empty() {
        return Err(AppError::Validation(
            "A recipe cannot be created without ingredients".into(),
        ));
    }
    for line in lines {
        if !(1..=100).contains(&line.amount) {
            return Err(AppError::Validation(
                "Ingredient amount must be 1-100".into(),
            ));
        }
    }
    Ok(())
}

fn validate_tag_ids(tags: &[i32]) -> Result<(), AppError> {
    if tags.is_empty() {
        return Err(AppError::Validation(
            "A recipe cannot be created without tags".into(),
        ));
    }
    let mut seen = std::collections::HashSet::new();
    for &id in tags {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate tag id {id}")));
        }
    }
    Ok(())
}

pub fn validate_create_recipe(req: &CreateRecipeRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("Text must not be empty".into()));
    }
    validate_image(&req.image)?;
    validate_cooking_time(req.cooking_time)?;
    validate_ingredient_lines(&req.ingredients)?;
    validate_tag_ids(&req.tags)?;
    Ok(())
}

pub fn validate_update_recipe(req: &UpdateRecipeRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    if let Some(ref text) = req.text
        && text.trim().is_empty()
    {
        return Err(AppError::Validation("Text must not be empty".into()));
    }
    if let Some(ref image) = req.image {
        validate_image(image)?;
    }
    if let Some(minutes) = req.cooking_time {
        validate_cooking_time(minutes)?;
    }
    if let Some(ref lines) = req.ingredients {
        validate_ingredient_lines(lines)?;
    }
    if let Some(ref tags) = req.tags {
        validate_tag_ids(tags)?;
    }
    Ok(())
}

/// One ingredient line in a recipe read model; `id` is the ingredient id.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientAmountResponse {
    #[schema(example = 10)]
    pub id: i32,
    #[schema(example = "salt")]
    pub name: String,
    #[schema(example = 5)]
    pub amount: i32,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

/// Full recipe read model, scoped to the requesting user.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: ProfileResponse,
    pub ingredients: Vec<IngredientAmountResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Compact recipe representation returned by the favorite/cart toggles and
/// embedded in author summaries.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeShortResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<recipe::Model> for RecipeShortResponse {
    fn from(m: recipe::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            image: m.image,
            cooking_time: m.cooking_time,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeListResponse {
    pub data: Vec<RecipeResponse>,
    pub pagination: Pagination,
}

/// Recipe listing filters. All predicates compose with AND; `tags` values
/// OR together. The favorited/cart flags are ignored for anonymous
/// requesters and for zero values.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct RecipeListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Nonzero restricts to recipes the requesting user favorited.
    pub is_favorited: Option<u8>,
    /// Nonzero restricts to recipes in the requesting user's cart.
    pub is_in_shopping_cart: Option<u8>,
    /// Tag slugs; may be repeated.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Restrict to recipes by this author.
    pub author: Option<i32>,
}
