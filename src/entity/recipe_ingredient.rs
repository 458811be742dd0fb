use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe.
///
/// Surrogate key on purpose: a recipe may list the same ingredient more than
/// once, and the shopping-list export keeps such lines separate.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub recipe_id: i32,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id")]
    pub recipe: HasOne<super::recipe::Entity>,

    pub ingredient_id: i32,
    #[sea_orm(belongs_to, from = "ingredient_id", to = "id")]
    pub ingredient: HasOne<super::ingredient::Entity>,

    /// 1..=100.
    pub amount: i32,
}

impl ActiveModelBehavior for ActiveModel {}
