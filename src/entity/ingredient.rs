use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference data; listed ordered by name and seeded from CSV at startup.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub measurement_unit: String,

    #[sea_orm(has_many)]
    pub recipe_ingredients: HasMany<super::recipe_ingredient::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
