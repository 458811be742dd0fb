use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Default role assigned on registration.
pub const ROLE_USER: &str = "user";
/// Role allowed to manage reference data and any recipe.
pub const ROLE_ADMIN: &str = "admin";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,

    #[sea_orm(has_many)]
    pub recipes: HasMany<super::recipe::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
