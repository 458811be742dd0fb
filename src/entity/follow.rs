use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A subscription edge: `user_id` follows `author_id`.
///
/// The composite key is the uniqueness guarantee for the pair; the
/// self-follow guard lives in the subscribe handler.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "follow")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(primary_key)]
    pub author_id: i32,

    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,
    #[sea_orm(belongs_to, from = "author_id", to = "id", relation_enum = "Author")]
    pub author: HasOne<super::user::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
