use serde::{Deserialize, Serialize};

use super::recipe::RecipeShortResponse;
use super::shared::Pagination;

/// Author summary projected from a follow edge: profile fields plus the
/// author's recipes and total recipe count.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubscriptionResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Re-read from the follow table when the body is built, not assumed
    /// from the call site.
    pub is_subscribed: bool,
    /// The author's recipes, truncated to `recipes_limit` when given.
    pub recipes: Vec<RecipeShortResponse>,
    /// Total recipe count for the author, unaffected by the truncation.
    pub recipes_count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubscriptionListResponse {
    pub data: Vec<SubscriptionResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SubscriptionListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Cap on embedded recipes per author. Non-numeric values are ignored.
    pub recipes_limit: Option<String>,
}

impl SubscriptionListQuery {
    /// The source accepted any string here and only applied it when it
    /// parsed as a number; preserved as-is.
    pub fn recipes_limit(&self) -> Option<u64> {
        self.recipes_limit.as_deref().and_then(|v| v.parse().ok())
    }
}

/// `recipes_limit` also applies to the subscribe-toggle response body.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<String>,
}

impl SubscribeQuery {
    pub fn recipes_limit(&self) -> Option<u64> {
        self.recipes_limit.as_deref().and_then(|v| v.parse().ok())
    }
}
