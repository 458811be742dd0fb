use serde::{Deserialize, Serialize};

use crate::entity::tag;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTagRequest {
    #[schema(example = "lunch")]
    pub name: String,
    /// Unique display color, e.g. a hex code.
    #[schema(example = "#49B64E")]
    pub color: String,
    /// Unique URL-safe identifier used by the recipe tag filter.
    #[schema(example = "lunch")]
    pub slug: String,
}

pub fn validate_create_tag(req: &CreateTagRequest) -> Result<(), AppError> {
    for (field, value, max) in [
        ("Name", &req.name, 150),
        ("Color", &req.color, 50),
        ("Slug", &req.slug, 150),
    ] {
        let value = value.trim();
        if value.is_empty() || value.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{field} must be 1-{max} characters"
            )));
        }
    }
    if !req
        .slug
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::Validation(
            "Slug must contain only letters, digits, hyphens and underscores".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "lunch")]
    pub name: String,
    #[schema(example = "#49B64E")]
    pub color: String,
    #[schema(example = "lunch")]
    pub slug: String,
}

impl From<tag::Model> for TagResponse {
    fn from(m: tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
            slug: m.slug,
        }
    }
}
