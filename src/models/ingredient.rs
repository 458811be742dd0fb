use serde::{Deserialize, Serialize};

use crate::entity::ingredient;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateIngredientRequest {
    #[schema(example = "salt")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

pub fn validate_create_ingredient(req: &CreateIngredientRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() || req.name.trim().chars().count() > 150 {
        return Err(AppError::Validation("Name must be 1-150 characters".into()));
    }
    if req.measurement_unit.trim().is_empty() || req.measurement_unit.trim().chars().count() > 50 {
        return Err(AppError::Validation(
            "Measurement unit must be 1-50 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct IngredientResponse {
    #[schema(example = 10)]
    pub id: i32,
    #[schema(example = "salt")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

impl From<ingredient::Model> for IngredientResponse {
    fn from(m: ingredient::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            measurement_unit: m.measurement_unit,
        }
    }
}

/// Ingredient lookup supports a name prefix filter; no pagination.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct IngredientListQuery {
    /// Restrict to ingredients whose name starts with this value.
    pub name: Option<String>,
}
