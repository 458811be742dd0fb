//! Shopping-list assembly and CSV rendering.
//!
//! Lines are deliberately not merged: two recipes that both use salt produce
//! two rows, each tagged with its recipe name, so the shopper can see where
//! a quantity comes from. Ordering is (recipe name, ingredient name, amount)
//! to keep the export stable across requests.

use std::collections::HashMap;

use sea_orm::*;

use crate::entity::{ingredient, recipe, recipe_ingredient, shopping_cart};
use crate::error::AppError;

pub const CSV_FILENAME: &str = "shopping_cart.csv";

const CSV_HEADER: &str = "Recipe,Ingredient_name,Amount,measurement_unit";

/// One export row: an ingredient line of one recipe in the user's cart.
#[derive(Debug, PartialEq)]
pub struct ShoppingListLine {
    pub recipe_name: String,
    pub ingredient_name: String,
    pub amount: i32,
    pub measurement_unit: String,
}

/// Collect every ingredient line of every recipe in the user's cart.
pub async fn build_shopping_list<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<ShoppingListLine>, AppError> {
    let recipe_ids: Vec<i32> = shopping_cart::Entity::find()
        .filter(shopping_cart::Column::UserId.eq(user_id))
        .select_only()
        .column(shopping_cart::Column::RecipeId)
        .into_tuple()
        .all(db)
        .await?;

    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_names: HashMap<i32, String> = recipe::Entity::find()
        .filter(recipe::Column::Id.is_in(recipe_ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    let lines = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids))
        .all(db)
        .await?;

    let ingredient_ids: Vec<i32> = lines.iter().map(|l| l.ingredient_id).collect();
    let ingredients: HashMap<i32, ingredient::Model> = ingredient::Entity::find()
        .filter(ingredient::Column::Id.is_in(ingredient_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|i| (i.id, i))
        .collect();

    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let (Some(recipe_name), Some(ing)) = (
            recipe_names.get(&line.recipe_id),
            ingredients.get(&line.ingredient_id),
        ) else {
            continue;
        };
        out.push(ShoppingListLine {
            recipe_name: recipe_name.clone(),
            ingredient_name: ing.name.clone(),
            amount: line.amount,
            measurement_unit: ing.measurement_unit.clone(),
        });
    }

    out.sort_by(|a, b| {
        (&a.recipe_name, &a.ingredient_name, a.amount)
            .cmp(&(&b.recipe_name, &b.ingredient_name, b.amount))
    });
    Ok(out)
}

/// Render the export as CSV with a fixed header row.
pub fn render_csv(lines: &[ShoppingListLine]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push_str("\r\n");
    for line in lines {
        out.push_str(&csv_field(&line.recipe_name));
        out.push(',');
        out.push_str(&csv_field(&line.ingredient_name));
        out.push(',');
        out.push_str(&line.amount.to_string());
        out.push(',');
        out.push_str(&csv_field(&line.measurement_unit));
        out.push_str("\r\n");
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
