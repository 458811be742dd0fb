use std::path::Path;

use sea_orm::*;
use tracing::info;

use crate::entity::ingredient;

/// Load `name,measurement_unit` rows from a CSV file into the ingredient
/// table. Rows already present (same name and unit) are skipped, so the
/// loader is safe to run on every startup.
pub async fn seed_ingredients_from_csv(
    db: &DatabaseConnection,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path.as_ref())?;

    let mut inserted = 0u32;
    let mut skipped = 0u32;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, unit)) = parse_csv_row(line) else {
            anyhow::bail!(
                "Malformed ingredient row at line {} of {}",
                lineno + 1,
                path.as_ref().display()
            );
        };

        let exists = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq(&name))
            .filter(ingredient::Column::MeasurementUnit.eq(&unit))
            .one(db)
            .await?
            .is_some();
        if exists {
            skipped += 1;
            continue;
        }

        ingredient::ActiveModel {
            name: Set(name),
            measurement_unit: Set(unit),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    info!(inserted, skipped, "Ingredient seed finished");
    Ok(())
}

/// Split one `name,unit` row. The name may be double-quoted when it contains
/// a comma; quotes inside quoted names double up.
fn parse_csv_row(line: &str) -> Option<(String, String)> {
    if let Some(rest) = line.strip_prefix('"') {
        let mut name = String::new();
        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    name.push('"');
                } else {
                    break;
                }
            } else {
                name.push(c);
            }
        }
        let tail: String = chars.collect();
        let unit = tail.strip_prefix(',')?.trim().to_string();
        if unit.is_empty() {
            return None;
        }
        Some((name, unit))
    } else {
        let (name, unit) = line.split_once(',')?;
        let (name, unit) = (name.trim(), unit.trim());
        if name.is_empty() || unit.is_empty() {
            return None;
        }
        Some((name.to_string(), unit.to_string()))
    }
}
