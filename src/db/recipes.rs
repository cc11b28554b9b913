use anyhow::{anyhow, Context, Result};
use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::ingredients::resolve_ingredient_with;
use super::Store;
use crate::models::{NewRecipe, Recipe, RecipeSummary};

impl Store {
    /// Insert a recipe and link every listed ingredient, creating ingredients
    /// that do not exist yet. All rows land in one transaction: if any step
    /// fails the transaction is dropped uncommitted and nothing is visible.
    pub fn add_recipe(&mut self, recipe: &NewRecipe) -> Result<i64> {
        if recipe.name.trim().is_empty() {
            return Err(anyhow!("Recipe name is required."));
        }

        let tx = self
            .conn
            .transaction()
            .context("failed to start recipe transaction")?;

        tx.execute(
            "INSERT INTO recipes (name, cuisine, dish_type, prep_time, difficulty, method, rating)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                recipe.name,
                recipe.cuisine,
                recipe.dish_type,
                recipe.prep_time,
                recipe.difficulty,
                recipe.method,
                recipe.rating,
            ],
        )
        .context("failed to insert recipe")?;
        let recipe_id = tx.last_insert_rowid();

        for name in &recipe.ingredients {
            let ingredient_id = resolve_ingredient_with(&tx, name)?;
            tx.execute(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (?1, ?2)",
                params![recipe_id, ingredient_id],
            )
            .context("failed to link ingredient to recipe")?;
        }

        tx.commit().context("failed to commit recipe")?;
        info!(
            recipe_id,
            name = %recipe.name,
            ingredients = recipe.ingredients.len(),
            "added recipe"
        );
        Ok(recipe_id)
    }

    /// List recipes in insertion order, optionally narrowed to names that
    /// contain `search_term`. The term goes straight into a `LIKE` pattern:
    /// matching is case-insensitive for ASCII and `%`/`_` act as wildcards.
    pub fn list_recipes(&self, search_term: Option<&str>) -> Result<Vec<RecipeSummary>> {
        let term = search_term.unwrap_or_default();
        let pattern = format!("%{term}%");

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, cuisine, dish_type, prep_time, difficulty, rating
                 FROM recipes
                 WHERE ?1 = '' OR name LIKE ?2
                 ORDER BY id",
            )
            .context("failed to prepare recipe query")?;

        let recipes = stmt
            .query_map(params![term, pattern], |row| {
                Ok(RecipeSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    cuisine: row.get(2)?,
                    dish_type: row.get(3)?,
                    prep_time: row.get(4)?,
                    difficulty: row.get(5)?,
                    rating: row.get(6)?,
                })
            })
            .context("failed to iterate recipes")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect recipes")?;

        Ok(recipes)
    }

    /// Fetch one recipe with its method text.
    pub fn get_recipe_detail(&self, recipe_id: i64) -> Result<Recipe> {
        self.conn
            .query_row(
                "SELECT id, name, cuisine, dish_type, prep_time, difficulty, method, rating
                 FROM recipes WHERE id = ?1",
                params![recipe_id],
                |row| {
                    Ok(Recipe {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        cuisine: row.get(2)?,
                        dish_type: row.get(3)?,
                        prep_time: row.get(4)?,
                        difficulty: row.get(5)?,
                        method: row.get(6)?,
                        rating: row.get(7)?,
                    })
                },
            )
            .optional()
            .context("failed to load recipe")?
            .ok_or_else(|| anyhow!("Recipe not found"))
    }

    /// Every recipe with its method, for the summary tab.
    pub fn list_recipe_details(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, cuisine, dish_type, prep_time, difficulty, method, rating
                 FROM recipes ORDER BY id",
            )
            .context("failed to prepare recipe detail query")?;

        let recipes = stmt
            .query_map([], |row| {
                Ok(Recipe {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    cuisine: row.get(2)?,
                    dish_type: row.get(3)?,
                    prep_time: row.get(4)?,
                    difficulty: row.get(5)?,
                    method: row.get(6)?,
                    rating: row.get(7)?,
                })
            })
            .context("failed to iterate recipe details")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect recipe details")?;

        Ok(recipes)
    }
}
