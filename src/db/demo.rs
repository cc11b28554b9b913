use anyhow::{anyhow, Context, Result};
use rusqlite::params;
use tracing::info;

use super::ingredients::resolve_ingredient_with;
use super::Store;
use crate::models::NewRecipe;

/// A recipe to seed plus optional per-line quantities, matched to
/// `recipe.ingredients` by position.
#[derive(Debug, Clone, Default)]
pub struct DemoRecipe {
    pub recipe: NewRecipe,
    pub quantities: Vec<Option<String>>,
}

/// A seeded review. `user` and `recipe` index into `DemoRows::users` and
/// `DemoRows::recipes`.
#[derive(Debug, Clone)]
pub struct DemoReview {
    pub user: usize,
    pub recipe: usize,
    pub rating: i64,
    pub comment: String,
}

/// Rows for a demo catalog, inserted together by `Store::insert_demo_rows`.
#[derive(Debug, Clone, Default)]
pub struct DemoRows {
    /// `(name, dietary preference)`
    pub users: Vec<(String, String)>,
    /// `(name, stock quantity)`
    pub ingredients: Vec<(String, String)>,
    pub recipes: Vec<DemoRecipe>,
    pub reviews: Vec<DemoReview>,
}

impl Store {
    /// Bulk insert a demo catalog in one transaction. Ingredient stock is
    /// upserted by name, so seeding on top of existing data keeps the
    /// one-row-per-name rule.
    pub fn insert_demo_rows(&mut self, rows: &DemoRows) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to start seed transaction")?;

        let mut user_ids = Vec::with_capacity(rows.users.len());
        for (name, dietary_pref) in &rows.users {
            tx.execute(
                "INSERT INTO users (name, dietary_pref) VALUES (?1, ?2)",
                params![name, dietary_pref],
            )
            .context("failed to seed user")?;
            user_ids.push(tx.last_insert_rowid());
        }

        for (name, stock) in &rows.ingredients {
            tx.execute(
                "INSERT INTO ingredients (name, stock_quantity) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET stock_quantity = excluded.stock_quantity",
                params![name, stock],
            )
            .context("failed to seed ingredient")?;
        }

        let mut recipe_ids = Vec::with_capacity(rows.recipes.len());
        for demo in &rows.recipes {
            let recipe = &demo.recipe;
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
            .context("failed to seed recipe")?;
            let recipe_id = tx.last_insert_rowid();
            recipe_ids.push(recipe_id);

            for (idx, name) in recipe.ingredients.iter().enumerate() {
                let ingredient_id = resolve_ingredient_with(&tx, name)?;
                let quantity = demo.quantities.get(idx).cloned().flatten();
                tx.execute(
                    "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity)
                     VALUES (?1, ?2, ?3)",
                    params![recipe_id, ingredient_id, quantity],
                )
                .context("failed to seed recipe ingredient")?;
            }
        }

        for review in &rows.reviews {
            let user_id = *user_ids
                .get(review.user)
                .ok_or_else(|| anyhow!("demo review references unknown user {}", review.user))?;
            let recipe_id = *recipe_ids
                .get(review.recipe)
                .ok_or_else(|| anyhow!("demo review references unknown recipe {}", review.recipe))?;
            tx.execute(
                "INSERT INTO reviews (recipe_id, user_id, rating, comment) VALUES (?1, ?2, ?3, ?4)",
                params![recipe_id, user_id, review.rating, review.comment],
            )
            .context("failed to seed review")?;
        }

        tx.commit().context("failed to commit demo rows")?;
        info!(
            users = rows.users.len(),
            ingredients = rows.ingredients.len(),
            recipes = rows.recipes.len(),
            reviews = rows.reviews.len(),
            "inserted demo rows"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn quantities_line_up_with_ingredients() {
        let mut store = Store::open_in_memory().unwrap();
        let rows = DemoRows {
            ingredients: vec![("Salt".into(), "200 g".into())],
            recipes: vec![DemoRecipe {
                recipe: NewRecipe::new("Soup", "", Difficulty::Easy, "", ["Salt", "Leek"]),
                quantities: vec![Some("1 tsp".into())],
            }],
            ..DemoRows::default()
        };

        store.insert_demo_rows(&rows).unwrap();

        let lines = store.ingredients_for_recipe(1).unwrap();
        assert_eq!(lines[0].quantity.as_deref(), Some("1 tsp"));
        assert_eq!(lines[1].quantity, None);
        assert_eq!(store.list_ingredients().unwrap().len(), 2);
    }

    #[test]
    fn bad_review_index_rolls_everything_back() {
        let mut store = Store::open_in_memory().unwrap();
        let rows = DemoRows {
            users: vec![("Alice".into(), "Vegetarian".into())],
            reviews: vec![DemoReview {
                user: 0,
                recipe: 3,
                rating: 5,
                comment: String::new(),
            }],
            ..DemoRows::default()
        };

        assert!(store.insert_demo_rows(&rows).is_err());
        assert!(store.list_users().unwrap().is_empty());
    }
}
