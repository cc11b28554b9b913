use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::Store;
use crate::models::{Ingredient, RecipeIngredientView};

/// Look up an ingredient by exact name, inserting it with no stock when it is
/// new. Takes a bare connection so `add_recipe` can call it inside its open
/// transaction.
pub(super) fn resolve_ingredient_with(conn: &Connection, name: &str) -> Result<i64> {
    if name.trim().is_empty() {
        return Err(anyhow!("Ingredient name is required."));
    }

    let existing = conn
        .query_row(
            "SELECT id FROM ingredients WHERE name = ?1",
            params![name],
            |row| row.get::<_, i64>(0),
        )
        .optional()
        .context("failed to look up ingredient")?;

    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute("INSERT INTO ingredients (name) VALUES (?1)", params![name])
        .context("failed to insert ingredient")?;
    let id = conn.last_insert_rowid();
    debug!(id, name, "created ingredient");
    Ok(id)
}

impl Store {
    /// Return the id for `name`, creating the ingredient on first use.
    /// Calling this twice with the same name yields the same id.
    pub fn resolve_ingredient(&self, name: &str) -> Result<i64> {
        resolve_ingredient_with(&self.conn, name)
    }

    /// Every ingredient with its stock, in insertion order. Feeds the
    /// materials table on the summary tab.
    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, stock_quantity FROM ingredients ORDER BY id")
            .context("failed to prepare ingredient query")?;

        let ingredients = stmt
            .query_map([], |row| {
                Ok(Ingredient {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    stock_quantity: row.get(2)?,
                })
            })
            .context("failed to iterate ingredients")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect ingredients")?;

        Ok(ingredients)
    }

    /// Ingredient lines for one recipe, in the order they were linked.
    /// Repeated names show up once per join row.
    pub fn ingredients_for_recipe(&self, recipe_id: i64) -> Result<Vec<RecipeIngredientView>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT i.id, i.name, ri.quantity
                 FROM recipe_ingredients ri
                 INNER JOIN ingredients i ON i.id = ri.ingredient_id
                 WHERE ri.recipe_id = ?1
                 ORDER BY ri.rowid",
            )
            .context("failed to prepare recipe ingredients query")?;

        let lines = stmt
            .query_map([recipe_id], |row| {
                Ok(RecipeIngredientView {
                    ingredient_id: row.get(0)?,
                    name: row.get(1)?,
                    quantity: row.get(2)?,
                })
            })
            .context("failed to iterate recipe ingredients")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect recipe ingredients")?;

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolving_twice_returns_the_same_id() {
        let store = Store::open_in_memory().unwrap();

        let first = store.resolve_ingredient("Basil").unwrap();
        let second = store.resolve_ingredient("Basil").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.list_ingredients().unwrap().len(), 1);
    }

    #[test]
    fn names_are_matched_exactly() {
        let store = Store::open_in_memory().unwrap();

        let lower = store.resolve_ingredient("basil").unwrap();
        let upper = store.resolve_ingredient("Basil").unwrap();

        assert_ne!(lower, upper);
    }

    #[test]
    fn new_ingredients_have_no_stock() {
        let store = Store::open_in_memory().unwrap();
        store.resolve_ingredient("Saffron").unwrap();

        let ingredients = store.list_ingredients().unwrap();
        assert_eq!(ingredients[0].name, "Saffron");
        assert_eq!(ingredients[0].stock_quantity, None);
    }

    #[test]
    fn existing_stock_is_preserved_on_reuse() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO ingredients (name, stock_quantity) VALUES ('Salt', '200 g')",
                [],
            )
            .unwrap();

        store.resolve_ingredient("Salt").unwrap();

        let ingredients = store.list_ingredients().unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].stock_quantity.as_deref(), Some("200 g"));
    }

    #[test]
    fn blank_names_are_rejected() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.resolve_ingredient("   ").is_err());
        assert!(store.list_ingredients().unwrap().is_empty());
    }
}
