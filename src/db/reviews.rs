use anyhow::{Context, Result};
use rusqlite::params;
use tracing::info;

use super::Store;
use crate::models::ReviewView;

impl Store {
    /// Record a review. Neither id is checked: the foreign keys are advisory,
    /// so a review for a missing recipe or user is stored as given.
    pub fn add_review(
        &self,
        user_id: i64,
        recipe_id: i64,
        rating: i64,
        comment: &str,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO reviews (recipe_id, user_id, rating, comment) VALUES (?1, ?2, ?3, ?4)",
                params![recipe_id, user_id, rating, comment],
            )
            .context("failed to insert review")?;
        let id = self.conn.last_insert_rowid();
        info!(review_id = id, recipe_id, user_id, rating, "added review");
        Ok(id)
    }

    /// Reviews for one recipe, oldest first, with the reviewer's name when the
    /// user row exists.
    pub fn reviews_for_recipe(&self, recipe_id: i64) -> Result<Vec<ReviewView>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT r.id, r.user_id, u.name, r.rating, r.comment
                 FROM reviews r
                 LEFT JOIN users u ON u.id = r.user_id
                 WHERE r.recipe_id = ?1
                 ORDER BY r.id",
            )
            .context("failed to prepare review query")?;

        let reviews = stmt
            .query_map([recipe_id], |row| {
                Ok(ReviewView {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    reviewer: row.get(2)?,
                    rating: row.get(3)?,
                    comment: row.get(4)?,
                })
            })
            .context("failed to iterate reviews")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect reviews")?;

        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NewRecipe};

    #[test]
    fn reviews_are_listed_with_reviewer_names() {
        let mut store = Store::open_in_memory().unwrap();
        let user = store.add_user("Charlie", "Non-Vegetarian").unwrap();
        let recipe = store
            .add_recipe(&NewRecipe::new(
                "Garlic Chicken",
                "Continental",
                Difficulty::Medium,
                "",
                ["Garlic"],
            ))
            .unwrap();

        store.add_review(user, recipe, 5, "Great!").unwrap();
        store.add_review(user, recipe, 3, "Too salty").unwrap();

        let reviews = store.reviews_for_recipe(recipe).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].reviewer.as_deref(), Some("Charlie"));
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[1].comment, "Too salty");
    }

    #[test]
    fn dangling_references_are_accepted() {
        let store = Store::open_in_memory().unwrap();

        store.add_review(77, 404, 4, "Where did this go?").unwrap();

        let reviews = store.reviews_for_recipe(404).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].reviewer, None);
        assert_eq!(reviews[0].user_id, 77);
    }
}
