use anyhow::{Context, Result};

use crate::db::Store;
use crate::models::{Ingredient, Recipe, RecipeIngredientView, RecipeSummary, ReviewView};

/// Clamp `selected + offset` into `0..len`.
fn step(selected: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (selected as isize + offset).clamp(0, len as isize - 1) as usize
}

/// Recipe table on the first tab plus the active name filter.
pub(crate) struct RecipeListScreen {
    pub(crate) recipes: Vec<RecipeSummary>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl RecipeListScreen {
    pub(crate) fn load(store: &Store) -> Result<Self> {
        Ok(Self {
            recipes: store.list_recipes(None)?,
            filter: None,
            selected: 0,
        })
    }

    /// Re-run the query with the current filter. Called on every keystroke
    /// in the search bar as well as after inserts.
    pub(crate) fn refresh(&mut self, store: &Store) -> Result<()> {
        self.recipes = store
            .list_recipes(self.filter.as_deref())
            .context("failed to refresh recipe list")?;
        self.ensure_in_bounds();
        Ok(())
    }

    pub(crate) fn set_filter(&mut self, store: &Store, filter: Option<String>) -> Result<()> {
        self.filter = filter.filter(|f| !f.is_empty());
        self.selected = 0;
        self.refresh(store)
    }

    pub(crate) fn current_recipe(&self) -> Option<&RecipeSummary> {
        self.recipes.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.recipes.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.recipes.len().saturating_sub(1);
    }

    /// Move the cursor onto `id` if it is in the current result set.
    pub(crate) fn focus(&mut self, id: i64) -> bool {
        match self.recipes.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.selected >= self.recipes.len() {
            self.selected = self.recipes.len().saturating_sub(1);
        }
    }
}

/// Which half of the summary tab has the cursor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum SummaryPane {
    Recipes,
    Materials,
}

/// Recipe overview and ingredient stock shown on the second tab.
pub(crate) struct SummaryScreen {
    pub(crate) recipes: Vec<Recipe>,
    pub(crate) ingredients: Vec<Ingredient>,
    pub(crate) pane: SummaryPane,
    pub(crate) recipe_selected: usize,
    pub(crate) ingredient_selected: usize,
}

impl SummaryScreen {
    pub(crate) fn load(store: &Store) -> Result<Self> {
        Ok(Self {
            recipes: store.list_recipe_details()?,
            ingredients: store.list_ingredients()?,
            pane: SummaryPane::Recipes,
            recipe_selected: 0,
            ingredient_selected: 0,
        })
    }

    pub(crate) fn refresh(&mut self, store: &Store) -> Result<()> {
        self.recipes = store.list_recipe_details()?;
        self.ingredients = store.list_ingredients()?;
        self.recipe_selected = step(self.recipe_selected, 0, self.recipes.len());
        self.ingredient_selected = step(self.ingredient_selected, 0, self.ingredients.len());
        Ok(())
    }

    pub(crate) fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            SummaryPane::Recipes => SummaryPane::Materials,
            SummaryPane::Materials => SummaryPane::Recipes,
        };
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        match self.pane {
            SummaryPane::Recipes => {
                self.recipe_selected = step(self.recipe_selected, offset, self.recipes.len())
            }
            SummaryPane::Materials => {
                self.ingredient_selected =
                    step(self.ingredient_selected, offset, self.ingredients.len())
            }
        }
    }

    pub(crate) fn select_first(&mut self) {
        match self.pane {
            SummaryPane::Recipes => self.recipe_selected = 0,
            SummaryPane::Materials => self.ingredient_selected = 0,
        }
    }

    pub(crate) fn select_last(&mut self) {
        match self.pane {
            SummaryPane::Recipes => self.recipe_selected = self.recipes.len().saturating_sub(1),
            SummaryPane::Materials => {
                self.ingredient_selected = self.ingredients.len().saturating_sub(1)
            }
        }
    }
}

/// Everything the detail popup shows for one recipe.
#[derive(Clone)]
pub(crate) struct RecipeDetail {
    pub(crate) recipe: Recipe,
    pub(crate) ingredients: Vec<RecipeIngredientView>,
    pub(crate) reviews: Vec<ReviewView>,
    pub(crate) scroll: u16,
}

impl RecipeDetail {
    pub(crate) fn load(store: &Store, recipe_id: i64) -> Result<Self> {
        Ok(Self {
            recipe: store.get_recipe_detail(recipe_id)?,
            ingredients: store.ingredients_for_recipe(recipe_id)?,
            reviews: store.reviews_for_recipe(recipe_id)?,
            scroll: 0,
        })
    }

    /// Scroll by `offset` lines, keeping the top line within `0..=last_line`.
    pub(crate) fn scroll_by(&mut self, offset: i32, last_line: usize) {
        let last_line = last_line.min(u16::MAX as usize) as i32;
        self.scroll = (self.scroll as i32 + offset).clamp(0, last_line) as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NewRecipe};

    fn store_with(names: &[&str]) -> Store {
        let mut store = Store::open_in_memory().unwrap();
        for name in names {
            store
                .add_recipe(&NewRecipe::new(name, "", Difficulty::Easy, "", ["Salt"]))
                .unwrap();
        }
        store
    }

    #[test]
    fn selection_is_clamped() {
        let store = store_with(&["A", "B", "C"]);
        let mut screen = RecipeListScreen::load(&store).unwrap();

        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
        screen.move_selection(-10);
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn filter_narrows_and_clears() {
        let store = store_with(&["Pesto Pasta", "Tofu Stir Fry", "Pasta Bake"]);
        let mut screen = RecipeListScreen::load(&store).unwrap();

        screen
            .set_filter(&store, Some("Pasta".to_string()))
            .unwrap();
        assert_eq!(screen.recipes.len(), 2);

        screen.set_filter(&store, Some(String::new())).unwrap();
        assert_eq!(screen.filter, None);
        assert_eq!(screen.recipes.len(), 3);
    }

    #[test]
    fn focus_finds_recipe_by_id() {
        let store = store_with(&["A", "B", "C"]);
        let mut screen = RecipeListScreen::load(&store).unwrap();
        let id = screen.recipes[2].id;

        assert!(screen.focus(id));
        assert_eq!(screen.selected, 2);
        assert!(!screen.focus(999));
    }

    #[test]
    fn summary_panes_move_independently() {
        let store = store_with(&["A", "B"]);
        store.resolve_ingredient("Pepper").unwrap();
        let mut summary = SummaryScreen::load(&store).unwrap();

        summary.move_selection(1);
        summary.toggle_pane();
        summary.select_last();

        assert_eq!(summary.recipe_selected, 1);
        assert_eq!(summary.ingredient_selected, 1);
        assert_eq!(summary.pane, SummaryPane::Materials);
    }

    #[test]
    fn detail_collects_ingredients_and_reviews() {
        let store = store_with(&["Soup"]);
        let user = store.add_user("Bob", "Vegan").unwrap();
        store.add_review(user, 1, 4, "Nice").unwrap();

        let detail = RecipeDetail::load(&store, 1).unwrap();

        assert_eq!(detail.recipe.name, "Soup");
        assert_eq!(detail.ingredients.len(), 1);
        assert_eq!(detail.reviews.len(), 1);
    }

    #[test]
    fn detail_scroll_is_bounded() {
        let store = store_with(&["Soup"]);
        let mut detail = RecipeDetail::load(&store, 1).unwrap();

        detail.scroll_by(50, 8);
        assert_eq!(detail.scroll, 8);
        detail.scroll_by(-3, 8);
        assert_eq!(detail.scroll, 5);
        detail.scroll_by(-10, 8);
        assert_eq!(detail.scroll, 0);
    }
}
