//! Domain models that mirror the SQLite schema and get passed between the
//! store and the TUI. These stay light-weight data holders; the only logic
//! here is parsing the difficulty tier and splitting the free-text ingredient
//! list the add-recipe form hands over.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use thiserror::Error;

/// Difficulty tier attached to every recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Difficulty must be Easy, Medium or Hard (got '{0}').")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Case-insensitive so the form accepts `easy` as readily as `Easy`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDifficultyError(trimmed.to_string()))
    }
}

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// Blank text decodes to the default tier. Stores created before the
/// `CHECK` on the column may still hold `''`.
impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()?.trim() {
            "" => Ok(Difficulty::default()),
            raw => raw
                .parse()
                .map_err(|err| FromSqlError::Other(Box::new(err))),
        }
    }
}

/// A person who can leave reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Primary key; reviews point back at it.
    pub id: i64,
    /// Name shown as the reviewer.
    pub name: String,
    /// Free-text tag such as "Vegan".
    pub dietary_pref: String,
}

/// Full recipe row, used by the detail popup and the summary tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Primary key from the SQLite store. Also the list order.
    pub id: i64,
    /// Display name, matched by the search bar.
    pub name: String,
    /// Cuisine label such as "Italian". May be blank.
    pub cuisine: String,
    /// Course label such as "Main Course". May be blank.
    pub dish_type: String,
    /// Preparation time as entered, e.g. "25 mins". Not parsed.
    pub prep_time: String,
    pub difficulty: Difficulty,
    /// Cooking instructions; may span several lines.
    pub method: String,
    /// Author-entered score; never derived from reviews.
    pub rating: f64,
}

/// Columns shown in the recipe list. Omits the method text, which can be
/// long and is only needed when drilling into a single recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    /// Primary key, used to open the detail popup.
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub dish_type: String,
    pub prep_time: String,
    pub difficulty: Difficulty,
    /// Same author-entered score as [`Recipe::rating`].
    pub rating: f64,
}

/// Ingredient row together with the stock on hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    /// Primary key referenced by `recipe_ingredients`.
    pub id: i64,
    /// Unique, case-sensitive name. "Salt" and "salt" are two ingredients.
    pub name: String,
    /// Stock as free text ("200 g"). `None` for ingredients created by
    /// adding a recipe.
    pub stock_quantity: Option<String>,
}

/// One line of a recipe's ingredient list, resolved through the join table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredientView {
    pub ingredient_id: i64,
    /// Ingredient name from the `ingredients` table.
    pub name: String,
    /// Per-recipe amount such as "2 cups". Recipes added through the form
    /// leave it empty.
    pub quantity: Option<String>,
}

/// Review joined with the reviewer's name. The name is optional because
/// reviews may point at users that no longer (or never did) exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    /// Primary key of the review row.
    pub id: i64,
    /// Reviewer id as stored, even when no such user exists.
    pub user_id: i64,
    /// Reviewer's name, or `None` when `user_id` is dangling.
    pub reviewer: Option<String>,
    /// Whole-star score. The form limits it to 1..=5; the store does not.
    pub rating: i64,
    pub comment: String,
}

/// Everything needed to insert a recipe and link its ingredients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRecipe {
    /// Required; the store rejects a blank name.
    pub name: String,
    pub cuisine: String,
    pub dish_type: String,
    pub prep_time: String,
    pub difficulty: Difficulty,
    pub method: String,
    /// Stored as given. The form keeps it within 0..=5.
    pub rating: f64,
    /// Ingredient names in display order. Repeats are kept and each one
    /// produces its own join row.
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    /// Build the minimal recipe shape: name, cuisine, difficulty, method and
    /// ingredients. Dish type, prep time and rating start empty.
    pub fn new<I, S>(
        name: &str,
        cuisine: &str,
        difficulty: Difficulty,
        instructions: &str,
        ingredients: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            difficulty,
            method: instructions.to_string(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Split a comma- or newline-delimited ingredient list into trimmed names.
/// Blank entries are dropped; order and repeats are preserved.
pub fn parse_ingredient_names(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
