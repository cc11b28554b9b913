use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use thiserror::Error;

use crate::models::{parse_ingredient_names, Difficulty, NewRecipe, ParseDifficultyError, User};

/// Highest rating a recipe or review may carry.
const MAX_RATING: f64 = 5.0;

/// Validation failures caught before anything reaches the store.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum FormError {
    #[error("Recipe name is required.")]
    MissingName,
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
    #[error("Rating must be a number (got '{0}').")]
    RatingNotNumeric(String),
    #[error("Rating must be between 0 and 5.")]
    RatingOutOfRange,
    #[error("No reviewer selected.")]
    MissingReviewer,
    #[error("Review rating must be a whole number from 1 to 5.")]
    ReviewRating,
}

/// Fields of the add-recipe form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum RecipeField {
    #[default]
    Name,
    Cuisine,
    DishType,
    PrepTime,
    Difficulty,
    Rating,
    Method,
    Ingredients,
}

impl RecipeField {
    pub(crate) const ALL: [RecipeField; 8] = [
        RecipeField::Name,
        RecipeField::Cuisine,
        RecipeField::DishType,
        RecipeField::PrepTime,
        RecipeField::Difficulty,
        RecipeField::Rating,
        RecipeField::Method,
        RecipeField::Ingredients,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            RecipeField::Name => "Recipe Name",
            RecipeField::Cuisine => "Cuisine",
            RecipeField::DishType => "Dish Type",
            RecipeField::PrepTime => "Preparation Time",
            RecipeField::Difficulty => "Difficulty",
            RecipeField::Rating => "Rating",
            RecipeField::Method => "Method",
            RecipeField::Ingredients => "Ingredients",
        }
    }

    /// Grey hint shown while the field is empty.
    fn placeholder(self) -> &'static str {
        match self {
            RecipeField::Name => "<required>",
            RecipeField::Difficulty => "Easy / Medium / Hard",
            RecipeField::Rating => "0-5",
            RecipeField::Ingredients => "comma separated",
            _ => "",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Input buffers for the add-recipe popup.
#[derive(Default, Clone)]
pub(crate) struct RecipeForm {
    pub(crate) name: String,
    pub(crate) cuisine: String,
    pub(crate) dish_type: String,
    pub(crate) prep_time: String,
    pub(crate) difficulty: String,
    pub(crate) rating: String,
    pub(crate) method: String,
    pub(crate) ingredients: String,
    pub(crate) active: RecipeField,
    pub(crate) error: Option<String>,
}

impl RecipeForm {
    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % RecipeField::ALL.len();
        self.active = RecipeField::ALL[idx];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = RecipeField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = RecipeField::ALL[idx];
    }

    fn buffer(&self, field: RecipeField) -> &String {
        match field {
            RecipeField::Name => &self.name,
            RecipeField::Cuisine => &self.cuisine,
            RecipeField::DishType => &self.dish_type,
            RecipeField::PrepTime => &self.prep_time,
            RecipeField::Difficulty => &self.difficulty,
            RecipeField::Rating => &self.rating,
            RecipeField::Method => &self.method,
            RecipeField::Ingredients => &self.ingredients,
        }
    }

    fn buffer_mut(&mut self, field: RecipeField) -> &mut String {
        match field {
            RecipeField::Name => &mut self.name,
            RecipeField::Cuisine => &mut self.cuisine,
            RecipeField::DishType => &mut self.dish_type,
            RecipeField::PrepTime => &mut self.prep_time,
            RecipeField::Difficulty => &mut self.difficulty,
            RecipeField::Rating => &mut self.rating,
            RecipeField::Method => &mut self.method,
            RecipeField::Ingredients => &mut self.ingredients,
        }
    }

    /// Append a character to the active field. The rating only takes digits
    /// and a decimal point; everything else takes any printable character.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = match self.active {
            RecipeField::Rating => ch.is_ascii_digit() || ch == '.',
            _ => !ch.is_control(),
        };
        if accepted {
            self.buffer_mut(self.active).push(ch);
        }
        accepted
    }

    /// Break the line in Method or Ingredients. Other fields stay single-line.
    pub(crate) fn insert_newline(&mut self) -> bool {
        match self.active {
            RecipeField::Method | RecipeField::Ingredients => {
                self.buffer_mut(self.active).push('\n');
                true
            }
            _ => false,
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.buffer_mut(self.active).pop();
    }

    pub(crate) fn value_len(&self, field: RecipeField) -> usize {
        self.buffer(field).chars().count()
    }

    /// Validate the buffers and turn them into a recipe ready for the store.
    /// A blank difficulty means Easy and a blank rating means 0.
    pub(crate) fn parse_inputs(&self) -> Result<NewRecipe, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let difficulty = match self.difficulty.trim() {
            "" => Difficulty::default(),
            raw => raw.parse::<Difficulty>()?,
        };

        let rating = match self.rating.trim() {
            "" => 0.0,
            raw => raw
                .parse::<f64>()
                .map_err(|_| FormError::RatingNotNumeric(raw.to_string()))?,
        };
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(FormError::RatingOutOfRange);
        }

        Ok(NewRecipe {
            name: name.to_string(),
            cuisine: self.cuisine.trim().to_string(),
            dish_type: self.dish_type.trim().to_string(),
            prep_time: self.prep_time.trim().to_string(),
            difficulty,
            method: self.method.trim().to_string(),
            rating,
            ingredients: parse_ingredient_names(&self.ingredients),
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: RecipeField) -> Line<'static> {
        let value = self.buffer(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            field.placeholder().to_string()
        } else {
            value.replace('\n', "↵")
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }
}

/// Fields of the add-review form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum ReviewField {
    #[default]
    Reviewer,
    Rating,
    Comment,
}

/// Input state for the add-review popup. The reviewer is picked from the
/// existing users rather than typed.
#[derive(Clone)]
pub(crate) struct ReviewForm {
    pub(crate) users: Vec<User>,
    pub(crate) user_index: usize,
    pub(crate) rating: String,
    pub(crate) comment: String,
    pub(crate) active: ReviewField,
    pub(crate) error: Option<String>,
}

impl ReviewForm {
    pub(crate) fn new(users: Vec<User>) -> Self {
        Self {
            users,
            user_index: 0,
            rating: String::new(),
            comment: String::new(),
            active: ReviewField::default(),
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            ReviewField::Reviewer => ReviewField::Rating,
            ReviewField::Rating => ReviewField::Comment,
            ReviewField::Comment => ReviewField::Reviewer,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            ReviewField::Reviewer => ReviewField::Comment,
            ReviewField::Rating => ReviewField::Reviewer,
            ReviewField::Comment => ReviewField::Rating,
        };
    }

    /// Step through the user list, wrapping at both ends.
    pub(crate) fn cycle_user(&mut self, offset: isize) {
        if self.users.is_empty() {
            return;
        }
        let len = self.users.len() as isize;
        self.user_index = (self.user_index as isize + offset).rem_euclid(len) as usize;
    }

    pub(crate) fn selected_user(&self) -> Option<&User> {
        self.users.get(self.user_index)
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            ReviewField::Reviewer => false,
            ReviewField::Rating => {
                if ch.is_ascii_digit() {
                    self.rating.push(ch);
                    true
                } else {
                    false
                }
            }
            ReviewField::Comment => {
                if !ch.is_control() {
                    self.comment.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ReviewField::Reviewer => {}
            ReviewField::Rating => {
                self.rating.pop();
            }
            ReviewField::Comment => {
                self.comment.pop();
            }
        }
    }

    /// Return `(user_id, rating, comment)`.
    pub(crate) fn parse_inputs(&self) -> Result<(i64, i64, String), FormError> {
        let user = self.selected_user().ok_or(FormError::MissingReviewer)?;
        let rating = self
            .rating
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::ReviewRating)?;
        if !(1..=MAX_RATING as i64).contains(&rating) {
            return Err(FormError::ReviewRating);
        }
        Ok((user.id, rating, self.comment.trim().to_string()))
    }

    pub(crate) fn build_line(&self, field: ReviewField) -> Line<'static> {
        let is_active = self.active == field;
        let (label, value) = match field {
            ReviewField::Reviewer => (
                "Reviewer",
                self.selected_user()
                    .map(|user| format!("< {} >", user.name))
                    .unwrap_or_default(),
            ),
            ReviewField::Rating => ("Rating", self.rating.clone()),
            ReviewField::Comment => ("Comment", self.comment.clone()),
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(value, style),
        ])
    }

    pub(crate) fn value_len(&self, field: ReviewField) -> usize {
        match field {
            ReviewField::Reviewer => 0,
            ReviewField::Rating => self.rating.chars().count(),
            ReviewField::Comment => self.comment.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut RecipeForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn filled_form_becomes_a_recipe() {
        let mut form = RecipeForm::default();
        type_into(&mut form, "Test Soup");
        form.next_field();
        type_into(&mut form, "Fusion");
        form.active = RecipeField::Difficulty;
        type_into(&mut form, "hard");
        form.active = RecipeField::Rating;
        type_into(&mut form, "4.5");
        form.active = RecipeField::Method;
        type_into(&mut form, "Boil it.");
        form.active = RecipeField::Ingredients;
        type_into(&mut form, "Salt, Salt, Pepper");

        let recipe = form.parse_inputs().unwrap();

        assert_eq!(recipe.name, "Test Soup");
        assert_eq!(recipe.cuisine, "Fusion");
        assert_eq!(recipe.difficulty, Difficulty::Hard);
        assert_eq!(recipe.rating, 4.5);
        assert_eq!(recipe.method, "Boil it.");
        assert_eq!(recipe.ingredients, vec!["Salt", "Salt", "Pepper"]);
    }

    #[test]
    fn blank_optional_fields_fall_back_to_defaults() {
        let form = RecipeForm {
            name: "Toast".into(),
            ..RecipeForm::default()
        };

        let recipe = form.parse_inputs().unwrap();

        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.rating, 0.0);
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn missing_name_is_reported() {
        let form = RecipeForm {
            name: "   ".into(),
            ..RecipeForm::default()
        };
        assert_eq!(form.parse_inputs(), Err(FormError::MissingName));
    }

    #[test]
    fn rating_field_ignores_letters() {
        let mut form = RecipeForm {
            active: RecipeField::Rating,
            ..RecipeForm::default()
        };
        assert!(!form.push_char('x'));
        assert!(form.push_char('4'));
        assert_eq!(form.rating, "4");
    }

    #[test]
    fn malformed_ratings_are_rejected() {
        let mut form = RecipeForm {
            name: "Cake".into(),
            rating: "4..5".into(),
            ..RecipeForm::default()
        };
        assert_eq!(
            form.parse_inputs(),
            Err(FormError::RatingNotNumeric("4..5".into()))
        );

        form.rating = "7".into();
        assert_eq!(form.parse_inputs(), Err(FormError::RatingOutOfRange));
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let form = RecipeForm {
            name: "Cake".into(),
            difficulty: "Extreme".into(),
            ..RecipeForm::default()
        };
        assert!(matches!(form.parse_inputs(), Err(FormError::Difficulty(_))));
    }

    #[test]
    fn field_order_wraps_both_ways() {
        let mut form = RecipeForm::default();
        form.previous_field();
        assert_eq!(form.active, RecipeField::Ingredients);
        form.next_field();
        assert_eq!(form.active, RecipeField::Name);
    }

    fn users() -> Vec<User> {
        vec![
            User {
                id: 10,
                name: "Alice".into(),
                dietary_pref: "Vegetarian".into(),
            },
            User {
                id: 20,
                name: "Bob".into(),
                dietary_pref: "Vegan".into(),
            },
        ]
    }

    #[test]
    fn review_form_cycles_users_and_validates_rating() {
        let mut form = ReviewForm::new(users());
        form.cycle_user(-1);
        assert_eq!(form.selected_user().map(|u| u.id), Some(20));

        form.next_field();
        form.push_char('9');
        assert_eq!(form.parse_inputs(), Err(FormError::ReviewRating));

        form.backspace();
        form.push_char('4');
        form.next_field();
        for ch in "Lovely ".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.parse_inputs(), Ok((20, 4, "Lovely".to_string())));
    }

    #[test]
    fn review_form_without_users_cannot_submit() {
        let form = ReviewForm {
            rating: "5".into(),
            ..ReviewForm::new(Vec::new())
        };
        assert_eq!(form.parse_inputs(), Err(FormError::MissingReviewer));
    }

    #[test]
    fn line_breaks_only_go_into_multiline_fields() {
        let mut form = RecipeForm {
            name: "Salad".into(),
            ..RecipeForm::default()
        };
        assert!(!form.insert_newline());
        assert_eq!(form.name, "Salad");

        form.active = RecipeField::Ingredients;
        type_into(&mut form, "Lettuce");
        assert!(form.insert_newline());
        type_into(&mut form, "Tomato, Basil");

        let recipe = form.parse_inputs().unwrap();
        assert_eq!(recipe.ingredients, vec!["Lettuce", "Tomato", "Basil"]);

        let rendered: String = form
            .build_line(RecipeField::Ingredients)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(rendered, "Ingredients: Lettuce↵Tomato, Basil");
        assert_eq!(form.value_len(RecipeField::Ingredients), 21);
    }
}
