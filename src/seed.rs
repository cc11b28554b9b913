//! Demo catalog used to show the application off. Resetting deletes the
//! store file, so this only ever runs when the user asks for it with
//! `--demo`; normal startup goes through `Store::open` alone.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{info, warn};

use crate::db::{DemoRecipe, DemoReview, DemoRows, Store};
use crate::models::{Difficulty, NewRecipe};

/// Number of randomly generated filler recipes added after the curated ones.
pub const FILLER_RECIPES: usize = 45;

const USERS: [(&str, &str); 3] = [
    ("Alice", "Vegetarian"),
    ("Bob", "Vegan"),
    ("Charlie", "Non-Vegetarian"),
];

const INGREDIENTS: [(&str, &str); 18] = [
    ("Tomato", "120 pcs"),
    ("Onion", "80 pcs"),
    ("Garlic", "50 cloves"),
    ("Chicken", "30 kg"),
    ("Basil", "40 g"),
    ("Pasta", "60 packs"),
    ("Paneer", "25 blocks"),
    ("Spinach", "45 bundles"),
    ("Olive Oil", "100 ml"),
    ("Salt", "200 g"),
    ("Pepper", "90 g"),
    ("Chili Powder", "70 g"),
    ("Sugar", "150 g"),
    ("Flour", "1000 g"),
    ("Butter", "300 g"),
    ("Milk", "5 L"),
    ("Eggs", "60 pcs"),
    ("Cocoa Powder", "100 g"),
];

/// Hand-written recipes: name, cuisine, dish type, prep time, difficulty,
/// method, rating, then `(ingredient, quantity)` lines.
type Curated = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Difficulty,
    &'static str,
    f64,
    &'static [(&'static str, &'static str)],
);

const CURATED: [Curated; 5] = [
    (
        "Spaghetti Pomodoro",
        "Italian",
        "Main Course",
        "30 mins",
        Difficulty::Easy,
        "Boil pasta. Make tomato sauce with garlic, basil, and olive oil. Mix and serve.",
        4.5,
        &[
            ("Pasta", "200 g"),
            ("Tomato", "4 pcs"),
            ("Garlic", "3 cloves"),
            ("Basil", "10 g"),
            ("Olive Oil", "30 ml"),
            ("Salt", "to taste"),
        ],
    ),
    (
        "Palak Paneer",
        "Indian",
        "Main Course",
        "40 mins",
        Difficulty::Medium,
        "Blend spinach. Fry paneer. Mix with spices and spinach puree.",
        4.3,
        &[
            ("Spinach", "2 bundles"),
            ("Paneer", "1 block"),
            ("Onion", "1 pcs"),
            ("Garlic", "4 cloves"),
            ("Chili Powder", "5 g"),
            ("Salt", "to taste"),
        ],
    ),
    (
        "Garlic Chicken",
        "Continental",
        "Main Course",
        "45 mins",
        Difficulty::Medium,
        "Marinate chicken in garlic and spices. Grill until cooked.",
        4.7,
        &[
            ("Chicken", "1 kg"),
            ("Garlic", "6 cloves"),
            ("Pepper", "5 g"),
            ("Olive Oil", "20 ml"),
            ("Salt", "to taste"),
        ],
    ),
    (
        "Chocolate Cake",
        "French",
        "Dessert",
        "60 mins",
        Difficulty::Medium,
        "Mix flour, sugar, cocoa, eggs, milk and bake.",
        4.8,
        &[
            ("Flour", "250 g"),
            ("Sugar", "200 g"),
            ("Cocoa Powder", "50 g"),
            ("Eggs", "3 pcs"),
            ("Milk", "250 ml"),
            ("Butter", "100 g"),
        ],
    ),
    (
        "Bruschetta",
        "Italian",
        "Starter",
        "15 mins",
        Difficulty::Easy,
        "Toast bread, top with tomato, basil, olive oil.",
        4.2,
        &[
            ("Tomato", "3 pcs"),
            ("Basil", "5 g"),
            ("Olive Oil", "15 ml"),
            ("Garlic", "1 clove"),
        ],
    ),
];

const DISH_NAMES: [&str; 26] = [
    "Lemon Herb Quinoa",
    "Mango Chutney Tofu",
    "Creamy Broccoli Soup",
    "Grilled Zucchini Rolls",
    "Spicy Chickpea Wraps",
    "Avocado Lime Salad",
    "Stuffed Bell Peppers",
    "Thai Peanut Noodles",
    "Baked Falafel Pockets",
    "Mushroom Risotto",
    "Tomato Basil Tart",
    "Sweet Potato Curry",
    "Eggplant Parmesan",
    "Pumpkin Lentil Soup",
    "Garlic Butter Shrimp",
    "Coconut Rice Bowl",
    "Pesto Pasta Delight",
    "Zesty Black Bean Tacos",
    "Green Curry Vegetables",
    "Cheesy Cauliflower Bake",
    "Honey Glazed Carrots",
    "Kale Cranberry Salad",
    "Tofu Stir Fry",
    "Beetroot Hummus Wraps",
    "Peanut Butter Banana Toast",
    "Almond Berry Smoothie",
];

const CUISINES: [&str; 7] = [
    "Indian", "Italian", "Mexican", "Thai", "Chinese", "Greek", "Fusion",
];

/// `(user index, curated recipe index, rating, comment)`
const REVIEWS: [(usize, usize, i64, &str); 4] = [
    (0, 0, 5, "Simple and fresh, my weeknight go-to."),
    (1, 4, 4, "Great starter, skipped the cheese."),
    (2, 2, 5, "Juicy and full of flavour."),
    (0, 3, 4, "Rich but a little dense."),
];

/// Build the demo catalog. The curated part is fixed; the filler recipes
/// draw name, cuisine, difficulty and rating from `rng`.
pub fn demo_rows<R: Rng>(rng: &mut R) -> DemoRows {
    let users = USERS
        .iter()
        .map(|(name, pref)| (name.to_string(), pref.to_string()))
        .collect();

    let ingredients = INGREDIENTS
        .iter()
        .map(|(name, stock)| (name.to_string(), stock.to_string()))
        .collect();

    let mut recipes: Vec<DemoRecipe> = CURATED
        .iter()
        .map(
            |&(name, cuisine, dish_type, prep_time, difficulty, method, rating, lines)| {
                DemoRecipe {
                    recipe: NewRecipe {
                        name: name.to_string(),
                        cuisine: cuisine.to_string(),
                        dish_type: dish_type.to_string(),
                        prep_time: prep_time.to_string(),
                        difficulty,
                        method: method.to_string(),
                        rating,
                        ingredients: lines.iter().map(|(item, _)| item.to_string()).collect(),
                    },
                    quantities: lines.iter().map(|(_, qty)| Some(qty.to_string())).collect(),
                }
            },
        )
        .collect();

    for _ in 0..FILLER_RECIPES {
        let name = DISH_NAMES[rng.gen_range(0..DISH_NAMES.len())];
        let cuisine = CUISINES[rng.gen_range(0..CUISINES.len())];
        let difficulty = Difficulty::ALL[rng.gen_range(0..Difficulty::ALL.len())];
        let rating = (rng.gen_range(3.5..=4.9_f64) * 10.0).round() / 10.0;
        recipes.push(DemoRecipe {
            recipe: NewRecipe {
                name: name.to_string(),
                cuisine: cuisine.to_string(),
                dish_type: "Main Course".to_string(),
                prep_time: "25 mins".to_string(),
                difficulty,
                method: format!(
                    "This is how you make {name}. Follow the traditional steps for a delicious result."
                ),
                rating,
                ingredients: Vec::new(),
            },
            quantities: Vec::new(),
        });
    }

    let reviews = REVIEWS
        .iter()
        .map(|&(user, recipe, rating, comment)| DemoReview {
            user,
            recipe,
            rating,
            comment: comment.to_string(),
        })
        .collect();

    DemoRows {
        users,
        ingredients,
        recipes,
        reviews,
    }
}

/// Delete the store at `path`, recreate it through the normal schema path,
/// and fill it with the demo catalog.
pub fn reset_and_seed<R: Rng>(path: &Path, rng: &mut R) -> Result<Store> {
    match fs::remove_file(path) {
        Ok(()) => warn!(path = %path.display(), "removed existing store for demo reset"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to remove {} before seeding", path.display()))
        }
    }

    let mut store = Store::open(path)?;
    store.insert_demo_rows(&demo_rows(rng))?;
    info!(path = %path.display(), "seeded demo catalog");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn count(store: &Store, table: &str) -> i64 {
        store
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    #[test]
    fn seeded_store_has_the_expected_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.sqlite");
        let mut rng = Pcg64::seed_from_u64(7);

        let store = reset_and_seed(&path, &mut rng).unwrap();

        assert_eq!(count(&store, "users"), 3);
        assert_eq!(count(&store, "ingredients"), 18);
        assert_eq!(count(&store, "recipes"), 50);
        assert_eq!(count(&store, "reviews"), 4);
    }

    #[test]
    fn reset_discards_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.sqlite");
        {
            let mut store = Store::open(&path).unwrap();
            store
                .add_recipe(&NewRecipe::new(
                    "Leftovers",
                    "",
                    Difficulty::Easy,
                    "",
                    ["Saffron"],
                ))
                .unwrap();
        }

        let store = reset_and_seed(&path, &mut Pcg64::seed_from_u64(1)).unwrap();

        assert!(store.list_recipes(Some("Leftovers")).unwrap().is_empty());
        assert_eq!(count(&store, "ingredients"), 18);
    }

    #[test]
    fn same_seed_gives_same_catalog() {
        let mut first = Store::open_in_memory().unwrap();
        let mut second = Store::open_in_memory().unwrap();

        first
            .insert_demo_rows(&demo_rows(&mut Pcg64::seed_from_u64(42)))
            .unwrap();
        second
            .insert_demo_rows(&demo_rows(&mut Pcg64::seed_from_u64(42)))
            .unwrap();

        assert_eq!(
            first.list_recipes(None).unwrap(),
            second.list_recipes(None).unwrap()
        );
    }

    #[test]
    fn filler_ratings_stay_in_range() {
        let rows = demo_rows(&mut Pcg64::seed_from_u64(3));
        for demo in &rows.recipes[CURATED.len()..] {
            let rating = demo.recipe.rating;
            assert!((3.5..=4.9).contains(&rating), "rating {rating} out of range");
            assert_eq!(rating, (rating * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn curated_recipes_link_their_ingredients() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_demo_rows(&demo_rows(&mut Pcg64::seed_from_u64(0)))
            .unwrap();

        let cake = store.ingredients_for_recipe(4).unwrap();
        assert_eq!(cake.len(), 6);
        assert_eq!(cake[0].name, "Flour");
        assert_eq!(cake[0].quantity.as_deref(), Some("250 g"));
        assert_eq!(store.list_ingredients().unwrap().len(), 18);
    }
}
