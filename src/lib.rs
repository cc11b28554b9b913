//! Core library surface for the Recipe Portal TUI application.
//!
//! The store lives in `db`, the demo catalog in `seed`, and the terminal
//! front-end in `ui`. The binary only wires these together.
pub mod cli;
pub mod db;
pub mod logging;
pub mod models;
pub mod seed;
pub mod ui;

/// Convenience re-exports for the persistence layer.
pub use db::{default_db_path, ensure_schema, Store};

/// Domain types that other layers manipulate.
pub use models::{
    parse_ingredient_names, Difficulty, Ingredient, NewRecipe, Recipe, RecipeSummary, User,
};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
