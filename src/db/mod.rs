//! Persistence layer split across logical submodules. `Store` owns the
//! SQLite connection; each entity file adds its operations to it.

mod connection;
mod demo;
mod dump;
mod ingredients;
mod recipes;
mod reviews;
mod schema;
mod users;

pub use connection::{default_db_path, Store};
pub use demo::{DemoRecipe, DemoReview, DemoRows};
pub use schema::{ensure_schema, TABLES};
