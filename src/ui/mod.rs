//! Ratatui front-end: a recipe list with live search, a summary tab with
//! ingredient stock, and popups for adding recipes and reviews.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
