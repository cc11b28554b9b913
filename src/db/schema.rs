use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Every table the application owns, in dependency order. The diagnostic
/// dump walks this list too, so keep it aligned with the DDL below.
pub const TABLES: [&str; 5] = [
    "users",
    "recipes",
    "ingredients",
    "recipe_ingredients",
    "reviews",
];

/// Create any missing tables. Existing tables and rows are left untouched, so
/// this runs on every startup as well as after the demo reset.
///
/// Foreign keys are declared but not enforced. The bundled SQLite build turns
/// enforcement on by default, so it is switched off here for the connection:
/// a review pointing at a missing recipe is stored as-is.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = OFF", [])
        .context("failed to disable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            dietary_pref TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .context("failed to create users table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            cuisine TEXT NOT NULL DEFAULT '',
            dish_type TEXT NOT NULL DEFAULT '',
            prep_time TEXT NOT NULL DEFAULT '',
            difficulty TEXT NOT NULL DEFAULT 'Easy'
                CHECK (difficulty IN ('Easy', 'Medium', 'Hard')),
            method TEXT NOT NULL DEFAULT '',
            rating REAL NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("failed to create recipes table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            stock_quantity TEXT
        )",
        [],
    )
    .context("failed to create ingredients table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS recipe_ingredients (
            recipe_id INTEGER NOT NULL,
            ingredient_id INTEGER NOT NULL,
            quantity TEXT,
            FOREIGN KEY(recipe_id) REFERENCES recipes(id),
            FOREIGN KEY(ingredient_id) REFERENCES ingredients(id)
        )",
        [],
    )
    .context("failed to create recipe_ingredients table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT NOT NULL DEFAULT '',
            FOREIGN KEY(recipe_id) REFERENCES recipes(id),
            FOREIGN KEY(user_id) REFERENCES users(id)
        )",
        [],
    )
    .context("failed to create reviews table")?;

    debug!("schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_tables(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn creates_the_five_tables() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        let mut expected: Vec<String> = TABLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(user_tables(&conn), expected);
    }

    #[test]
    fn rerunning_keeps_tables_and_rows() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO ingredients (name, stock_quantity) VALUES ('Salt', '200 g')",
            [],
        )
        .unwrap();

        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        assert_eq!(user_tables(&conn).len(), 5);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn foreign_keys_are_not_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (999, 999)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn dangling_review_is_stored() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO reviews (recipe_id, user_id, rating, comment) VALUES (42, 7, 5, 'ghost')",
            [],
        )
        .unwrap();

        let enforced: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enforced, 0);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        let err = conn
            .execute(
                "INSERT INTO recipes (name, difficulty) VALUES ('Odd', 'Impossible')",
                [],
            )
            .unwrap_err();
        assert!(err.to_string().contains("CHECK constraint failed"));

        conn.execute("INSERT INTO recipes (name) VALUES ('Plain')", [])
            .unwrap();
        let difficulty: String = conn
            .query_row("SELECT difficulty FROM recipes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(difficulty, "Easy");
    }
}
