use std::io::Write;

use anyhow::{Context, Result};
use rusqlite::types::ValueRef;

use super::schema::TABLES;
use super::Store;

impl Store {
    /// Print every table as a header followed by one tuple per row. Meant for
    /// eyeballing the store from the command line, not for parsing.
    pub fn dump_tables<W: Write>(&self, out: &mut W) -> Result<()> {
        for table in TABLES {
            writeln!(out, "\n--- {} ---", table.to_uppercase()).context("failed to write dump")?;

            let mut stmt = self
                .conn
                .prepare(&format!("SELECT * FROM {table}"))
                .with_context(|| format!("failed to prepare dump of {table}"))?;
            let columns = stmt.column_count();
            let mut rows = stmt
                .query([])
                .with_context(|| format!("failed to query {table}"))?;

            while let Some(row) = rows.next().context("failed to fetch dump row")? {
                let mut cells = Vec::with_capacity(columns);
                for idx in 0..columns {
                    let value = row.get_ref(idx).context("failed to read dump cell")?;
                    cells.push(render_value(value));
                }
                writeln!(out, "({})", cells.join(", ")).context("failed to write dump")?;
            }
        }
        Ok(())
    }
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => format!("'{}'", String::from_utf8_lossy(bytes)),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, NewRecipe};

    #[test]
    fn dump_lists_every_table_and_row() {
        let mut store = Store::open_in_memory().unwrap();
        store.add_user("Alice", "Vegetarian").unwrap();
        store
            .add_recipe(&NewRecipe::new("Soup", "Fusion", Difficulty::Easy, "Boil.", ["Salt"]))
            .unwrap();

        let mut out = Vec::new();
        store.dump_tables(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for header in ["USERS", "RECIPES", "INGREDIENTS", "RECIPE_INGREDIENTS", "REVIEWS"] {
            assert!(text.contains(&format!("--- {header} ---")), "missing {header}");
        }
        assert!(text.contains("(1, 'Alice', 'Vegetarian')"));
        assert!(text.contains("(1, 'Salt', NULL)"));
        assert!(text.contains("(1, 1, NULL)"));
    }
}
