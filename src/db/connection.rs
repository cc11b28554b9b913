use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;
use tracing::info;

use super::schema::ensure_schema;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".recipe-portal";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "recipes.sqlite";

/// Owned handle to the recipe database. One `Store` lives for the whole
/// session and is passed to whoever needs data; every operation on it is
/// self-contained, so a failed call never leaves half its writes behind.
pub struct Store {
    pub(super) conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path` and make sure the schema
    /// exists. Missing parent directories are created first.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
        ensure_schema(&conn)?;
        info!(path = %path.display(), "opened recipe store");
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database with the full schema.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
