//! Structured logging to a file beside the store. The terminal belongs to the
//! TUI, so nothing is written to stdout or stderr once the UI is up.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// File name of the log, created next to the SQLite database.
pub const LOG_FILE_NAME: &str = "recipe-portal.log";

/// Where the log for a store at `db_path` goes.
pub fn log_path(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(|dir| dir.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

/// Install the global subscriber, appending to `path` with the given filter
/// directive. Calling it twice fails because the global default is taken.
pub fn init(path: &Path, directive: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log level '{directive}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_sits_next_to_the_database() {
        let path = log_path(Path::new("/data/recipes.sqlite"));
        assert_eq!(path, PathBuf::from("/data/recipe-portal.log"));
    }

    #[test]
    fn bare_file_name_logs_in_working_directory() {
        assert_eq!(
            log_path(Path::new("recipes.sqlite")),
            PathBuf::from(LOG_FILE_NAME)
        );
    }

    #[test]
    fn bad_directive_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(&dir.path().join("x.log"), "recipe_portal=loud").unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }
}
