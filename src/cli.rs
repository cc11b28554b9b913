//! Command-line flags for the `recipe-portal` binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "recipe-portal", version, about = "Browse, search and add recipes")]
pub struct Cli {
    /// SQLite file to use instead of ~/.recipe-portal/recipes.sqlite
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Wipe the store and fill it with demo recipes before starting
    #[arg(long)]
    pub demo: bool,

    /// Seed for the demo recipe generator (random when omitted)
    #[arg(long, value_name = "N", requires = "demo")]
    pub rng_seed: Option<u64>,

    /// Print every table to stdout and exit
    #[arg(long)]
    pub dump: bool,

    /// Log filter directive, e.g. `debug` or `recipe_portal=trace`
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_the_store_alone() {
        let cli = Cli::try_parse_from(["recipe-portal"]).unwrap();
        assert!(!cli.demo);
        assert!(!cli.dump);
        assert!(cli.db.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn rng_seed_needs_demo() {
        assert!(Cli::try_parse_from(["recipe-portal", "--rng-seed", "4"]).is_err());

        let cli = Cli::try_parse_from(["recipe-portal", "--demo", "--rng-seed", "4"]).unwrap();
        assert_eq!(cli.rng_seed, Some(4));
    }

    #[test]
    fn db_path_is_taken_verbatim() {
        let cli =
            Cli::try_parse_from(["recipe-portal", "--db", "/tmp/r.sqlite", "--dump"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/r.sqlite")));
        assert!(cli.dump);
    }
}
