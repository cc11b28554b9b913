//! Binary entry point: parse flags, open (or reset) the store, then either
//! dump the tables or hand the store to the TUI.
use std::io;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::info;

use recipe_portal::cli::Cli;
use recipe_portal::seed::reset_and_seed;
use recipe_portal::{default_db_path, logging, run_app, App, Store};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };

    logging::init(&logging::log_path(&db_path), &cli.log_level)?;
    info!(path = %db_path.display(), demo = cli.demo, "starting recipe portal");

    let store = if cli.demo {
        let mut rng = match cli.rng_seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        reset_and_seed(&db_path, &mut rng)?
    } else {
        Store::open(&db_path)?
    };

    if cli.dump {
        return store.dump_tables(&mut io::stdout().lock());
    }

    let mut app = App::new(store)?;
    run_app(&mut app)
}
