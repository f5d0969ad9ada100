//! # Unilog
//!
//! This binary is the CLI front-end for Unilog. For each file given on the command line, it
//! runs `execute(Refer{tag=atom("root"), file_path=atom(path)}, nil)` against a fresh fact
//! store, matching `original_source/src/main.cpp`'s per-file loop.
extern crate unilog;

mod cli;

use cli::Cli;

use log::{error, info};
use unilog::executor::Executor;
use unilog::fact_store::InMemoryFactStore;
use unilog::prover::NoopProver;

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let mut exit_code = 0;

    for file in &args.files {
        info!("checking file '{}'", file.display());

        let mut executor = Executor::new(Box::new(InMemoryFactStore::default()), Box::new(NoopProver));

        if let Err(err) = executor.execute_root_file(file) {
            error!("{err}");
            exit_code = 1;
        }
    }

    std::process::exit(exit_code);
}
