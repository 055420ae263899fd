//! Event counter command interpreter.
//!
//! Seeds the counter from INPUT_FILE (one `id count` pair per line), then
//! executes commands read from stdin until end of input or `quit`.
//!
//! Results go to stdout; diagnostics go to stderr and are controlled by
//! `RUST_LOG` (default `warn`).

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use avltree::{Driver, TreeConfig, VerifyMode, MIN_CAPACITY};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about = "Count events with an array-backed AVL tree")]
struct Args {
    /// File of `id count` pairs used to seed the counter.
    input_file: PathBuf,

    /// Minimum number of node slots to allocate up front.
    #[arg(long, env = "AVLTREE_INITIAL_CAPACITY", default_value_t = MIN_CAPACITY)]
    initial_capacity: usize,

    /// Re-validate the whole tree after every mutation.
    #[arg(long)]
    verify: bool,
}

fn install_tracing_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    install_tracing_subscriber();
    let args = Args::parse();

    let verify = if args.verify {
        VerifyMode::EveryMutation
    } else {
        VerifyMode::Off
    };
    let config = TreeConfig::new(args.initial_capacity).with_verify(verify);

    let file = match File::open(&args.input_file) {
        Ok(file) => file,
        Err(err) => {
            println!("Could not open input file {}", args.input_file.display());
            error!(path = %args.input_file.display(), %err, "failed to open input file");
            return ExitCode::FAILURE;
        }
    };

    let mut driver = match Driver::from_seed(BufReader::new(file), config) {
        Ok(driver) => driver,
        Err(err) => {
            println!("Exception: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!(events = driver.counter().len(), "counter seeded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = driver.run(stdin.lock(), stdout.lock()) {
        error!(%err, "command loop aborted");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
