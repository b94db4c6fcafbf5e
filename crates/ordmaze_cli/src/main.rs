//! `ordmaze` command-line front-end.
//!
//! Examples:
//!   ordmaze maze 6fb976ab49dcec017f1e201e84395983204ae1a7c2abf7ced0a85d692e442799i0
//!   ordmaze maze bc1p... --size 24 --style boxed --exit
//!   ordmaze play abci0
//!   ordmaze snake abci0 --moves ".......w...."
//!   ordmaze --verbose ids wallet.json

use std::io;
use std::process;

use tracing::{debug, Level};

mod args;
mod commands;
mod error;
mod paths;
mod play;

use args::{parse_args, usage_text};
use commands::Context;
use error::CliError;
use paths::{AppPaths, Config};

fn load_context(explicit: Option<std::path::PathBuf>) -> Result<Context, CliError> {
    let config_path = match explicit {
        Some(path) => Some(path),
        None => match AppPaths::new() {
            Ok(paths) => {
                debug!(dir = %paths.config_dir().display(), "config directory");
                Some(paths.config_file())
            }
            Err(CliError::NoConfigDir) => None,
            Err(e) => return Err(e),
        },
    };
    let config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Ok(Context {
        config,
        config_path,
    })
}

fn run() -> Result<(), CliError> {
    let inv = parse_args(std::env::args().skip(1).collect())?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if inv.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let ctx = load_context(inv.config)?;
    debug!(config = ?ctx.config, "starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&inv.command, &inv.flags, &ctx, stdin.lock(), &mut out)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        if matches!(e, CliError::Usage(_)) {
            eprintln!();
            eprint!("{}", usage_text());
        }
        process::exit(e.exit_code());
    }
}
