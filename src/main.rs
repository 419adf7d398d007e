//! `grover`: drive the statevector simulator from the command line.
use clap::Parser; // trait import enables GroverCli::parse()
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use grover_sim::cli::{Command, GroverCli};
use grover_sim::commands::quantum::{self, RunSettings};
use grover_sim::config::{default_config_path, GroverConfig};

fn init_tracing(verbose: bool) {
    let default = if verbose { "grover_sim=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() {
    let args = GroverCli::parse();
    init_tracing(args.verbose);
    if let Err(e) = dispatch(args) {
        eprintln!("{} {:#}", "error:".bright_red().bold(), e);
        std::process::exit(1);
    }
}

fn dispatch(args: GroverCli) -> anyhow::Result<()> {
    // An explicit --config must exist; the default location is optional.
    let cfg = match &args.config {
        Some(path) => GroverConfig::from_toml_file(path)?,
        None => GroverConfig::load(default_config_path().as_deref())?,
    };

    match args.cmd {
        Some(Command::Run {
            search,
            shots,
            seed,
            json,
        }) => {
            let settings = RunSettings::resolve(&cfg, &search, shots, seed)?;
            quantum::run(&settings, json)
        }

        Some(Command::Circuit { search }) => {
            let settings = RunSettings::resolve(&cfg, &search, None, None)?;
            quantum::print_circuit(&settings)
        }

        Some(Command::State { search, min_prob }) => {
            let settings = RunSettings::resolve(&cfg, &search, None, None)?;
            quantum::print_state(&settings, min_prob)
        }

        None => {
            use clap::CommandFactory;
            GroverCli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
