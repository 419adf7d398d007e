use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "grover",
    about = "Grover search on a dense statevector simulator",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct GroverCli {
    /// Global: path to config (TOML); default: ~/.grover/grover.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: debug-level logging (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

/// Search parameters; unset flags fall back to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Number of qubits (search space 2^n)
    #[arg(short = 'n', long = "qubits", value_name = "N")]
    pub qubits: Option<usize>,

    /// Marked bitstring; character i is qubit i
    #[arg(short = 't', long = "target", value_name = "BITS")]
    pub target: Option<String>,

    /// Grover iterations (oracle + diffuser rounds)
    #[arg(short = 'k', long = "iterations", value_name = "K", conflicts_with = "optimal")]
    pub iterations: Option<usize>,

    /// Use floor(pi/4 * sqrt(2^n)) iterations
    #[arg(long = "optimal", action = ArgAction::SetTrue)]
    pub optimal: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build, evolve and sample a Grover circuit
    ///
    /// Examples:
    ///   grover run -n 2 -t 11 --shots 1000 --seed 7
    ///   grover run -n 7 -t 1101101 --optimal --json
    Run {
        #[command(flatten)]
        search: SearchArgs,

        #[arg(long = "shots", value_name = "N")]
        shots: Option<usize>,

        /// Fix the sampling RNG for reproducible counts
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,

        /// Print a JSON report instead of text
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Print the assembled circuit as an instruction listing
    Circuit {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print pre-measurement amplitudes of the evolved state
    State {
        #[command(flatten)]
        search: SearchArgs,

        /// Hide amplitudes with probability below this threshold
        #[arg(long = "min-prob", value_name = "P", default_value_t = 0.0)]
        min_prob: f64,
    },
}
