//! Subcommand implementations for the `grover` binary.

pub mod quantum;
