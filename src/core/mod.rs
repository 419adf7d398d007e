//! Core module tree: simulation engine and its error kinds.

pub mod error;
pub mod quantum;

pub use error::{Result, SimError, MAX_QUBITS};
