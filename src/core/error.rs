//! Error kinds raised by the statevector simulator.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Dense simulation stops here: 2^24 amplitudes of 16 bytes is 256 MiB.
pub const MAX_QUBITS: usize = 24;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Qubit count below one or above the dense ceiling.
    #[error("invalid dimension: {qubits} qubits (supported: 1..={max})", max = MAX_QUBITS)]
    InvalidDimension { qubits: usize },

    #[error("target bitstring has length {actual}, expected {expected}")]
    InvalidTargetLength { expected: usize, actual: usize },

    #[error("target bitstring contains '{ch}' at position {position}; only '0' and '1' are allowed")]
    InvalidBitCharacter { ch: char, position: usize },

    /// Index outside `[0, n)`, or a control that is also the target.
    #[error("invalid qubit index {index} on a {qubits}-qubit register: {reason}")]
    InvalidQubitIndex {
        index: usize,
        qubits: usize,
        reason: &'static str,
    },

    /// A circuit built for one register width applied to another.
    #[error("circuit is for {circuit} qubits but the state has {state}")]
    RegisterMismatch { circuit: usize, state: usize },

    #[error("shot count must be positive, got {shots}")]
    InvalidShotCount { shots: usize },

    /// Internal fault: a gate kernel did not preserve the norm.
    #[error("normalization drift: squared norm {norm_sqr:e} deviates from 1 by more than {tolerance:e}")]
    NormalizationDrift { norm_sqr: f64, tolerance: f64 },
}

/// Rejects registers outside `1..=MAX_QUBITS`.
pub fn check_dimension(qubits: usize) -> Result<()> {
    if qubits == 0 || qubits > MAX_QUBITS {
        return Err(SimError::InvalidDimension { qubits });
    }
    Ok(())
}

impl SimError {
    pub(crate) fn out_of_range(index: usize, qubits: usize) -> Self {
        SimError::InvalidQubitIndex {
            index,
            qubits,
            reason: "index out of range",
        }
    }

    pub(crate) fn overlap(index: usize, qubits: usize) -> Self {
        SimError::InvalidQubitIndex {
            index,
            qubits,
            reason: "qubit used as both control and target",
        }
    }
}
