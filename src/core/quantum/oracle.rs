//! Phase oracle marking one target bitstring.
use super::engine::parse_bitstring;
use super::gates::Gate;
use crate::core::error::{check_dimension, Result};

/// A validated search target: `n` bits, character `i` naming qubit `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    bits: String,
    index: usize,
}

impl Target {
    /// Qubit count and target length are validated together.
    pub fn parse(bits: &str, n_qubits: usize) -> Result<Self> {
        check_dimension(n_qubits)?;
        let index = parse_bitstring(bits, n_qubits)?;
        Ok(Self {
            bits: bits.to_string(),
            index,
        })
    }

    pub fn n_qubits(&self) -> usize {
        self.bits.len()
    }

    pub fn bits(&self) -> &str {
        &self.bits
    }

    /// Basis-state index of the marked state.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Qubits whose target bit is 0.
    pub fn zero_qubits(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'0')
            .map(|(q, _)| q)
    }
}

/// `H · MCX · H` on the last qubit: a phase flip of `|1…1⟩`.
pub(crate) fn flip_all_ones(n_qubits: usize) -> [Gate; 3] {
    let last = n_qubits - 1;
    [Gate::H(last), Gate::mcx(0..last, last), Gate::H(last)]
}

/// Gate sequence multiplying the target amplitude by −1 and leaving every
/// other amplitude unchanged. The X layer maps the target onto `|1…1⟩`
/// and back, so the sequence is its own inverse.
pub fn phase_oracle(target: &Target) -> Vec<Gate> {
    let n = target.n_qubits();
    let x_layer: Vec<Gate> = target.zero_qubits().map(Gate::X).collect();
    let mut seq = Vec::with_capacity(2 * x_layer.len() + 3);
    seq.extend(x_layer.iter().cloned());
    seq.extend(flip_all_ones(n));
    seq.extend(x_layer);
    seq
}
