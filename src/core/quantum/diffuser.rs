//! Inversion about the mean.
use super::gates::Gate;
use super::oracle::flip_all_ones;
use crate::core::error::{check_dimension, Result};

/// `H⊗n · X⊗n · (phase flip of |1…1⟩) · X⊗n · H⊗n`.
///
/// The X layer turns the flip into one on `|0…0⟩`, and the Hadamard layer
/// moves that onto the uniform superposition, giving `2|s⟩⟨s| − I` up to a
/// global phase. The sequence is its own inverse.
pub fn diffuser(n_qubits: usize) -> Result<Vec<Gate>> {
    check_dimension(n_qubits)?;
    let h_layer = (0..n_qubits).map(Gate::H);
    let x_layer = (0..n_qubits).map(Gate::X);
    let seq = h_layer
        .clone()
        .chain(x_layer.clone())
        .chain(flip_all_ones(n_qubits))
        .chain(x_layer)
        .chain(h_layer)
        .collect();
    Ok(seq)
}
