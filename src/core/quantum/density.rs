//! Single-qubit reduced density matrices and Bloch vectors.
use std::ops::Index;

use nalgebra::Matrix2;
use num_complex::Complex64 as C64;

use super::engine::StateVectorEngine;
use super::gates::qubit_mask;
use crate::core::error::{Result, SimError};

/// Hermitian, trace-1 2×2 matrix `ρ` of one qubit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityMatrix(Matrix2<C64>);

impl DensityMatrix {
    /// `|ψ⟩⟨ψ|` for `ψ = (a0, a1)`, normalized.
    pub fn from_pure(a0: C64, a1: C64) -> Self {
        let norm = a0.norm_sqr() + a1.norm_sqr();
        Self(
            Matrix2::new(
                a0 * a0.conj(),
                a0 * a1.conj(),
                a1 * a0.conj(),
                a1 * a1.conj(),
            ) / C64::from(norm),
        )
    }

    pub fn matrix(&self) -> &Matrix2<C64> {
        &self.0
    }

    pub fn trace(&self) -> C64 {
        self.0.trace()
    }

    /// `tr(ρ²)`: 1 for a pure qubit, 1/2 for maximally mixed.
    pub fn purity(&self) -> f64 {
        (self.0 * self.0).trace().re
    }

    pub fn is_hermitian(&self, tol: f64) -> bool {
        (self.0 - self.0.adjoint()).iter().all(|z| z.norm() <= tol)
    }

    /// `(x, y, z)` with `ρ = (I + xX + yY + zZ) / 2`.
    pub fn bloch_vector(&self) -> [f64; 3] {
        let r01 = self.0[(0, 1)];
        [
            2.0 * r01.re,
            -2.0 * r01.im,
            (self.0[(0, 0)] - self.0[(1, 1)]).re,
        ]
    }

    /// Entry-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &DensityMatrix, tol: f64) -> bool {
        (self.0 - other.0).iter().all(|z| z.norm() <= tol)
    }
}

impl Index<(usize, usize)> for DensityMatrix {
    type Output = C64;

    fn index(&self, idx: (usize, usize)) -> &C64 {
        &self.0[idx]
    }
}

impl StateVectorEngine {
    /// Traces out every qubit except `qubit`.
    ///
    /// Pairs each basis state with qubit clear against its partner with the
    /// qubit set; the diagonal collects `|a|²` per bit value and the
    /// off-diagonal collects `a0·conj(a1)`. The result is divided by the
    /// total weight so its trace is 1.
    pub fn partial_trace(&self, qubit: usize) -> Result<DensityMatrix> {
        let n = self.n_qubits();
        if qubit >= n {
            return Err(SimError::out_of_range(qubit, n));
        }
        let bit = qubit_mask(n, qubit);
        let amps = self.amplitudes();
        let zero = C64::new(0.0, 0.0);
        let (mut r00, mut r11, mut r01) = (0.0_f64, 0.0_f64, zero);
        for i in (0..amps.len()).filter(|i| i & bit == 0) {
            let (a0, a1) = (amps[i], amps[i | bit]);
            r00 += a0.norm_sqr();
            r11 += a1.norm_sqr();
            r01 += a0 * a1.conj();
        }
        let total = r00 + r11;
        let rho = Matrix2::new(
            C64::from(r00 / total),
            r01 / total,
            r01.conj() / total,
            C64::from(r11 / total),
        );
        Ok(DensityMatrix(rho))
    }

    pub fn bloch_vector(&self, qubit: usize) -> Result<[f64; 3]> {
        Ok(self.partial_trace(qubit)?.bloch_vector())
    }

    /// Reduced state of every qubit, in qubit order.
    pub fn reduced_states(&self) -> Vec<DensityMatrix> {
        (0..self.n_qubits())
            .filter_map(|q| self.partial_trace(q).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::gates::Gate;

    #[test]
    fn zero_state_is_pure_up() {
        let e = StateVectorEngine::initialize(2).unwrap();
        let rho = e.partial_trace(1).unwrap();
        assert!((rho[(0, 0)].re - 1.0).abs() < 1e-12);
        assert!((rho.purity() - 1.0).abs() < 1e-12);
        let [x, y, z] = rho.bloch_vector();
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12 && (z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn plus_state_points_along_x() {
        let mut e = StateVectorEngine::initialize(2).unwrap();
        e.apply(&Gate::H(0)).unwrap();
        let [x, _, z] = e.bloch_vector(0).unwrap();
        assert!((x - 1.0).abs() < 1e-12);
        assert!(z.abs() < 1e-12);
        // qubit 1 still |0⟩
        let [_, _, z1] = e.bloch_vector(1).unwrap();
        assert!((z1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bell_pair_is_maximally_mixed() {
        let mut e = StateVectorEngine::initialize(2).unwrap();
        e.apply(&Gate::H(0)).unwrap();
        e.apply(&Gate::mcx([0], 1)).unwrap();
        for q in 0..2 {
            let rho = e.partial_trace(q).unwrap();
            assert!((rho.purity() - 0.5).abs() < 1e-12);
            assert!(rho.is_hermitian(1e-12));
            assert!((rho.trace().re - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn out_of_range_qubit() {
        let e = StateVectorEngine::initialize(2).unwrap();
        assert!(matches!(
            e.partial_trace(2),
            Err(SimError::InvalidQubitIndex { index: 2, .. })
        ));
    }
}
