//! Gate set and the index-pair kernels that apply it to a statevector.
//!
//! Qubit 0 is the most significant bit of a basis-state index, so on an
//! `n`-qubit register qubit `q` owns the bit `1 << (n - 1 - q)`.
//!
//! Kernels walk every index whose target bit is clear and touch exactly the
//! pair `(i, i | bit)`, so each amplitude is read and written once.
use std::fmt;

use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use crate::core::error::{Result, SimError};

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Bit owned by `qubit` in a basis-state index of an `n_qubits` register.
#[inline]
pub fn qubit_mask(n_qubits: usize, qubit: usize) -> usize {
    1usize << (n_qubits - 1 - qubit)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateKind {
    X,
    H,
    MultiControlledX,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    X(usize),
    H(usize),
    /// Generalized Toffoli: flips `target` when every control reads 1.
    /// No controls is plain X; one control is CNOT.
    Mcx { controls: Vec<usize>, target: usize },
}

impl Gate {
    pub fn mcx(controls: impl IntoIterator<Item = usize>, target: usize) -> Self {
        Gate::Mcx {
            controls: controls.into_iter().collect(),
            target,
        }
    }

    pub fn kind(&self) -> GateKind {
        match self {
            Gate::X(_) => GateKind::X,
            Gate::H(_) => GateKind::H,
            Gate::Mcx { .. } => GateKind::MultiControlledX,
        }
    }

    pub fn targets(&self) -> &[usize] {
        match self {
            Gate::X(q) | Gate::H(q) => std::slice::from_ref(q),
            Gate::Mcx { target, .. } => std::slice::from_ref(target),
        }
    }

    pub fn controls(&self) -> &[usize] {
        match self {
            Gate::Mcx { controls, .. } => controls,
            _ => &[],
        }
    }

    /// Checks indices against an `n_qubits` register and rejects
    /// control/target overlap and repeated controls.
    pub fn validate(&self, n_qubits: usize) -> Result<()> {
        for &q in self.targets().iter().chain(self.controls()) {
            if q >= n_qubits {
                return Err(SimError::out_of_range(q, n_qubits));
            }
        }
        let target = self.targets()[0];
        let mut seen = 0usize;
        for &ctl in self.controls() {
            let bit = qubit_mask(n_qubits, ctl);
            if ctl == target || seen & bit != 0 {
                return Err(SimError::overlap(ctl, n_qubits));
            }
            seen |= bit;
        }
        Ok(())
    }

    /// Applies the gate in place. `validate` must have passed for
    /// `n_qubits = log2(amps.len())`.
    pub(crate) fn apply_to(&self, amps: &mut [C64], n_qubits: usize) {
        debug_assert_eq!(amps.len(), 1usize << n_qubits);
        match self {
            Gate::X(q) => swap_pairs(amps, qubit_mask(n_qubits, *q), 0),
            Gate::H(q) => hadamard_pairs(amps, qubit_mask(n_qubits, *q)),
            Gate::Mcx { controls, target } => {
                let ctl = controls
                    .iter()
                    .fold(0usize, |acc, &q| acc | qubit_mask(n_qubits, q));
                let bit = qubit_mask(n_qubits, *target);
                assert_eq!(ctl & bit, 0, "control and target bits overlap");
                swap_pairs(amps, bit, ctl);
            }
        }
    }

    /// Full `2^n × 2^n` matrix of this gate; used to cross-check the kernels.
    pub fn unitary(&self, n_qubits: usize) -> DMatrix<C64> {
        match self {
            Gate::X(q) => super::ops::lift_1q(&x(), n_qubits, *q),
            Gate::H(q) => super::ops::lift_1q(&h(), n_qubits, *q),
            Gate::Mcx { controls, target } => super::ops::mcx_n(n_qubits, controls, *target),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::X(q) => write!(f, "x q{q}"),
            Gate::H(q) => write!(f, "h q{q}"),
            Gate::Mcx { controls, target } => {
                write!(f, "mcx [")?;
                for (i, q) in controls.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "q{q}")?;
                }
                write!(f, "] -> q{target}")
            }
        }
    }
}

/// Swaps `(i, i | bit)` for every `i` with `bit` clear and all `ctl` bits set.
fn swap_pairs(amps: &mut [C64], bit: usize, ctl: usize) {
    for i in 0..amps.len() {
        if i & bit == 0 && i & ctl == ctl {
            amps.swap(i, i | bit);
        }
    }
}

fn hadamard_pairs(amps: &mut [C64], bit: usize) {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    for i in 0..amps.len() {
        if i & bit == 0 {
            let (a, b) = (amps[i], amps[i | bit]);
            amps[i] = (a + b) * s;
            amps[i | bit] = (a - b) * s;
        }
    }
}

pub fn x() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
}

pub fn h() -> DMatrix<C64> {
    let s = 1.0_f64 / 2.0_f64.sqrt();
    DMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}
