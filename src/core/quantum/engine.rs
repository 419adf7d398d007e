//! Dense statevector engine.
//!
//! Owns the `2^n` amplitude vector and mutates it only through [`apply`]
//! and [`apply_circuit`]. Every other query is read-only.
//!
//! [`apply`]: StateVectorEngine::apply
//! [`apply_circuit`]: StateVectorEngine::apply_circuit
use nalgebra::DVector;
use num_complex::Complex64 as C64;
use serde::Deserialize;
use tracing::{debug, warn};

use super::circuit::{Circuit, Instruction};
use super::gates::Gate;
use crate::core::error::{check_dimension, Result, SimError};

pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// What to do when a gate leaves the squared norm off 1 by more than the
/// tolerance. This only happens on an internal bug.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftPolicy {
    /// Return [`SimError::NormalizationDrift`].
    Fail,
    /// Log a warning and rescale to unit norm.
    Renormalize,
}

impl Default for DriftPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            DriftPolicy::Fail
        } else {
            DriftPolicy::Renormalize
        }
    }
}

/// Bitstring label of a basis-state index; character `i` is qubit `i`.
pub fn bitstring(index: usize, n_qubits: usize) -> String {
    format!("{:0width$b}", index, width = n_qubits)
}

/// Parses a bitstring label of exactly `n_qubits` characters into its
/// basis-state index.
pub fn parse_bitstring(bits: &str, n_qubits: usize) -> Result<usize> {
    let len = bits.chars().count();
    if len != n_qubits {
        return Err(SimError::InvalidTargetLength {
            expected: n_qubits,
            actual: len,
        });
    }
    let mut index = 0usize;
    for (position, ch) in bits.chars().enumerate() {
        let bit = match ch {
            '0' => 0,
            '1' => 1,
            _ => return Err(SimError::InvalidBitCharacter { ch, position }),
        };
        index = (index << 1) | bit;
    }
    Ok(index)
}

#[derive(Clone, Debug)]
pub struct StateVectorEngine {
    n_qubits: usize,
    pub(crate) amps: DVector<C64>,
    tolerance: f64,
    policy: DriftPolicy,
}

impl StateVectorEngine {
    /// `|0…0⟩` on `n_qubits` qubits.
    pub fn initialize(n_qubits: usize) -> Result<Self> {
        check_dimension(n_qubits)?;
        let mut amps = DVector::from_element(1usize << n_qubits, C64::new(0.0, 0.0));
        amps[0] = C64::new(1.0, 0.0);
        Ok(Self {
            n_qubits,
            amps,
            tolerance: DEFAULT_TOLERANCE,
            policy: DriftPolicy::default(),
        })
    }

    /// Basis state named by a label such as `"0101"`.
    pub fn from_label(label: &str) -> Result<Self> {
        let n_qubits = label.chars().count();
        check_dimension(n_qubits)?;
        let index = parse_bitstring(label, n_qubits)?;
        let mut engine = Self::initialize(n_qubits)?;
        engine.amps.swap_rows(0, index);
        Ok(engine)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_policy(mut self, policy: DriftPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn dimension(&self) -> usize {
        self.amps.len()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn amplitudes(&self) -> &[C64] {
        self.amps.as_slice()
    }

    pub fn amplitude(&self, index: usize) -> Option<C64> {
        self.amps.get(index).copied()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|z| z.norm_sqr()).collect()
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|z| z.norm_sqr()).sum()
    }

    /// Applies one gate in place. Indices are checked before any amplitude
    /// is touched.
    pub fn apply(&mut self, gate: &Gate) -> Result<()> {
        gate.validate(self.n_qubits)?;
        gate.apply_to(self.amps.as_mut_slice(), self.n_qubits);
        self.check_norm()
    }

    /// Runs every gate in order, skipping barriers. Returns the qubits of
    /// the terminal measurement, which is not applied to the state.
    ///
    /// The circuit must be built for exactly this register width.
    pub fn apply_circuit<'c>(&mut self, circuit: &'c Circuit) -> Result<Option<&'c [usize]>> {
        if circuit.n_qubits() != self.n_qubits {
            return Err(SimError::RegisterMismatch {
                circuit: circuit.n_qubits(),
                state: self.n_qubits,
            });
        }
        for gate in circuit.gates() {
            gate.validate(self.n_qubits)?;
        }
        let mut applied = 0usize;
        for ins in circuit.instructions() {
            match ins {
                Instruction::Gate(g) => {
                    g.apply_to(self.amps.as_mut_slice(), self.n_qubits);
                    self.check_norm()?;
                    applied += 1;
                }
                Instruction::Barrier => {}
                Instruction::Measure(qs) => {
                    debug!(applied, measured = qs.len(), "circuit evolved up to measurement");
                    return Ok(Some(qs));
                }
            }
        }
        debug!(applied, "circuit evolved");
        Ok(None)
    }

    /// Evolves a copy of this state through `circuit`, leaving `self` as is.
    pub fn evolve(&self, circuit: &Circuit) -> Result<Self> {
        let mut next = self.clone();
        next.apply_circuit(circuit)?;
        Ok(next)
    }

    fn check_norm(&mut self) -> Result<()> {
        let norm_sqr = self.norm_sqr();
        if (norm_sqr - 1.0).abs() <= self.tolerance {
            return Ok(());
        }
        match self.policy {
            DriftPolicy::Fail => Err(SimError::NormalizationDrift {
                norm_sqr,
                tolerance: self.tolerance,
            }),
            DriftPolicy::Renormalize => {
                warn!(norm_sqr, tolerance = self.tolerance, "normalization drift, rescaling state");
                if norm_sqr == 0.0 {
                    return Err(SimError::NormalizationDrift {
                        norm_sqr,
                        tolerance: self.tolerance,
                    });
                }
                self.amps /= C64::from(norm_sqr.sqrt());
                Ok(())
            }
        }
    }
}
