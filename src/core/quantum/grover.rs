//! Grover circuit assembly: superposition, `k` oracle+diffuser rounds,
//! then a measurement over every qubit.
use std::f64::consts::PI;

use super::circuit::{Circuit, CircuitBuilder};
use super::diffuser::diffuser;
use super::gates::Gate;
use super::oracle::{phase_oracle, Target};
use crate::core::error::{check_dimension, Result};

/// `√(2^n)` for a register already known to be in range.
fn sqrt_space(n_qubits: usize) -> f64 {
    ((1usize << n_qubits) as f64).sqrt()
}

/// `⌊π/4 · √(2^n)⌋`, at least 1.
pub fn optimal_iterations(n_qubits: usize) -> Result<usize> {
    check_dimension(n_qubits)?;
    Ok(((PI / 4.0) * sqrt_space(n_qubits)).floor().max(1.0) as usize)
}

/// Probability of reading the single marked state after `iterations`
/// rounds: `sin²((2k+1)·θ)` with `sin θ = 1/√N`.
pub fn success_probability(n_qubits: usize, iterations: usize) -> Result<f64> {
    check_dimension(n_qubits)?;
    let theta = (1.0 / sqrt_space(n_qubits)).asin();
    Ok(((2 * iterations + 1) as f64 * theta).sin().powi(2))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Rounds {
    Fixed(usize),
    Optimal,
}

#[derive(Clone, Debug)]
pub struct GroverBuilder {
    n_qubits: usize,
    target: String,
    rounds: Rounds,
    barriers: bool,
    measure: bool,
}

impl GroverBuilder {
    /// One iteration, barriers on, terminal measurement on.
    pub fn new(n_qubits: usize, target: impl Into<String>) -> Self {
        Self {
            n_qubits,
            target: target.into(),
            rounds: Rounds::Fixed(1),
            barriers: true,
            measure: true,
        }
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.rounds = Rounds::Fixed(iterations);
        self
    }

    /// Use [`optimal_iterations`] for the register, resolved at build time.
    pub fn optimal(mut self) -> Self {
        self.rounds = Rounds::Optimal;
        self
    }

    /// Round count this builder will emit.
    pub fn resolved_iterations(&self) -> Result<usize> {
        match self.rounds {
            Rounds::Fixed(k) => Ok(k),
            Rounds::Optimal => optimal_iterations(self.n_qubits),
        }
    }

    pub fn barriers(mut self, on: bool) -> Self {
        self.barriers = on;
        self
    }

    pub fn measure(mut self, on: bool) -> Self {
        self.measure = on;
        self
    }

    pub fn build(&self) -> Result<Circuit> {
        let target = Target::parse(&self.target, self.n_qubits)?;
        let n = self.n_qubits;
        let iterations = self.resolved_iterations()?;
        let oracle = phase_oracle(&target);
        let diffusion = diffuser(n)?;

        let mut b = CircuitBuilder::new(n)?;
        b.gates((0..n).map(Gate::H))?;
        for _ in 0..iterations {
            b.gates(oracle.iter().cloned())?;
            if self.barriers {
                b.barrier();
            }
            b.gates(diffusion.iter().cloned())?;
            if self.barriers {
                b.barrier();
            }
        }
        tracing::debug!(
            qubits = n,
            marked = target.bits(),
            iterations,
            "assembled grover circuit"
        );
        Ok(if self.measure { b.measure_all() } else { b.finish() })
    }
}

/// Shorthand for `GroverBuilder::new(n, target).iterations(k).build()`.
pub fn grover_circuit(n_qubits: usize, target: &str, iterations: usize) -> Result<Circuit> {
    GroverBuilder::new(n_qubits, target)
        .iterations(iterations)
        .build()
}
