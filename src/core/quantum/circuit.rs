//! Immutable circuit description: ordered gates, barriers for diagramming,
//! and an optional terminal measurement.
use std::fmt;

use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use super::gates::Gate;
use super::ops::MAX_DENSE_QUBITS;
use crate::core::error::{check_dimension, Result, SimError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Gate(Gate),
    /// No-op for simulation.
    Barrier,
    /// Reads out the listed qubits; always the last instruction.
    Measure(Vec<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    n_qubits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.instructions.iter().filter_map(|ins| match ins {
            Instruction::Gate(g) => Some(g),
            _ => None,
        })
    }

    pub fn gate_count(&self) -> usize {
        self.gates().count()
    }

    /// Qubits read out by the terminal measurement, if there is one.
    pub fn measured(&self) -> Option<&[usize]> {
        match self.instructions.last() {
            Some(Instruction::Measure(qs)) => Some(qs),
            _ => None,
        }
    }

    /// Copy of this circuit without its terminal measurement.
    pub fn without_measurement(&self) -> Circuit {
        let mut instructions = self.instructions.clone();
        if let Some(Instruction::Measure(_)) = instructions.last() {
            instructions.pop();
        }
        Circuit {
            n_qubits: self.n_qubits,
            instructions,
        }
    }

    /// Product of every gate's dense matrix, in application order.
    pub fn unitary(&self) -> Result<DMatrix<C64>> {
        if self.n_qubits > MAX_DENSE_QUBITS {
            return Err(SimError::InvalidDimension {
                qubits: self.n_qubits,
            });
        }
        let dim = 1usize << self.n_qubits;
        let mut acc = DMatrix::<C64>::identity(dim, dim);
        for g in self.gates() {
            acc = g.unitary(self.n_qubits) * acc;
        }
        Ok(acc)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit {} qubits", self.n_qubits)?;
        for ins in &self.instructions {
            match ins {
                Instruction::Gate(g) => writeln!(f, "  {g}")?,
                Instruction::Barrier => writeln!(f, "  barrier")?,
                Instruction::Measure(qs) => {
                    let list: Vec<String> = qs.iter().map(|q| format!("q{q}")).collect();
                    writeln!(f, "  measure [{}]", list.join(", "))?
                }
            }
        }
        Ok(())
    }
}

/// Accumulates validated instructions; `measure*` and `finish` seal the
/// circuit, so a measurement can only ever be terminal.
#[derive(Debug)]
pub struct CircuitBuilder {
    n_qubits: usize,
    instructions: Vec<Instruction>,
}

impl CircuitBuilder {
    pub fn new(n_qubits: usize) -> Result<Self> {
        check_dimension(n_qubits)?;
        Ok(Self {
            n_qubits,
            instructions: Vec::new(),
        })
    }

    pub fn gate(&mut self, gate: Gate) -> Result<&mut Self> {
        gate.validate(self.n_qubits)?;
        self.instructions.push(Instruction::Gate(gate));
        Ok(self)
    }

    pub fn gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> Result<&mut Self> {
        for g in gates {
            self.gate(g)?;
        }
        Ok(self)
    }

    pub fn barrier(&mut self) -> &mut Self {
        self.instructions.push(Instruction::Barrier);
        self
    }

    pub fn measure(mut self, qubits: Vec<usize>) -> Result<Circuit> {
        if let Some(&bad) = qubits.iter().find(|&&q| q >= self.n_qubits) {
            return Err(SimError::out_of_range(bad, self.n_qubits));
        }
        self.instructions.push(Instruction::Measure(qubits));
        Ok(self.finish())
    }

    pub fn measure_all(mut self) -> Circuit {
        let all = (0..self.n_qubits).collect();
        self.instructions.push(Instruction::Measure(all));
        self.finish()
    }

    pub fn finish(self) -> Circuit {
        Circuit {
            n_qubits: self.n_qubits,
            instructions: self.instructions,
        }
    }
}
