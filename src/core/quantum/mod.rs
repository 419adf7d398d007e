//! Statevector simulation of Grover search.
//!
//! Gates and circuits are plain immutable values; [`StateVectorEngine`]
//! owns the amplitudes and is the only thing that mutates them.

pub mod circuit;
pub mod density;
pub mod diffuser;
pub mod engine;
pub mod gates;
pub mod grover;
pub mod measure;
pub mod ops;
pub mod oracle;

pub use circuit::{Circuit, CircuitBuilder, Instruction};
pub use density::DensityMatrix;
pub use diffuser::diffuser;
pub use engine::{bitstring, parse_bitstring, DriftPolicy, StateVectorEngine, DEFAULT_TOLERANCE};
pub use gates::{Gate, GateKind};
pub use grover::{grover_circuit, optimal_iterations, success_probability, GroverBuilder};
pub use measure::Counts;
pub use oracle::{phase_oracle, Target};
